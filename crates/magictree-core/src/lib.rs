//! Content type detection over a tree of byte signatures.
//!
//! Formats are arranged in a hierarchy rooted at
//! `application/octet-stream`. Detection walks down from the root, at each
//! level committing to the first child whose detector accepts the input,
//! and returns the deepest node reached. Once a child matches, its later
//! siblings are never tried, so declaration order is part of the result.
//!
//! # Quick Start
//!
//! ```
//! use magictree_core::Registry;
//!
//! let registry = Registry::with_defaults();
//!
//! let mime = registry.detect(&[0x1f, 0x8b, 0x08, 0x00]);
//! assert_eq!(mime.identifier(), "application/gzip");
//! assert_eq!(mime.extension(), ".gz");
//! assert!(mime.is("application/x-gzip"));
//!
//! // Detectors only ever see `limit` bytes.
//! let root = registry.detect_with_limit(&[0x1f, 0x8b], 0);
//! assert_eq!(root.identifier(), "application/octet-stream");
//! ```
//!
//! # Extending
//!
//! ```
//! use magictree_core::{Registry, Signature};
//!
//! let registry = Registry::with_defaults();
//! registry
//!     .extend(
//!         "application/octet-stream",
//!         Signature::new(0, b"MTRE".to_vec()),
//!         "application/x-magictree",
//!         ".mtr",
//!         ["application/x-mtr"],
//!     )
//!     .unwrap();
//! assert_eq!(
//!     registry.detect(b"MTRE\x00\x01").identifier(),
//!     "application/x-magictree"
//! );
//! ```
//!
//! # Modules
//!
//! - [`detector`]: the [`Detector`] trait and the built-in detectors
//! - [`catalog`]: the default format hierarchy
//! - [`config`]: TOML configuration for the read limit and extra signatures
//! - [`tree`]: arena storage and the descent algorithm

pub mod catalog;
pub mod config;
pub mod detector;
pub mod error;
mod mime;
mod node;
mod registry;
pub mod tree;

pub use config::{Config, ConfigError, DEFAULT_READ_LIMIT, SignatureConfig};
pub use detector::{Always, Detector, Never, Signature};
pub use error::{DetectError, RegistryError};
pub use mime::{Ancestors, MimeType, OCTET_STREAM, equals_any};
pub use node::Node;
pub use registry::{Registry, RegistryBuilder};
pub use tree::{Entry, NodeId, Tree};

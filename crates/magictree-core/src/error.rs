//! Error types for registry mutation and input reading.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::mime::MimeType;
use crate::registry::Registry;

/// Errors from changing the shape of a [`Registry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Cannot extend unknown MIME type: {parent}")]
    ParentNotFound { parent: String },
}

/// Errors from reading the input to detect.
///
/// Detection itself never fails; only obtaining the bytes can. Callers that
/// want a MIME type regardless can use [`DetectError::mime`], which is the
/// failure sentinel.
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Failed to open file: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read input")]
    Read {
        #[source]
        source: io::Error,
    },
}

impl DetectError {
    /// The failure sentinel: `application/octet-stream` with no parent,
    /// obtained without touching any registry.
    pub fn mime(&self) -> Arc<MimeType> {
        Registry::failure()
    }

    /// The underlying I/O error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            DetectError::Open { source, .. } | DetectError::Read { source } => source,
        }
    }
}

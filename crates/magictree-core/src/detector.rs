//! The detector capability: one predicate per format.
//!
//! The tree never looks inside a detector. It only decides *which*
//! detectors run and in what order; each detector answers whether the
//! leading bytes of the input belong to its format.
//!
//! Any `Fn(&[u8], u32) -> bool + Send + Sync` is a detector, so plain
//! functions such as [`magictree_magic::archive::gzip`] and closures plug
//! in directly. [`Always`], [`Never`] and [`Signature`] cover the root,
//! the failure sentinel and configuration-declared formats.

use std::fmt;

/// A single format predicate.
///
/// `input` holds at most `limit` bytes (the registry cuts it before
/// traversal); `limit` is passed through unchanged so that parsers can tell
/// a short document from a truncated one.
///
/// # Contract
///
/// - Total: malformed, truncated or empty input is `false`, never a panic.
/// - Bounded time: the registry's read lock is held while detectors run.
/// - Non-reentrant: a detector must not call back into the
///   [`Registry`](crate::Registry) that is running it.
///
/// # Object Safety
///
/// This trait is object-safe so that detectors can be stored as
/// `Arc<dyn Detector>` inside the tree.
pub trait Detector: Send + Sync {
    /// Whether `input` belongs to this detector's format.
    fn matches(&self, input: &[u8], limit: u32) -> bool;

    /// Human-readable name for this detector (used in logging).
    ///
    /// Defaults to the short (unqualified) type name, which for plain
    /// functions is the function name.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

impl<F> Detector for F
where
    F: Fn(&[u8], u32) -> bool + Send + Sync,
{
    fn matches(&self, input: &[u8], limit: u32) -> bool {
        self(input, limit)
    }
}

/// Accepts every input. Used by the root of a tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl Detector for Always {
    fn matches(&self, _input: &[u8], _limit: u32) -> bool {
        true
    }

    fn name(&self) -> &str {
        "Always"
    }
}

/// Rejects every input. Used by the failure sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Detector for Never {
    fn matches(&self, _input: &[u8], _limit: u32) -> bool {
        false
    }

    fn name(&self) -> &str {
        "Never"
    }
}

/// Fixed byte sequence at a fixed offset.
///
/// This is the detector behind signatures declared in configuration.
///
/// # Examples
///
/// ```
/// use magictree_core::{Detector, Signature};
///
/// let fits_header = Signature::new(0, b"SIMPLE  =".to_vec());
/// assert!(fits_header.matches(b"SIMPLE  =   T", 3072));
/// assert!(!fits_header.matches(b"SIMPLE", 3072));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    offset: usize,
    magic: Vec<u8>,
}

impl Signature {
    /// Create a signature matching `magic` at byte position `offset`.
    ///
    /// An empty `magic` never matches.
    pub fn new(offset: usize, magic: Vec<u8>) -> Self {
        Self { offset, magic }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn magic(&self) -> &[u8] {
        &self.magic
    }
}

impl Detector for Signature {
    fn matches(&self, input: &[u8], _limit: u32) -> bool {
        !self.magic.is_empty()
            && input
                .get(self.offset..)
                .is_some_and(|tail| tail.starts_with(&self.magic))
    }

    fn name(&self) -> &str {
        "Signature"
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: String = self.magic.iter().map(|b| format!("{b:02x}")).collect();
        f.debug_struct("Signature")
            .field("offset", &self.offset)
            .field("magic", &hex)
            .finish()
    }
}

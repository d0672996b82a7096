//! Format identity: identifier, extension, aliases and the parent link.

use std::fmt;
use std::sync::Arc;

/// Identifier of the tree root. Every input is at least this.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// The result of a detection: one node's identity in the format tree.
///
/// Several nodes may share an identifier (both QuickTime variants are
/// `video/quicktime`), so compare identities with [`MimeType::is`] or
/// [`Arc::ptr_eq`] rather than by value.
pub struct MimeType {
    identifier: String,
    extension: String,
    aliases: Vec<String>,
    parent: Option<Arc<MimeType>>,
}

impl MimeType {
    pub(crate) fn new(identifier: String, extension: String) -> Self {
        Self {
            identifier,
            extension,
            aliases: Vec::new(),
            parent: None,
        }
    }

    /// Record an alternative identifier. Duplicates and the identifier
    /// itself are ignored.
    pub(crate) fn push_alias(&mut self, alias: String) {
        if alias != self.identifier && !self.aliases.contains(&alias) {
            self.aliases.push(alias);
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Arc<MimeType>) {
        self.parent = Some(parent);
    }

    /// Canonical MIME string, e.g. `application/gzip`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Preferred file extension including the leading dot. May be empty.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Alternative identifiers, in declaration order.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The node this one was attached under. `None` for a root.
    pub fn parent(&self) -> Option<&Arc<MimeType>> {
        self.parent.as_ref()
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            next: self.parent.as_deref(),
        }
    }

    /// Whether `candidate` names this format: exact, case-sensitive
    /// comparison against the identifier and every alias.
    ///
    /// # Examples
    ///
    /// ```
    /// use magictree_core::Registry;
    ///
    /// let registry = Registry::with_defaults();
    /// let gzip = registry.detect(&[0x1f, 0x8b, 0x08]);
    /// assert!(gzip.is("application/gzip"));
    /// assert!(gzip.is("application/x-gzip"));
    /// assert!(!gzip.is("Application/Gzip"));
    /// ```
    pub fn is(&self, candidate: &str) -> bool {
        self.identifier == candidate || self.aliases.iter().any(|alias| alias == candidate)
    }

    /// Whether this format is `candidate` or descends from it.
    pub fn is_a(&self, candidate: &str) -> bool {
        self.is(candidate) || self.ancestors().any(|ancestor| ancestor.is(candidate))
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

impl fmt::Debug for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MimeType")
            .field("identifier", &self.identifier)
            .field("extension", &self.extension)
            .field("aliases", &self.aliases)
            .field("parent", &self.parent.as_ref().map(|p| p.identifier()))
            .finish()
    }
}

/// Iterator returned by [`MimeType::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a MimeType>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a MimeType;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

/// Whether `s` equals any of `candidates`, exactly and case-sensitively.
pub fn equals_any(s: &str, candidates: &[&str]) -> bool {
    candidates.iter().any(|candidate| *candidate == s)
}

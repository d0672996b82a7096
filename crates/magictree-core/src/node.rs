//! Bottom-up construction of format subtrees.

use std::fmt;
use std::sync::Arc;

use crate::detector::{Always, Detector, Never};
use crate::mime::{MimeType, OCTET_STREAM};

/// A format together with its detector and the more specific formats
/// tried once it matched.
///
/// Nodes are built leaves first and handed to
/// [`Registry::new`](crate::Registry::new) or
/// [`Registry::extend_with`](crate::Registry::extend_with); children are
/// tried in the order they were added.
///
/// ```
/// use magictree_core::Node;
/// use magictree_magic::archive;
///
/// let ar = Node::new("application/x-archive", ".a", archive::ar)
///     .with_children([Node::new(
///         "application/vnd.debian.binary-package",
///         ".deb",
///         archive::deb,
///     )])
///     .alias(["application/x-unix-archive"]);
/// assert_eq!(ar.children().len(), 1);
/// ```
pub struct Node {
    pub(crate) mime: MimeType,
    pub(crate) detector: Arc<dyn Detector>,
    pub(crate) children: Vec<Node>,
}

impl Node {
    pub fn new(
        identifier: impl Into<String>,
        extension: impl Into<String>,
        detector: impl Detector + 'static,
    ) -> Self {
        Self::from_shared(identifier, extension, Arc::new(detector))
    }

    /// Like [`Node::new`] with a detector that is already shared.
    pub fn from_shared(
        identifier: impl Into<String>,
        extension: impl Into<String>,
        detector: Arc<dyn Detector>,
    ) -> Self {
        Self {
            mime: MimeType::new(identifier.into(), extension.into()),
            detector,
            children: Vec::new(),
        }
    }

    /// `application/octet-stream` with an always-true detector.
    pub fn root() -> Self {
        Self::new(OCTET_STREAM, "", Always)
    }

    /// `application/octet-stream` with an always-false detector.
    pub fn failure() -> Self {
        Self::new(OCTET_STREAM, "", Never)
    }

    /// Append children, keeping any already present first.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Add alternative identifiers.
    pub fn alias<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for alias in aliases {
            self.mime.push_alias(alias.into());
        }
        self
    }

    pub fn identifier(&self) -> &str {
        self.mime.identifier()
    }

    pub fn extension(&self) -> &str {
        self.mime.extension()
    }

    pub fn aliases(&self) -> &[String] {
        self.mime.aliases()
    }

    pub fn detector(&self) -> &dyn Detector {
        self.detector.as_ref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("identifier", &self.mime.identifier())
            .field("extension", &self.mime.extension())
            .field("detector", &self.detector.name())
            .field("children", &self.children)
            .finish()
    }
}

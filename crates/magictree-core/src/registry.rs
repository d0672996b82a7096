//! The shared, extensible format tree.
//!
//! A [`Registry`] owns one [`Tree`] behind a reader/writer lock. Detection
//! takes the shared side for the whole traversal; [`Registry::extend`]
//! takes the exclusive side, so every detection observes the tree either
//! entirely before or entirely after an extension.
//!
//! Build once (usually [`Registry::with_defaults`] or
//! [`Registry::from_config`]), share by reference or `Arc`, extend as
//! needed.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace};

use crate::catalog;
use crate::config::{Config, ConfigError, DEFAULT_READ_LIMIT};
use crate::detector::Detector;
use crate::error::{DetectError, RegistryError};
use crate::mime::MimeType;
use crate::node::Node;
use crate::tree::{Entry, Tree};

/// Stand-alone tree whose root is the failure sentinel. Never locked.
static FAILURE: LazyLock<Tree> = LazyLock::new(|| Tree::new(Node::failure()));

/// Thread-safe format tree with a configurable read limit.
///
/// # Examples
///
/// ```
/// use magictree_core::Registry;
///
/// let registry = Registry::with_defaults();
/// let mime = registry.detect(b"\x89PNG\r\n\x1a\n");
/// assert_eq!(mime.identifier(), "image/png");
/// assert_eq!(mime.extension(), ".png");
/// ```
pub struct Registry {
    tree: RwLock<Tree>,
    read_limit: AtomicU32,
}

impl Registry {
    /// A registry over `root` and its subtree.
    pub fn new(root: Node) -> Self {
        Self {
            tree: RwLock::new(Tree::new(root)),
            read_limit: AtomicU32::new(DEFAULT_READ_LIMIT),
        }
    }

    /// A registry over the built-in catalog.
    pub fn with_defaults() -> Self {
        Self::new(catalog::root())
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The built-in catalog plus every signature of `config`, with the
    /// configured read limit.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let registry = Self::builder().with_defaults().with_config(config)?.build()?;
        debug!(
            signatures = config.signatures.len(),
            read_limit = config.read_limit,
            nodes = registry.len(),
            "registry built from config"
        );
        Ok(registry)
    }

    /// The failure sentinel: `application/octet-stream`, no parent, whose
    /// detector never matches. Obtained without taking any lock.
    pub fn failure() -> Arc<MimeType> {
        Arc::clone(FAILURE.root())
    }

    fn read(&self) -> RwLockReadGuard<'_, Tree> {
        // Extensions never leave the tree half-built, so a poisoned lock
        // still guards a consistent tree.
        self.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tree> {
        self.tree.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // Detection
    // ========================================================================

    /// Detect `input` using the registry's read limit.
    pub fn detect(&self, input: &[u8]) -> Arc<MimeType> {
        self.detect_with_limit(input, self.limit())
    }

    /// Detect `input`, letting detectors see at most `limit` bytes.
    ///
    /// Total: always returns a node, at worst the root.
    pub fn detect_with_limit(&self, input: &[u8], limit: u32) -> Arc<MimeType> {
        let mime = Arc::clone(self.read().descend(input, limit));
        trace!(mime = %mime, len = input.len(), limit, "detected");
        mime
    }

    /// Read up to the read limit from `reader` and detect it.
    ///
    /// Short reads are retried until end of input or the limit.
    pub fn detect_reader<R: Read>(&self, reader: R) -> Result<Arc<MimeType>, DetectError> {
        let limit = self.limit();
        let mut head = Vec::with_capacity(usize::try_from(limit).unwrap_or(0).min(64 * 1024));
        reader
            .take(u64::from(limit))
            .read_to_end(&mut head)
            .map_err(|source| DetectError::Read { source })?;
        Ok(self.detect_with_limit(&head, limit))
    }

    /// Open `path` and detect its leading bytes.
    pub fn detect_file(&self, path: impl AsRef<Path>) -> Result<Arc<MimeType>, DetectError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DetectError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.detect_reader(file)
    }

    // ========================================================================
    // Extension
    // ========================================================================

    /// Append a new format as the last child of the first node (breadth
    /// first) whose identifier is `parent`.
    ///
    /// Fails without changing the tree when no such node exists. New
    /// children are tried after the existing ones, so a format added under
    /// the root is only reached by input that `text/plain` rejects.
    pub fn extend<I, S>(
        &self,
        parent: &str,
        detector: impl Detector + 'static,
        identifier: impl Into<String>,
        extension: impl Into<String>,
        aliases: I,
    ) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extend_with(parent, Node::new(identifier, extension, detector).alias(aliases))
    }

    /// Append a whole subtree as the last child of `parent`.
    pub fn extend_with(&self, parent: &str, node: Node) -> Result<(), RegistryError> {
        let mut tree = self.write();
        let Some(parent_id) = tree.find(parent) else {
            debug!(parent, identifier = node.identifier(), "extension parent not found");
            return Err(RegistryError::ParentNotFound {
                parent: parent.to_string(),
            });
        };
        debug!(
            parent,
            identifier = node.identifier(),
            detector = node.detector().name(),
            "extending tree"
        );
        tree.append(parent_id, node);
        Ok(())
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// First node (breadth first) whose canonical identifier is `identifier`.
    pub fn lookup(&self, identifier: &str) -> Option<Arc<MimeType>> {
        let tree = self.read();
        tree.find(identifier).and_then(|id| tree.get(id)).cloned()
    }

    /// Every node in declaration order, with its depth.
    pub fn supported(&self) -> Vec<Entry> {
        self.read().walk()
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Always `false`: a registry has at least its root.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Depth of the deepest node.
    pub fn depth(&self) -> usize {
        self.read().depth()
    }

    pub fn root(&self) -> Arc<MimeType> {
        Arc::clone(self.read().root())
    }

    /// Bytes read by [`detect`](Self::detect), [`detect_reader`](Self::detect_reader)
    /// and [`detect_file`](Self::detect_file).
    pub fn limit(&self) -> u32 {
        self.read_limit.load(Ordering::Relaxed)
    }

    pub fn set_limit(&self, limit: u32) {
        self.read_limit.store(limit, Ordering::Relaxed);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("tree", &*self.read())
            .field("read_limit", &self.limit())
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for a [`Registry`] with a custom root, read limit or extra
/// formats.
///
/// # Examples
///
/// ```
/// use magictree_core::{Node, Registry, Signature};
///
/// let registry = Registry::builder()
///     .with_defaults()
///     .read_limit(512)
///     .extend(
///         "application/octet-stream",
///         Node::new("application/x-custom", ".cst", Signature::new(0, b"CST1".to_vec())),
///     )
///     .build()
///     .unwrap();
/// assert_eq!(registry.limit(), 512);
/// assert_eq!(registry.detect(b"CST1\x00\x00").identifier(), "application/x-custom");
/// ```
pub struct RegistryBuilder {
    root: Option<Node>,
    read_limit: u32,
    extensions: Vec<(String, Node)>,
}

impl RegistryBuilder {
    fn new() -> Self {
        Self {
            root: None,
            read_limit: DEFAULT_READ_LIMIT,
            extensions: Vec::new(),
        }
    }

    /// Use the built-in catalog as the tree.
    pub fn with_defaults(&mut self) -> &mut Self {
        self.root(catalog::root())
    }

    /// Use `root` as the tree. Without this (or
    /// [`with_defaults`](Self::with_defaults)) the tree is a bare root.
    pub fn root(&mut self, root: Node) -> &mut Self {
        self.root = Some(root);
        self
    }

    pub fn read_limit(&mut self, limit: u32) -> &mut Self {
        self.read_limit = limit;
        self
    }

    /// Queue `node` to be appended under `parent` once the tree is built.
    /// Extensions are applied in the order they were queued.
    pub fn extend(&mut self, parent: impl Into<String>, node: Node) -> &mut Self {
        self.extensions.push((parent.into(), node));
        self
    }

    /// Take the read limit and queue every signature from `config`.
    pub fn with_config(&mut self, config: &Config) -> Result<&mut Self, ConfigError> {
        config.validate()?;
        self.read_limit = config.read_limit;
        for signature in &config.signatures {
            let node = signature.to_node()?;
            self.extensions.push((signature.parent.clone(), node));
        }
        Ok(self)
    }

    /// Produce a [`Registry`], applying queued extensions in order.
    ///
    /// Drains the builder's root and extensions via [`std::mem::take`], so a
    /// second `build()` without reconfiguring yields a bare root.
    pub fn build(&mut self) -> Result<Registry, RegistryError> {
        let root = self.root.take().unwrap_or_else(Node::root);
        let registry = Registry::new(root);
        registry.set_limit(self.read_limit);
        for (parent, node) in std::mem::take(&mut self.extensions) {
            registry.extend_with(&parent, node)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};
    use std::thread;

    use super::*;
    use crate::detector::{Always, Signature};

    fn starts_with(magic: &'static [u8]) -> impl Detector + 'static {
        move |input: &[u8], _limit: u32| input.starts_with(magic)
    }

    fn shape(registry: &Registry) -> Vec<(usize, String)> {
        registry
            .supported()
            .into_iter()
            .map(|entry| (entry.depth, entry.mime.identifier().to_string()))
            .collect()
    }

    // ---- Detection ----

    #[test]
    fn test_gzip_respects_limit() {
        let registry = Registry::with_defaults();
        let gzip = [0x1F, 0x8B];
        assert_eq!(
            registry.detect_with_limit(&gzip, 2).identifier(),
            "application/gzip"
        );
        assert_eq!(
            registry.detect_with_limit(&gzip, 0).identifier(),
            "application/octet-stream"
        );
        assert_eq!(
            registry.detect_with_limit(&gzip, 1).identifier(),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_empty_input_is_root() {
        let registry = Registry::with_defaults();
        let mime = registry.detect(b"");
        assert!(Arc::ptr_eq(&mime, &registry.root()));
    }

    #[test]
    fn test_detection_is_deterministic() {
        let registry = Registry::with_defaults();
        let input = b"%PDF-1.4\n";
        let first = registry.detect(input);
        let second = registry.detect(input);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_order_sensitivity() {
        let registry = Registry::new(Node::root().with_children([
            Node::new("first", "", Always),
            Node::new("second", "", Always).with_children([Node::new("deeper", "", Always)]),
        ]));
        assert_eq!(registry.detect(b"x").identifier(), "first");
    }

    #[test]
    fn test_no_backtracking() {
        let registry = Registry::new(Node::root().with_children([
            Node::new("a", "", starts_with(b"P")),
            Node::new("b", "", starts_with(b"P"))
                .with_children([Node::new("c", "", starts_with(b"PC"))]),
        ]));
        assert_eq!(registry.detect(b"PC").identifier(), "a");
    }

    #[test]
    fn test_detected_parent_chain() {
        let registry = Registry::with_defaults();
        let deb = registry.detect(b"!<arch>\ndebian-binary   ");
        assert_eq!(deb.identifier(), "application/vnd.debian.binary-package");
        assert!(deb.is_a("application/x-archive"));
        assert!(deb.is_a("application/x-unix-archive"));
    }

    // ---- Readers and files ----

    #[test]
    fn test_detect_reader_reads_up_to_limit() {
        let registry = Registry::with_defaults();
        registry.set_limit(2);
        let mime = registry.detect_reader(Cursor::new(vec![0x1F, 0x8B, 0x08, 0x00])).unwrap();
        assert_eq!(mime.identifier(), "application/gzip");

        registry.set_limit(0);
        let mime = registry.detect_reader(Cursor::new(vec![0x1F, 0x8B])).unwrap();
        assert_eq!(mime.identifier(), "application/octet-stream");
    }

    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let Some((&first, rest)) = self.0.split_first() else {
                return Ok(0);
            };
            if buf.is_empty() {
                return Ok(0);
            }
            buf[0] = first;
            self.0 = rest;
            Ok(1)
        }
    }

    #[test]
    fn test_detect_reader_retries_short_reads() {
        let registry = Registry::with_defaults();
        let mime = registry.detect_reader(Trickle(b"%PDF-1.7\n")).unwrap();
        assert_eq!(mime.identifier(), "application/pdf");
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    #[test]
    fn test_read_failure_yields_sentinel() {
        let registry = Registry::with_defaults();
        let err = registry.detect_reader(Broken).unwrap_err();
        assert!(matches!(err, DetectError::Read { .. }));

        let sentinel = err.mime();
        assert_eq!(sentinel.identifier(), "application/octet-stream");
        assert!(!Arc::ptr_eq(&sentinel, &registry.root()));
        assert!(Arc::ptr_eq(&sentinel, &Registry::failure()));
    }

    #[test]
    fn test_detect_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.gif");
        std::fs::write(&path, b"GIF89a\x01\x00\x01\x00").unwrap();

        let registry = Registry::with_defaults();
        assert_eq!(registry.detect_file(&path).unwrap().identifier(), "image/gif");

        let err = registry.detect_file(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, DetectError::Open { .. }));
        assert_eq!(err.io_error().kind(), io::ErrorKind::NotFound);
    }

    // ---- Extension ----

    #[test]
    fn test_extend_then_detect() {
        let registry = Registry::with_defaults();
        let before = registry.len();
        registry
            .extend(
                "application/octet-stream",
                starts_with(b"MTRE"),
                "application/x-magictree-test",
                ".mtt",
                ["application/x-mtt"],
            )
            .unwrap();

        assert_eq!(registry.len(), before + 1);
        let mime = registry.detect(b"MTRE\x00\x01");
        assert_eq!(mime.identifier(), "application/x-magictree-test");
        assert_eq!(mime.extension(), ".mtt");
        assert!(mime.is("application/x-mtt"));
        assert_eq!(mime.parent().unwrap().identifier(), "application/octet-stream");
    }

    #[test]
    fn test_extend_appends_after_existing_children() {
        let registry = Registry::with_defaults();
        // Text input: the new child of text/plain is tried after html, json ...
        registry
            .extend(
                "text/plain",
                starts_with(b"{"),
                "text/x-brace",
                "",
                Vec::<String>::new(),
            )
            .unwrap();
        assert_eq!(registry.detect(b"{\"a\": 1}").identifier(), "application/json");
        assert_eq!(registry.detect(b"{ not json").identifier(), "text/x-brace");
    }

    #[test]
    fn test_extend_under_nested_parent() {
        let registry = Registry::with_defaults();
        registry
            .extend(
                "application/zip",
                |input: &[u8], _limit: u32| input.windows(8).any(|w| w == b"custom/x"),
                "application/x-custom-zip",
                ".czip",
                Vec::<String>::new(),
            )
            .unwrap();
        let mut zip = b"PK\x03\x04".to_vec();
        zip.resize(30, 0);
        zip.extend_from_slice(b"custom/x");
        assert_eq!(registry.detect(&zip).identifier(), "application/x-custom-zip");
    }

    #[test]
    fn test_failed_extend_leaves_tree_unchanged() {
        let registry = Registry::with_defaults();
        let before = shape(&registry);

        let err = registry
            .extend(
                "application/x-does-not-exist",
                Always,
                "application/x-orphan",
                "",
                Vec::<String>::new(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::ParentNotFound {
                parent: "application/x-does-not-exist".to_string()
            }
        );
        assert_eq!(shape(&registry), before);
    }

    #[test]
    fn test_extend_by_alias_is_rejected() {
        let registry = Registry::with_defaults();
        let err = registry
            .extend("application/x-gzip", Always, "x/y", "", Vec::<String>::new())
            .unwrap_err();
        assert!(matches!(err, RegistryError::ParentNotFound { .. }));
    }

    #[test]
    fn test_concurrent_detect_and_extend() {
        let registry = Arc::new(Registry::with_defaults());
        let readers: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let mime = registry.detect(b"NEWF\x00");
                        assert!(
                            mime.identifier() == "application/octet-stream"
                                || mime.identifier() == "application/x-new-format"
                        );
                    }
                })
            })
            .collect();

        registry
            .extend(
                "application/octet-stream",
                starts_with(b"NEWF"),
                "application/x-new-format",
                ".new",
                Vec::<String>::new(),
            )
            .unwrap();

        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(registry.detect(b"NEWF\x00").identifier(), "application/x-new-format");
    }

    // ---- Introspection ----

    #[test]
    fn test_lookup_is_breadth_first_and_exact() {
        let registry = Registry::with_defaults();
        let json = registry.lookup("application/json").unwrap();
        assert_eq!(json.extension(), ".json");
        assert!(registry.lookup("application/x-gzip").is_none());
        assert!(registry.lookup("nope/nope").is_none());
    }

    #[test]
    fn test_supported_starts_at_root() {
        let registry = Registry::with_defaults();
        let entries = registry.supported();
        assert_eq!(entries.len(), registry.len());
        assert_eq!(entries[0].depth, 0);
        assert_eq!(entries[0].mime.identifier(), "application/octet-stream");
        assert_eq!(
            entries.last().map(|entry| entry.mime.identifier()),
            Some("application/warc")
        );
        assert_eq!(registry.depth(), 3);
    }

    // ---- Builder tests ----

    #[test]
    fn test_builder_default_is_bare_root() {
        let registry = Registry::builder().build().unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.limit(), DEFAULT_READ_LIMIT);
        assert_eq!(registry.detect(b"\x1F\x8B").identifier(), "application/octet-stream");
    }

    #[test]
    fn test_builder_applies_extensions_in_order() {
        let registry = Registry::builder()
            .extend("application/octet-stream", Node::new("a/a", "", starts_with(b"A")))
            .extend("a/a", Node::new("a/b", "", starts_with(b"AB")))
            .build()
            .unwrap();
        assert_eq!(registry.detect(b"ABC").identifier(), "a/b");
        assert_eq!(registry.detect(b"AC").identifier(), "a/a");
    }

    #[test]
    fn test_builder_reports_unknown_parent() {
        let err = Registry::builder()
            .extend("missing/parent", Node::new("a/a", "", Always))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::ParentNotFound { parent } if parent == "missing/parent"));
    }

    #[test]
    fn test_builder_build_drains() {
        let mut builder = Registry::builder();
        builder.with_defaults().read_limit(10);
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert!(first.len() > 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second.limit(), 10);
    }

    // ---- Config ----

    #[test]
    fn test_from_config() {
        let config = Config::from_toml_str(
            r#"
read_limit = 128

[[signatures]]
identifier = "application/x-custom"
extension = ".cst"
magic = "43 53 54 31"

[[signatures]]
parent = "application/x-custom"
identifier = "application/x-custom-v2"
offset = 4
magic = "02"
"#,
        )
        .unwrap();
        let registry = Registry::from_config(&config).unwrap();
        assert_eq!(registry.limit(), 128);
        assert_eq!(registry.detect(b"CST1\x01").identifier(), "application/x-custom");
        assert_eq!(registry.detect(b"CST1\x02").identifier(), "application/x-custom-v2");
        assert_eq!(registry.detect(b"\x1F\x8B").identifier(), "application/gzip");
    }

    #[test]
    fn test_from_config_unknown_parent() {
        let config = Config {
            signatures: vec![crate::config::SignatureConfig {
                parent: "application/x-missing".to_string(),
                identifier: "application/x-child".to_string(),
                extension: String::new(),
                aliases: Vec::new(),
                offset: 0,
                magic: "00".to_string(),
            }],
            ..Config::default()
        };
        let err = Registry::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Registry(RegistryError::ParentNotFound { .. })
        ));
    }

    #[test]
    fn test_signature_extension() {
        let registry = Registry::with_defaults();
        registry
            .extend(
                "application/octet-stream",
                Signature::new(0, b"MAGI".to_vec()),
                "application/x-magi",
                ".magi",
                Vec::<String>::new(),
            )
            .unwrap();
        assert_eq!(registry.detect(b"MAGI\x00").identifier(), "application/x-magi");
    }
}

//! Arena storage for the format hierarchy and the descent algorithm.
//!
//! Nodes live in a flat `Vec`, children are indices into it. A [`Tree`] is
//! only ever grown: nodes are appended under an existing parent and never
//! removed or reordered, so a [`NodeId`] stays valid for the lifetime of
//! the tree.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::detector::Detector;
use crate::mime::MimeType;
use crate::node::Node;

/// Index of a node inside one [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

struct Slot {
    mime: Arc<MimeType>,
    detector: Arc<dyn Detector>,
    children: Vec<NodeId>,
    depth: usize,
}

/// One row of a depth-first listing, see [`Tree::walk`].
#[derive(Debug, Clone)]
pub struct Entry {
    /// Distance from the root (root is 0).
    pub depth: usize,
    pub mime: Arc<MimeType>,
}

/// The format hierarchy.
pub struct Tree {
    slots: Vec<Slot>,
}

impl Tree {
    /// Flatten `root` and its descendants into a new tree.
    pub fn new(root: Node) -> Self {
        let mut tree = Self {
            slots: Vec::with_capacity(root.count()),
        };
        tree.insert(root, None);
        tree
    }

    fn insert(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let Node {
            mut mime,
            detector,
            children,
        } = node;

        let depth = match parent {
            Some(parent) => {
                let slot = &self.slots[parent.0];
                mime.set_parent(Arc::clone(&slot.mime));
                slot.depth + 1
            }
            None => 0,
        };

        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            mime: Arc::new(mime),
            detector,
            children: Vec::with_capacity(children.len()),
            depth,
        });
        if let Some(parent) = parent {
            self.slots[parent.0].children.push(id);
        }

        for child in children {
            self.insert(child, Some(id));
        }
        id
    }

    /// Attach `node` (and its subtree) as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        assert!(parent.0 < self.slots.len(), "unknown node {parent:?}");
        self.insert(node, Some(parent))
    }

    pub fn root(&self) -> &Arc<MimeType> {
        &self.slots[NodeId::ROOT.0].mime
    }

    pub fn get(&self, id: NodeId) -> Option<&Arc<MimeType>> {
        self.slots.get(id.0).map(|slot| &slot.mime)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.0)
            .map_or(&[], |slot| slot.children.as_slice())
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Depth of the deepest node (a lone root has depth 0).
    pub fn depth(&self) -> usize {
        self.slots.iter().map(|slot| slot.depth).max().unwrap_or(0)
    }

    /// First node, in breadth-first order from the root, whose canonical
    /// identifier equals `identifier`. Aliases are not considered.
    pub fn find(&self, identifier: &str) -> Option<NodeId> {
        let mut queue = VecDeque::from([NodeId::ROOT]);
        while let Some(id) = queue.pop_front() {
            let slot = &self.slots[id.0];
            if slot.mime.identifier() == identifier {
                return Some(id);
            }
            queue.extend(slot.children.iter().copied());
        }
        None
    }

    /// Walk from the root, at each level taking the first child whose
    /// detector accepts `input`, until no child does. The root's own
    /// detector is not consulted.
    ///
    /// `input` is cut to at most `limit` bytes first; every detector sees
    /// the same cut input and the same `limit`. A matched node's later
    /// siblings are never revisited.
    pub fn descend(&self, input: &[u8], limit: u32) -> &Arc<MimeType> {
        let input = clamp(input, limit);
        let mut current = NodeId::ROOT;
        'levels: loop {
            for &child in &self.slots[current.0].children {
                if self.slots[child.0].detector.matches(input, limit) {
                    current = child;
                    continue 'levels;
                }
            }
            return &self.slots[current.0].mime;
        }
    }

    /// Every node in depth-first pre-order (the order detectors are
    /// declared in), with its depth.
    pub fn walk(&self) -> Vec<Entry> {
        let mut entries = Vec::with_capacity(self.slots.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            let slot = &self.slots[id.0];
            entries.push(Entry {
                depth: slot.depth,
                mime: Arc::clone(&slot.mime),
            });
            stack.extend(slot.children.iter().rev().copied());
        }
        entries
    }
}

/// The first `limit` bytes of `input`.
pub(crate) fn clamp(input: &[u8], limit: u32) -> &[u8] {
    let end = usize::try_from(limit).map_or(input.len(), |limit| limit.min(input.len()));
    &input[..end]
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root().identifier())
            .field("len", &self.len())
            .finish()
    }
}

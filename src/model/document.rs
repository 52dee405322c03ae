//! Design document tree, stored as an index-based arena.
//!
//! A fetched Figma document is an arbitrarily deep node tree. Rather than
//! walking a recursive structure with recursive functions, the tree is
//! flattened into a `NodeArena` where children are referenced by index. All
//! traversals then run over an explicit work stack, so document depth is
//! bounded by heap, not call stack, and partial trees are easy to build in
//! tests.
//!
//! The arena is owned exclusively by a single traversal call; no node is
//! shared or mutated across calls.

/// Index of a node inside a `NodeArena`.
pub type NodeId = usize;

/// Well-known node type tags. The vocabulary is open; unknown tags pass
/// through untouched.
pub mod node_type {
    pub const DOCUMENT: &str = "DOCUMENT";
    pub const CANVAS: &str = "CANVAS";
    pub const FRAME: &str = "FRAME";
    pub const GROUP: &str = "GROUP";
    pub const TEXT: &str = "TEXT";
    pub const RECTANGLE: &str = "RECTANGLE";
    pub const INSTANCE: &str = "INSTANCE";
}

/// Absolute bounding box of a node on its canvas.
///
/// Individual fields are optional because upstream omits them for some node
/// kinds; defaults are applied at frame/component assembly, not here.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// One node of a design document tree.
#[derive(Clone, Debug)]
pub struct DocumentNode {
    pub id: String,
    /// Type tag from an open vocabulary (CANVAS, FRAME, GROUP, TEXT, ...).
    pub node_type: String,
    pub name: String,
    pub bounding_box: Option<BoundingBox>,
    /// Ordered children, by arena index.
    pub children: Vec<NodeId>,
}

/// Flat storage for a document tree with index-based child references.
///
/// The first node pushed is the root.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<DocumentNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a node and returns its index.
    pub fn push(&mut self, node: DocumentNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Records `child` as the next child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent].children.push(child);
    }

    pub fn get(&self, id: NodeId) -> &DocumentNode {
        &self.nodes[id]
    }

    /// Index of the root node, if the arena is non-empty.
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(0)
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

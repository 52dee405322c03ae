//! Document tree traversal: frame and component extraction.
//!
//! Both walks run over the index-based `NodeArena` with explicit work lists,
//! so document depth never grows the call stack.
//!
//! Frame extraction rule: a CANVAS node contributes only its *direct*
//! children of type FRAME, and its subtree is not searched any further; every
//! other node is searched recursively for canvases at any depth. The net
//! effect is that a FRAME nested inside a GROUP under a canvas is not
//! extracted. That asymmetry is a known inconsistency inherited from the
//! upstream behavior and is preserved deliberately; do not "fix" it without
//! product sign-off.

use std::collections::VecDeque;

use crate::{
    model::{
        document::{node_type, BoundingBox, DocumentNode, NodeArena, NodeId},
        frame::Component,
    },
    service::figma::wire::WireNode,
};

/// Node types that always qualify as interactive components.
const COMPONENT_TYPES: [&str; 3] = [node_type::TEXT, node_type::RECTANGLE, node_type::INSTANCE];

/// Name substrings that mark a node as interactive regardless of its type.
const INTERACTIVE_NAME_HINTS: [&str; 4] = ["button", "input", "click", "link"];

const UNNAMED_COMPONENT: &str = "Unnamed Component";

/// Flattens a wire document tree into an arena.
///
/// Runs breadth-first with an explicit queue; sibling order is preserved in
/// each node's child list. The returned arena's root is the wire root.
pub fn build_arena(root: WireNode) -> NodeArena {
    let mut arena = NodeArena::new();
    let mut queue: VecDeque<(WireNode, Option<NodeId>)> = VecDeque::new();
    queue.push_back((root, None));

    while let Some((wire, parent)) = queue.pop_front() {
        let children = wire.children.unwrap_or_default();

        let id = arena.push(DocumentNode {
            id: wire.id,
            node_type: wire.node_type,
            name: wire.name.unwrap_or_default(),
            bounding_box: wire.absolute_bounding_box.map(|bounds| BoundingBox {
                x: bounds.x,
                y: bounds.y,
                width: bounds.width,
                height: bounds.height,
            }),
            children: Vec::new(),
        });

        if let Some(parent) = parent {
            arena.add_child(parent, id);
        }

        for child in children {
            queue.push_back((child, Some(id)));
        }
    }

    arena
}

/// Collects the frame nodes of a document.
///
/// Returns arena indices of FRAME nodes that are direct children of a CANVAS
/// node, in depth-first document order.
pub fn extract_frames(arena: &NodeArena) -> Vec<NodeId> {
    let mut frames = Vec::new();
    let Some(root) = arena.root() else {
        return frames;
    };

    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let node = arena.get(id);

        if node.node_type == node_type::CANVAS {
            // Only top-level frames of this canvas count; the rest of the
            // canvas subtree is intentionally not searched.
            for &child in &node.children {
                if arena.get(child).node_type == node_type::FRAME {
                    frames.push(child);
                }
            }
        } else {
            // Keep searching for canvases at any depth. Children are pushed
            // in reverse so the walk visits them in document order.
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    frames
}

/// Collects interactive components from a frame subtree.
///
/// Pre-order depth-first over the whole subtree, the frame node included. A
/// node qualifies by type (TEXT, RECTANGLE, INSTANCE) or by an interactive
/// hint in its name (case-insensitive substring). No deduplication; every
/// qualifying node is emitted once in traversal order.
pub fn extract_components(arena: &NodeArena, frame: NodeId) -> Vec<Component> {
    let mut components = Vec::new();

    let mut stack = vec![frame];
    while let Some(id) = stack.pop() {
        let node = arena.get(id);

        if qualifies_as_component(node) {
            components.push(to_component(node));
        }

        for &child in node.children.iter().rev() {
            stack.push(child);
        }
    }

    components
}

fn qualifies_as_component(node: &DocumentNode) -> bool {
    if COMPONENT_TYPES.contains(&node.node_type.as_str()) {
        return true;
    }

    let name = node.name.to_ascii_lowercase();
    INTERACTIVE_NAME_HINTS.iter().any(|hint| name.contains(hint))
}

fn to_component(node: &DocumentNode) -> Component {
    let bounds = node.bounding_box.unwrap_or_default();

    Component {
        id: node.id.clone(),
        name: if node.name.is_empty() {
            UNNAMED_COMPONENT.to_string()
        } else {
            node.name.clone()
        },
        component_type: node.node_type.clone(),
        x: bounds.x.unwrap_or(0.0),
        y: bounds.y.unwrap_or(0.0),
        width: bounds.width.unwrap_or(0.0),
        height: bounds.height.unwrap_or(0.0),
    }
}

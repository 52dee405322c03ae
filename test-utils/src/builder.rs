//! Fluent builder for Figma document-tree JSON payloads.

use serde_json::{json, Value};

/// Builds one node of a document tree.
///
/// Only the fields the extraction pipeline reads are supported; everything
/// else the real API sends is noise the wire layer ignores anyway.
pub struct NodeBuilder {
    id: String,
    node_type: String,
    name: Option<String>,
    bounds: Option<(f64, f64, f64, f64)>,
    children: Vec<Value>,
}

impl NodeBuilder {
    pub fn new(node_type: &str, id: &str) -> Self {
        Self {
            id: id.to_string(),
            node_type: node_type.to_string(),
            name: None,
            bounds: None,
            children: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounds = Some((x, y, width, height));
        self
    }

    pub fn child(mut self, child: NodeBuilder) -> Self {
        self.children.push(child.build());
        self
    }

    pub fn build(self) -> Value {
        let mut node = json!({
            "id": self.id,
            "type": self.node_type,
        });

        if let Some(name) = self.name {
            node["name"] = json!(name);
        }
        if let Some((x, y, width, height)) = self.bounds {
            node["absoluteBoundingBox"] = json!({
                "x": x, "y": y, "width": width, "height": height,
            });
        }
        if !self.children.is_empty() {
            node["children"] = Value::Array(self.children);
        }

        node
    }
}

/// A DOCUMENT root wrapping the given children.
pub fn document(children: Vec<NodeBuilder>) -> Value {
    let mut root = NodeBuilder::new("DOCUMENT", "0:0");
    for child in children {
        root = root.child(child);
    }
    root.build()
}

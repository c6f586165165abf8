//! AST Snapshot - a normalized, serializable view of a parsed tree
//!
//! The snapshot captures node types, labels, ranges, per-kind attributes and children, so
//! each output format only has to deal with presentation. It is built by a
//! [`NodeVisitor`](crate::pratt::visitor::NodeVisitor): a fallback handles every node
//! generically and a few handlers add the attributes that matter for their kind.

use super::nodes::{AstNode, LiteralNode, NodeKind, NodeVariant};
use super::range::SourceRange;
use crate::pratt::visitor::NodeVisitor;
use serde::Serialize;
use std::collections::BTreeMap;

/// A snapshot of an AST node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstSnapshot {
    /// The type of node (e.g., "Binary", "Call", "TypeName")
    pub node_type: String,

    /// The operator, name, literal or tag of the node
    pub label: String,

    pub range: SourceRange,

    /// Additional attributes specific to the node type
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Child nodes in stored order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>, range: SourceRange) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            range,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of snapshots in this subtree, the root included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(AstSnapshot::size).sum::<usize>()
    }
}

fn generic_snapshot(visitor: &NodeVisitor<(), AstSnapshot>, node: &AstNode) -> AstSnapshot {
    let children = visitor.visit_children(&mut (), node);
    AstSnapshot::new(node.node_type(), node.display_label(), node.range().clone())
        .with_children(children)
}

/// The visitor that builds snapshots.
pub fn snapshot_visitor() -> NodeVisitor<(), AstSnapshot> {
    let mut visitor = NodeVisitor::with_fallback(|v, _, node| generic_snapshot(v, node));
    visitor
        .on_node(NodeVariant::Literal, |_, _, node| {
            let snapshot = AstSnapshot::new(node.node_type(), node.display_label(), node.range().clone());
            match node.payload::<LiteralNode>() {
                Some(literal) => snapshot.with_attribute("type", literal.value.type_name()),
                None => snapshot,
            }
        })
        .on_node(NodeVariant::Call, |v, _, node| {
            let snapshot = generic_snapshot(v, node);
            let arguments = snapshot.children.len().saturating_sub(1);
            snapshot.with_attribute("arguments", arguments.to_string())
        })
        .on_node(NodeVariant::Block, |v, _, node| {
            let snapshot = generic_snapshot(v, node);
            let label = format!("{} statements", snapshot.children.len());
            AstSnapshot { label, ..snapshot }
        })
        .on_node(NodeVariant::TypeName, |v, _, node| {
            let snapshot = generic_snapshot(v, node);
            match node.kind() {
                NodeKind::TypeName(type_name) if type_name.is_generic() => {
                    snapshot.with_attribute("generic", "true")
                }
                _ => snapshot,
            }
        });
    visitor
}

/// Create a snapshot of a node and all its descendants.
pub fn snapshot_node(node: &AstNode) -> AstSnapshot {
    snapshot_visitor().visit(&mut (), node)
}

//! AST node model
//!
//!     The tree produced by parselets. Every node is an [`AstNode`]: a [`NodeKind`] with its
//!     variant payload plus the [`SourceRange`] it was parsed from. Parents own their
//!     children outright (no sharing, no parent pointers, no cycles) and nodes are not
//!     mutated after construction; passes that rewrite the tree build new nodes.
//!
//!     See [range] for position tracking and [snapshot] for the serializable view of a tree
//!     used by the output formats.

pub mod nodes;
pub mod range;
pub mod snapshot;

pub use nodes::{
    AssignNode, AstNode, BinaryNode, BlockNode, CallNode, ConditionalNode, InvalidNode,
    LiteralNode, LiteralValue, NameNode, NodeKind, NodeVariant, PostfixNode, PrefixNode,
    TaggedNode, TypeNameNode, VariantPayload,
};
pub use range::{Position, SourceLocation, SourceRange};
pub use snapshot::{snapshot_node, AstSnapshot};

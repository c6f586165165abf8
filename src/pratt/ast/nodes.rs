//! Node kinds and their payloads
//!
//! The variant set is closed: hosts that need node kinds of their own use
//! [`NodeKind::Tagged`], which carries a host-chosen tag and children. Each variant's
//! payload is its own struct so the visitor framework can hand handlers the concrete
//! payload type (see [`VariantPayload`]).

use crate::pratt::ast::range::SourceRange;
use crate::pratt::symbol::Symbol;
use crate::pratt::token::Token;
use serde::Serialize;
use std::fmt;

/// The value of a literal node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl LiteralValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            LiteralValue::Number(_) => "number",
            LiteralValue::String(_) => "string",
            LiteralValue::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for LiteralValue {
    /// Strings are written back quoted and escaped, so the output lexes as the same literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::String(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        other => write!(f, "{}", other)?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiteralNode {
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixNode {
    pub operator: Symbol,
    pub operand: Box<AstNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostfixNode {
    pub operator: Symbol,
    pub operand: Box<AstNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryNode {
    pub left: Box<AstNode>,
    pub operator: Symbol,
    pub right: Box<AstNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallNode {
    pub function: Box<AstNode>,
    pub arguments: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalNode {
    pub condition: Box<AstNode>,
    pub then_branch: Box<AstNode>,
    pub else_branch: Box<AstNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignNode {
    pub target: String,
    pub value: Box<AstNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockNode {
    pub children: Vec<AstNode>,
}

/// A type name, generic when `arguments` is non-empty (`List<Int>`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeNameNode {
    pub name: String,
    pub arguments: Vec<AstNode>,
}

impl TypeNameNode {
    pub fn is_generic(&self) -> bool {
        !self.arguments.is_empty()
    }
}

/// A host-defined node kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedNode {
    pub tag: String,
    pub children: Vec<AstNode>,
}

/// Placeholder for input that could not be parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidNode {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node")]
pub enum NodeKind {
    Name(NameNode),
    Literal(LiteralNode),
    Prefix(PrefixNode),
    Postfix(PostfixNode),
    Binary(BinaryNode),
    Call(CallNode),
    Conditional(ConditionalNode),
    Assign(AssignNode),
    Block(BlockNode),
    TypeName(TypeNameNode),
    Tagged(TaggedNode),
    Invalid(InvalidNode),
}

/// The discriminant of a [`NodeKind`], used as the visitor dispatch key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeVariant {
    Name,
    Literal,
    Prefix,
    Postfix,
    Binary,
    Call,
    Conditional,
    Assign,
    Block,
    TypeName,
    Tagged,
    Invalid,
}

impl NodeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeVariant::Name => "Name",
            NodeVariant::Literal => "Literal",
            NodeVariant::Prefix => "Prefix",
            NodeVariant::Postfix => "Postfix",
            NodeVariant::Binary => "Binary",
            NodeVariant::Call => "Call",
            NodeVariant::Conditional => "Conditional",
            NodeVariant::Assign => "Assign",
            NodeVariant::Block => "Block",
            NodeVariant::TypeName => "TypeName",
            NodeVariant::Tagged => "Tagged",
            NodeVariant::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for NodeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKind {
    pub fn variant(&self) -> NodeVariant {
        match self {
            NodeKind::Name(_) => NodeVariant::Name,
            NodeKind::Literal(_) => NodeVariant::Literal,
            NodeKind::Prefix(_) => NodeVariant::Prefix,
            NodeKind::Postfix(_) => NodeVariant::Postfix,
            NodeKind::Binary(_) => NodeVariant::Binary,
            NodeKind::Call(_) => NodeVariant::Call,
            NodeKind::Conditional(_) => NodeVariant::Conditional,
            NodeKind::Assign(_) => NodeVariant::Assign,
            NodeKind::Block(_) => NodeVariant::Block,
            NodeKind::TypeName(_) => NodeVariant::TypeName,
            NodeKind::Tagged(_) => NodeVariant::Tagged,
            NodeKind::Invalid(_) => NodeVariant::Invalid,
        }
    }
}

/// A variant payload type that can be projected out of a [`NodeKind`].
pub trait VariantPayload: Sized + 'static {
    const VARIANT: NodeVariant;

    fn project(kind: &NodeKind) -> Option<&Self>;
}

macro_rules! variant_payload {
    ($($payload:ident => $variant:ident),* $(,)?) => {
        $(
            impl VariantPayload for $payload {
                const VARIANT: NodeVariant = NodeVariant::$variant;

                fn project(kind: &NodeKind) -> Option<&Self> {
                    match kind {
                        NodeKind::$variant(payload) => Some(payload),
                        _ => None,
                    }
                }
            }
        )*
    };
}

variant_payload! {
    NameNode => Name,
    LiteralNode => Literal,
    PrefixNode => Prefix,
    PostfixNode => Postfix,
    BinaryNode => Binary,
    CallNode => Call,
    ConditionalNode => Conditional,
    AssignNode => Assign,
    BlockNode => Block,
    TypeNameNode => TypeName,
    TaggedNode => Tagged,
    InvalidNode => Invalid,
}

/// A range-tagged tree node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AstNode {
    kind: NodeKind,
    range: SourceRange,
}

impl AstNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            range: SourceRange::default(),
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Name(NameNode { name: name.into() }))
    }

    pub fn literal(value: LiteralValue) -> Self {
        Self::new(NodeKind::Literal(LiteralNode { value }))
    }

    pub fn number(value: f64) -> Self {
        Self::literal(LiteralValue::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::literal(LiteralValue::String(value.into()))
    }

    pub fn boolean(value: bool) -> Self {
        Self::literal(LiteralValue::Boolean(value))
    }

    pub fn prefix(operator: Symbol, operand: AstNode) -> Self {
        Self::new(NodeKind::Prefix(PrefixNode {
            operator,
            operand: Box::new(operand),
        }))
    }

    pub fn postfix(operator: Symbol, operand: AstNode) -> Self {
        Self::new(NodeKind::Postfix(PostfixNode {
            operator,
            operand: Box::new(operand),
        }))
    }

    pub fn binary(left: AstNode, operator: Symbol, right: AstNode) -> Self {
        Self::new(NodeKind::Binary(BinaryNode {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    pub fn call(function: AstNode, arguments: Vec<AstNode>) -> Self {
        Self::new(NodeKind::Call(CallNode {
            function: Box::new(function),
            arguments,
        }))
    }

    pub fn conditional(condition: AstNode, then_branch: AstNode, else_branch: AstNode) -> Self {
        Self::new(NodeKind::Conditional(ConditionalNode {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }))
    }

    pub fn assign(target: impl Into<String>, value: AstNode) -> Self {
        Self::new(NodeKind::Assign(AssignNode {
            target: target.into(),
            value: Box::new(value),
        }))
    }

    pub fn block(children: Vec<AstNode>) -> Self {
        Self::new(NodeKind::Block(BlockNode { children }))
    }

    pub fn type_name(name: impl Into<String>, arguments: Vec<AstNode>) -> Self {
        Self::new(NodeKind::TypeName(TypeNameNode {
            name: name.into(),
            arguments,
        }))
    }

    pub fn tagged(tag: impl Into<String>, children: Vec<AstNode>) -> Self {
        Self::new(NodeKind::Tagged(TaggedNode {
            tag: tag.into(),
            children,
        }))
    }

    pub fn invalid(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Invalid(InvalidNode { text: text.into() }))
    }

    /// Rebind the node to `range`.
    pub fn with_range(mut self, range: SourceRange) -> Self {
        self.range = range;
        self
    }

    /// Rebind the node to the span from the start of `start` through the end of `end`.
    pub fn with_token_range(self, start: &Token, end: &Token) -> Self {
        let range = start.range.cover(&end.range);
        self.with_range(range)
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn range(&self) -> &SourceRange {
        &self.range
    }

    pub fn variant(&self) -> NodeVariant {
        self.kind.variant()
    }

    pub fn node_type(&self) -> &'static str {
        self.variant().as_str()
    }

    /// Project the payload of variant `N`, if this node is one.
    pub fn payload<N: VariantPayload>(&self) -> Option<&N> {
        N::project(&self.kind)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self.kind, NodeKind::Invalid(_))
    }

    /// A short human label: the name, literal, operator or tag of the node.
    pub fn display_label(&self) -> String {
        match &self.kind {
            NodeKind::Name(n) => n.name.clone(),
            NodeKind::Literal(l) => l.value.to_string(),
            NodeKind::Prefix(p) => p.operator.punctuator().to_string(),
            NodeKind::Postfix(p) => p.operator.punctuator().to_string(),
            NodeKind::Binary(b) => b.operator.punctuator().to_string(),
            NodeKind::Call(_) | NodeKind::Conditional(_) | NodeKind::Block(_) => String::new(),
            NodeKind::Assign(a) => a.target.clone(),
            NodeKind::TypeName(t) => t.name.clone(),
            NodeKind::Tagged(t) => t.tag.clone(),
            NodeKind::Invalid(i) => i.text.clone(),
        }
    }

    /// Direct children in stored order.
    pub fn children(&self) -> Vec<&AstNode> {
        match &self.kind {
            NodeKind::Name(_) | NodeKind::Literal(_) | NodeKind::Invalid(_) => Vec::new(),
            NodeKind::Prefix(p) => vec![p.operand.as_ref()],
            NodeKind::Postfix(p) => vec![p.operand.as_ref()],
            NodeKind::Binary(b) => vec![b.left.as_ref(), b.right.as_ref()],
            NodeKind::Call(c) => std::iter::once(c.function.as_ref())
                .chain(c.arguments.iter())
                .collect(),
            NodeKind::Conditional(c) => vec![
                c.condition.as_ref(),
                c.then_branch.as_ref(),
                c.else_branch.as_ref(),
            ],
            NodeKind::Assign(a) => vec![a.value.as_ref()],
            NodeKind::Block(b) => b.children.iter().collect(),
            NodeKind::TypeName(t) => t.arguments.iter().collect(),
            NodeKind::Tagged(t) => t.children.iter().collect(),
        }
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Vec<&AstNode> {
        let mut nodes = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            nodes.push(node);
            let children = node.children();
            stack.extend(children.into_iter().rev());
        }
        nodes
    }

    /// Structural equality that ignores ranges.
    pub fn same_shape(&self, other: &AstNode) -> bool {
        if self.variant() != other.variant() || self.display_label() != other.display_label() {
            return false;
        }
        let ours = self.children();
        let theirs = other.children();
        ours.len() == theirs.len() && ours.iter().zip(theirs).all(|(a, b)| a.same_shape(b))
    }
}

//! Fully parenthesized printer
//!
//! Renders a tree back to source text with every operator application wrapped in
//! parentheses, which makes grouping visible and keeps the output parseable by the
//! expression grammar:
//!
//!     -1 + 2 * x     =>  ((-1) + (2 * x))
//!     f(a, b)        =>  f(a, b)
//!     c ? a : b      =>  (c ? a : b)
//!     List<Int>      =>  List<Int>
//!     not a          =>  (not a)

use super::NodeVisitor;
use crate::pratt::ast::{
    AssignNode, AstNode, BinaryNode, BlockNode, CallNode, ConditionalNode, LiteralNode, NameNode,
    PostfixNode, PrefixNode, TaggedNode, TypeNameNode,
};
use crate::pratt::lexing::base_tokenization::is_identifier;
use crate::pratt::symbol::Symbol;

const INVALID: &str = "<invalid>";

/// Keyword operators need a space to stay apart from their operand.
fn operator_gap(operator: &Symbol) -> &'static str {
    if is_identifier(operator.punctuator()) {
        " "
    } else {
        ""
    }
}

fn join(visitor: &NodeVisitor<(), String>, nodes: &[AstNode], separator: &str) -> String {
    nodes
        .iter()
        .map(|node| visitor.visit(&mut (), node))
        .collect::<Vec<_>>()
        .join(separator)
}

/// The printing visitor, for hosts that want to extend or override its handlers.
pub fn print_visitor() -> NodeVisitor<(), String> {
    let mut printer = NodeVisitor::with_fallback(|_, _, _| INVALID.to_string());
    printer
        .on::<NameNode>(|_, _, node| node.name.clone())
        .on::<LiteralNode>(|_, _, node| node.value.to_string())
        .on::<PrefixNode>(|v, s, node| {
            let gap = operator_gap(&node.operator);
            format!("({}{}{})", node.operator, gap, v.visit(s, &node.operand))
        })
        .on::<PostfixNode>(|v, s, node| {
            let gap = operator_gap(&node.operator);
            format!("({}{}{})", v.visit(s, &node.operand), gap, node.operator)
        })
        .on::<BinaryNode>(|v, s, node| {
            format!(
                "({} {} {})",
                v.visit(s, &node.left),
                node.operator,
                v.visit(s, &node.right)
            )
        })
        .on::<CallNode>(|v, s, node| {
            format!("{}({})", v.visit(s, &node.function), join(v, &node.arguments, ", "))
        })
        .on::<ConditionalNode>(|v, s, node| {
            format!(
                "({} ? {} : {})",
                v.visit(s, &node.condition),
                v.visit(s, &node.then_branch),
                v.visit(s, &node.else_branch)
            )
        })
        .on::<AssignNode>(|v, s, node| format!("({} = {})", node.target, v.visit(s, &node.value)))
        .on::<BlockNode>(|v, _, node| {
            if node.children.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {} }}", join(v, &node.children, "; "))
            }
        })
        .on::<TypeNameNode>(|v, _, node| {
            if node.is_generic() {
                format!("{}<{}>", node.name, join(v, &node.arguments, ", "))
            } else {
                node.name.clone()
            }
        })
        .on::<TaggedNode>(|v, _, node| format!("{}[{}]", node.tag, join(v, &node.children, ", ")));
    printer
}

/// Print `node` fully parenthesized.
pub fn print(node: &AstNode) -> String {
    print_visitor().visit(&mut (), node)
}

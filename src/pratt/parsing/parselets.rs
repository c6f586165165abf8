//! Standard parselets
//!
//! Ready-made rules covering the usual expression shapes. The presets in
//! [presets](super::presets) wire them to conventional symbols; hosts can register them
//! for their own symbols too.
//!
//! Every parselet binds its node to the span from its first token through the last token
//! it consumed.

use super::parser::Parser;
use super::registry::{InfixParselet, PrefixParselet};
use crate::pratt::ast::{AstNode, NameNode};
use crate::pratt::diagnostics::MessageSeverity;
use crate::pratt::lexing::base_tokenization::unescape;
use crate::pratt::symbol::Symbol;
use crate::pratt::token::Token;

/// `#name` tokens as [`Name`](crate::pratt::ast::NodeKind::Name) nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct NameParselet;

impl PrefixParselet for NameParselet {
    fn parse(&self, _parser: &mut Parser<'_>, token: Token) -> AstNode {
        AstNode::name(token.text).with_range(token.range)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberParselet;

impl PrefixParselet for NumberParselet {
    fn parse(&self, parser: &mut Parser<'_>, token: Token) -> AstNode {
        match token.text.parse::<f64>() {
            Ok(value) => AstNode::number(value).with_range(token.range),
            Err(_) => {
                let node = AstNode::invalid(token.text).with_range(token.range);
                parser.document_mut().add_message(
                    MessageSeverity::Error,
                    "malformed number literal",
                    &node,
                );
                node
            }
        }
    }
}

/// String literals, with escapes resolved
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParselet;

impl PrefixParselet for StringParselet {
    fn parse(&self, _parser: &mut Parser<'_>, token: Token) -> AstNode {
        AstNode::string(unescape(&token.text)).with_range(token.range)
    }
}

/// A keyword standing for a fixed boolean
#[derive(Debug, Clone, Copy)]
pub struct BooleanParselet {
    pub value: bool,
}

impl PrefixParselet for BooleanParselet {
    fn parse(&self, _parser: &mut Parser<'_>, token: Token) -> AstNode {
        AstNode::boolean(self.value).with_range(token.range)
    }
}

/// `op operand`, the operand parsed at `precedence`
#[derive(Debug, Clone, Copy)]
pub struct PrefixOperatorParselet {
    pub precedence: u32,
}

impl PrefixParselet for PrefixOperatorParselet {
    fn parse(&self, parser: &mut Parser<'_>, token: Token) -> AstNode {
        let operand = parser.parse_expression(self.precedence);
        let range = parser.range_from(&token.range);
        AstNode::prefix(token.kind, operand).with_range(range)
    }
}

/// `operand op`
#[derive(Debug, Clone, Copy, Default)]
pub struct PostfixOperatorParselet;

impl InfixParselet for PostfixOperatorParselet {
    fn parse(&self, _parser: &mut Parser<'_>, left: AstNode, token: Token) -> AstNode {
        let range = left.range().cover(&token.range);
        AstNode::postfix(token.kind, left).with_range(range)
    }
}

/// `left op right`
#[derive(Debug, Clone, Copy)]
pub struct BinaryOperatorParselet {
    pub precedence: u32,
    pub right_associative: bool,
}

impl BinaryOperatorParselet {
    pub fn left(precedence: u32) -> Self {
        Self {
            precedence,
            right_associative: false,
        }
    }

    pub fn right(precedence: u32) -> Self {
        Self {
            precedence,
            right_associative: true,
        }
    }
}

impl InfixParselet for BinaryOperatorParselet {
    fn parse(&self, parser: &mut Parser<'_>, left: AstNode, token: Token) -> AstNode {
        let binding = if self.right_associative {
            self.precedence.saturating_sub(1)
        } else {
            self.precedence
        };
        let right = parser.parse_expression(binding);
        let range = parser.range_from(left.range());
        AstNode::binary(left, token.kind, right).with_range(range)
    }
}

/// `( expression )`
///
/// Parentheses only group: the inner node is returned with its range widened to the
/// parentheses, so printing and reparsing yields the same tree.
#[derive(Debug, Clone)]
pub struct GroupParselet {
    pub close: Symbol,
}

impl PrefixParselet for GroupParselet {
    fn parse(&self, parser: &mut Parser<'_>, token: Token) -> AstNode {
        let inner = parser.parse_expression(0);
        parser.consume_expected(&self.close);
        let range = parser.range_from(&token.range);
        inner.with_range(range)
    }
}

/// `function ( argument, ... )`
#[derive(Debug, Clone)]
pub struct CallParselet {
    pub close: Symbol,
    pub separator: Symbol,
}

impl InfixParselet for CallParselet {
    fn parse(&self, parser: &mut Parser<'_>, left: AstNode, _token: Token) -> AstNode {
        let arguments = parser.parse_separated(&self.separator, &self.close);
        let range = parser.range_from(left.range());
        AstNode::call(left, arguments).with_range(range)
    }
}

/// `condition ? then : else`, right associative
#[derive(Debug, Clone)]
pub struct ConditionalParselet {
    pub colon: Symbol,
    pub precedence: u32,
}

impl InfixParselet for ConditionalParselet {
    fn parse(&self, parser: &mut Parser<'_>, condition: AstNode, _token: Token) -> AstNode {
        let then_branch = parser.parse_expression(0);
        parser.consume_expected(&self.colon);
        let else_branch = parser.parse_expression(self.precedence.saturating_sub(1));
        let range = parser.range_from(condition.range());
        AstNode::conditional(condition, then_branch, else_branch).with_range(range)
    }
}

/// `name = value`, right associative; the target must be a name
#[derive(Debug, Clone, Copy)]
pub struct AssignParselet {
    pub precedence: u32,
}

impl InfixParselet for AssignParselet {
    fn parse(&self, parser: &mut Parser<'_>, target: AstNode, _token: Token) -> AstNode {
        let value = parser.parse_expression(self.precedence.saturating_sub(1));
        let range = parser.range_from(target.range());

        let Some(name) = target.payload::<NameNode>() else {
            let node = AstNode::invalid("assignment").with_range(range);
            parser.document_mut().add_message(
                MessageSeverity::Error,
                format!("cannot assign to a {} expression", target.node_type()),
                &node,
            );
            return node;
        };
        AstNode::assign(name.name.clone(), value).with_range(range)
    }
}

/// `{ statement; ... }`
#[derive(Debug, Clone)]
pub struct BlockParselet {
    pub separator: Symbol,
    pub terminator: Symbol,
}

impl PrefixParselet for BlockParselet {
    fn parse(&self, parser: &mut Parser<'_>, token: Token) -> AstNode {
        let mut children = Vec::new();
        loop {
            while parser.match_symbol(&self.separator) {}
            if parser.is_match(&self.terminator) || parser.is_at_end() {
                break;
            }
            children.push(parser.parse_expression(0));
            if !parser.match_symbol(&self.separator) {
                break;
            }
        }
        parser.consume_expected(&self.terminator);
        let range = parser.range_from(&token.range);
        AstNode::block(children).with_range(range)
    }
}

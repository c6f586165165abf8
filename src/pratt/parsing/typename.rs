//! Type names
//!
//!     Parses `Name` and, when generic delimiters are configured, `Name<Arg, ...>` with
//!     type names as arguments, nested to any depth.
//!
//!     The parse runs inside a dedicated lexer context that suppresses every punctuator
//!     extending the end delimiter. In `List<List<Int>>` the closing `>>` therefore lexes
//!     as two `>`, while after the type name, back in the enclosing context, `>>` is a
//!     shift again.

use super::grammar::Grammar;
use super::parser::Parser;
use super::registry::PrefixParselet;
use crate::pratt::ast::AstNode;
use crate::pratt::lexing::ContextId;
use crate::pratt::symbol::Symbol;
use crate::pratt::token::Token;

pub const TYPENAME_CONTEXT: &str = "typename";

#[derive(Debug, Clone)]
pub struct GenericDelimiters {
    pub start: Symbol,
    pub end: Symbol,
    pub separator: Symbol,
}

#[derive(Debug, Clone)]
pub struct TypeNameParser {
    generics: Option<GenericDelimiters>,
    context: ContextId,
}

impl TypeNameParser {
    /// A parser for plain, non-generic type names.
    pub fn new(grammar: &mut Grammar) -> Self {
        Self {
            generics: None,
            context: grammar.register_context(TYPENAME_CONTEXT),
        }
    }

    /// A parser for type names with generic arguments between `start` and `end`.
    pub fn with_generics(grammar: &mut Grammar, start: &str, end: &str, separator: &str) -> Self {
        let context = grammar.register_context(TYPENAME_CONTEXT);
        grammar.suppress_compounds_in_context(context, end);
        Self {
            generics: Some(GenericDelimiters {
                start: grammar.symbol(start),
                end: grammar.symbol(end),
                separator: grammar.symbol(separator),
            }),
            context,
        }
    }

    pub fn generics(&self) -> Option<&GenericDelimiters> {
        self.generics.as_ref()
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Parse a type name if the next token is a name; consumes nothing otherwise.
    pub fn try_parse(&self, parser: &mut Parser<'_>) -> Option<AstNode> {
        let name = parser.predefined().name.clone();
        if !parser.is_match(&name) {
            return None;
        }
        let _context = parser.open_context(self.context);
        let token = parser.consume();
        Some(self.parse_named(parser, token))
    }

    fn parse_named(&self, parser: &mut Parser<'_>, token: Token) -> AstNode {
        let generics = match &self.generics {
            Some(generics) if parser.match_symbol(&generics.start) => generics,
            _ => return AstNode::type_name(token.text, Vec::new()).with_range(token.range),
        };

        let mut arguments = Vec::new();
        loop {
            if parser.is_match(&generics.end) || parser.is_at_end() {
                break;
            }
            match self.try_parse(parser) {
                Some(argument) => arguments.push(argument),
                None => {
                    let found = parser.look_ahead(0).clone();
                    parser.report_unexpected("a type name", &found);
                    parser.consume();
                }
            }
            if !parser.match_symbol(&generics.separator) {
                break;
            }
        }
        parser.consume_expected(&generics.end);

        let range = parser.range_from(&token.range);
        AstNode::type_name(token.text, arguments).with_range(range)
    }
}

impl PrefixParselet for TypeNameParser {
    fn parse(&self, parser: &mut Parser<'_>, token: Token) -> AstNode {
        let _context = parser.open_context(self.context);
        self.parse_named(parser, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pratt::ast::{NodeKind, TypeNameNode};
    use crate::pratt::parsing::presets::GrammarPresets;
    use crate::pratt::parsing::registry::prefix_fn;
    use crate::pratt::symbol::NAME;
    use crate::pratt::visitor::print::print;

    fn type_grammar() -> Grammar {
        let mut grammar = Grammar::new();
        grammar.add_bitwise_operators();
        let parser = TypeNameParser::with_generics(&mut grammar, "<", ">", ",");
        grammar.register_prefix(NAME, parser);
        grammar
    }

    #[test]
    fn test_plain_and_generic() {
        let grammar = type_grammar();
        let outcome = grammar.parse_str("t", "Map<Key, List<Int>>").unwrap();
        assert!(!outcome.has_errors());
        let node = outcome.tree.payload::<TypeNameNode>().unwrap();
        assert_eq!(node.name, "Map");
        assert_eq!(node.arguments.len(), 2);
        assert_eq!(print(&outcome.tree), "Map<Key, List<Int>>");
        assert_eq!(outcome.tree.range().span, 0..19);
    }

    #[test]
    fn test_shift_after_type_name() {
        let grammar = type_grammar();
        let outcome = grammar.parse_str("t", "a >> b").unwrap();
        assert!(!outcome.has_errors());
        assert!(matches!(outcome.tree.kind(), NodeKind::Binary(_)));
    }

    #[test]
    fn test_non_name_argument_is_reported_and_skipped() {
        let grammar = type_grammar();
        let outcome = grammar.parse_str("t", "List<~, Int>").unwrap();
        assert_eq!(outcome.document.errors().count(), 1);
        assert_eq!(print(&outcome.tree), "List<Int>");
    }

    #[test]
    fn test_try_parse_consumes_nothing_without_name() {
        let mut grammar = Grammar::new();
        let parser = TypeNameParser::new(&mut grammar);
        grammar.register_prefix(
            "as",
            prefix_fn(move |p, token| match parser.try_parse(p) {
                Some(node) => node,
                None => AstNode::invalid(token.text).with_range(token.range),
            }),
        );
        grammar.register_prefix("(", prefix_fn(|_, token| AstNode::name("paren").with_range(token.range)));

        let named = grammar.parse_str("t", "as Int").unwrap();
        assert_eq!(print(&named.tree), "Int");

        let missing = grammar.parse_str("t", "as (").unwrap();
        assert!(missing.tree.is_invalid());
        // `(` is left for the caller and reported as trailing input
        assert_eq!(missing.document.errors().count(), 1);
    }
}

//! Testing utilities
//!
//!     Grammars and assertions shared by the unit tests and the integration tests under
//!     `tests/`. Tests should build their grammar through one of the constructors here
//!     rather than re-registering operators ad hoc, so that a change to a preset is picked
//!     up everywhere at once.
//!
//!     The assertions check the structural invariants every tree must satisfy, whatever
//!     the input:
//!
//!         - [assert_ranges_nested]: every child's range lies within its parent's.
//!         - [assert_no_errors]: the document carries no error-severity message, printing
//!           the rendered messages when it does.

use crate::pratt::ast::AstNode;
use crate::pratt::parsing::parselets::{
    BinaryOperatorParselet, PostfixOperatorParselet, PrefixOperatorParselet,
};
use crate::pratt::parsing::{precedence, Grammar, GrammarPresets, ParseOutcome, TypeNameParser};
use crate::pratt::symbol::NAME;
use crate::pratt::visitor::print::print;

/// Numbers and names, prefix `-` at 100 and a single infix `+` at 10.
pub fn calculator_grammar() -> Grammar {
    let mut grammar = Grammar::new();
    grammar.add_common_literals();
    grammar.register_prefix("-", PrefixOperatorParselet { precedence: 100 });
    grammar.register_infix("+", 10, BinaryOperatorParselet::left(10));
    grammar
}

/// Every preset, single-expression documents.
pub fn expression_grammar() -> Grammar {
    Grammar::expression_grammar()
}

/// Every preset plus keyword operators: prefix `not`, infix `and`, postfix `squared`.
pub fn keyword_operator_grammar() -> Grammar {
    let mut grammar = Grammar::expression_grammar();
    grammar.register_prefix(
        "not",
        PrefixOperatorParselet {
            precedence: precedence::PREFIX,
        },
    );
    grammar.register_infix(
        "and",
        precedence::LOGICAL_AND,
        BinaryOperatorParselet::left(precedence::LOGICAL_AND),
    );
    grammar.register_postfix("squared", precedence::POSTFIX, PostfixOperatorParselet);
    grammar
}

/// Names parse as type names with `<`, `>` and `,` generics; shifts are infix operators.
pub fn type_name_grammar() -> Grammar {
    let mut grammar = Grammar::new();
    grammar.add_bitwise_operators();
    grammar.add_common_literals();
    let type_names = TypeNameParser::with_generics(&mut grammar, "<", ">", ",");
    grammar.register_prefix(NAME, type_names);
    grammar
}

/// Parse `source`, failing the test on a context stack error.
pub fn parse(grammar: &Grammar, source: &str) -> ParseOutcome {
    match grammar.parse_str("test", source) {
        Ok(outcome) => outcome,
        Err(err) => panic!("parse of {source:?} failed: {err}"),
    }
}

/// Parse `source` and print the tree fully parenthesized.
pub fn parse_and_print(grammar: &Grammar, source: &str) -> String {
    print(&parse(grammar, source).tree)
}

pub fn assert_no_errors(outcome: &ParseOutcome) {
    assert!(
        !outcome.has_errors(),
        "unexpected errors:\n{}",
        outcome.document.render_messages(1)
    );
}

/// Assert that every node's range contains the ranges of its children.
pub fn assert_ranges_nested(node: &AstNode) {
    for child in node.children() {
        assert!(
            node.range().contains(child.range()),
            "{} at {:?} does not contain {} at {:?}",
            node.node_type(),
            node.range().span,
            child.node_type(),
            child.range().span
        );
        assert_ranges_nested(child);
    }
}

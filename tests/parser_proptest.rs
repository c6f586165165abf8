//! Property-based tests for the parser engine
//!
//! These tests check properties that must hold for every input, well-formed or not:
//! - Parsing terminates and never leaves the lexer context stack unbalanced
//! - Every child node's range lies within its parent's range
//! - Printing a tree and parsing the output yields a tree of the same shape

use pratt::pratt::testing::{
    assert_ranges_nested, expression_grammar, keyword_operator_grammar, parse, type_name_grammar,
};
use pratt::pratt::visitor::print::print;
use proptest::prelude::*;

/// Arbitrary text biased towards the characters the grammars care about
fn noisy_source_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9 +*/%^!~&|<>=?:;,(){}\"\\-]{0,40}",
        "[ -~]{0,40}",
        any::<String>().prop_map(|s| s.chars().take(40).collect()),
    ]
}

fn atom_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,5}".prop_filter("keywords are not names", |name| {
            !["true", "false", "not", "and", "squared"].contains(&name.as_str())
        }),
        "[0-9]{1,4}",
        "[0-9]{1,3}\\.[0-9]{1,2}",
        Just("true".to_string()),
        Just("\"text\"".to_string()),
    ]
}

/// Well-formed expressions over the full expression grammar plus keyword operators
fn expression_strategy() -> impl Strategy<Value = String> {
    let binary_ops = prop::sample::select(vec![
        "+", "-", "*", "/", "%", "^", "&&", "||", "==", "!=", "<", ">", "<=", ">=", "&", "|",
        "<<", ">>", "and",
    ]);
    atom_strategy().prop_recursive(4, 32, 3, move |inner| {
        prop_oneof![
            (inner.clone(), binary_ops.clone(), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            (prop::sample::select(vec!["-", "+", "!", "~", "not "]), inner.clone())
                .prop_map(|(op, e)| format!("{op}{e}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.clone().prop_map(|e| format!("({e})!")),
            inner.clone().prop_map(|e| format!("({e}) squared")),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|args| format!("f({})", args.join(", "))),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, a, b)| format!("({c} ? {a} : {b})")),
            inner.clone().prop_map(|e| format!("(x = {e})")),
            prop::collection::vec(inner, 0..3)
                .prop_map(|statements| format!("{{ {} }}", statements.join("; "))),
        ]
    })
}

fn type_name_strategy() -> impl Strategy<Value = String> {
    let leaf = "[A-Z][a-z]{0,4}";
    leaf.prop_recursive(3, 16, 3, move |inner| {
        ("[A-Z][a-z]{0,4}", prop::collection::vec(inner, 1..3))
            .prop_map(|(name, args)| format!("{name}<{}>", args.join(", ")))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_parse_terminates_with_balanced_contexts(source in noisy_source_strategy()) {
        let grammar = expression_grammar();
        let outcome = grammar.parse_str("prop", &source);
        prop_assert!(outcome.is_ok(), "context error for {:?}: {:?}", source, outcome.err());
    }

    #[test]
    fn test_type_name_parse_terminates_with_balanced_contexts(source in noisy_source_strategy()) {
        let grammar = type_name_grammar();
        let outcome = grammar.parse_str("prop", &source);
        prop_assert!(outcome.is_ok(), "context error for {:?}: {:?}", source, outcome.err());
    }

    #[test]
    fn test_child_ranges_nest(source in noisy_source_strategy()) {
        let grammar = expression_grammar();
        let outcome = parse(&grammar, &source);
        assert_ranges_nested(&outcome.tree);
    }

    #[test]
    fn test_tree_range_lies_within_source(source in noisy_source_strategy()) {
        let grammar = expression_grammar();
        let outcome = parse(&grammar, &source);
        let span = &outcome.tree.range().span;
        prop_assert!(span.start <= span.end);
        prop_assert!(span.end <= source.len());
    }

    #[test]
    fn test_valid_expressions_parse_without_errors(source in expression_strategy()) {
        let grammar = keyword_operator_grammar();
        let outcome = parse(&grammar, &source);
        prop_assert!(
            !outcome.has_errors(),
            "{:?}:\n{}",
            source,
            outcome.document.render_messages(0)
        );
        assert_ranges_nested(&outcome.tree);
    }

    #[test]
    fn test_print_then_parse_is_idempotent(source in expression_strategy()) {
        let grammar = keyword_operator_grammar();
        let first = parse(&grammar, &source);
        let printed = print(&first.tree);
        let second = parse(&grammar, &printed);
        prop_assert!(!second.has_errors(), "{:?} printed as {:?}", source, printed);
        prop_assert!(first.tree.same_shape(&second.tree), "{:?} printed as {:?}", source, printed);
        prop_assert_eq!(print(&second.tree), printed);
    }

    #[test]
    fn test_type_names_print_as_written(source in type_name_strategy()) {
        let grammar = type_name_grammar();
        let outcome = parse(&grammar, &source);
        prop_assert!(!outcome.has_errors(), "{:?}", source);
        prop_assert_eq!(print(&outcome.tree), source);
    }
}

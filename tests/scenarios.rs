//! End-to-end parsing scenarios
//!
//! Each test drives a whole document through one of the shared grammars in
//! `pratt::pratt::testing` and checks the resulting tree, its ranges and the messages
//! recorded on the document.

use pratt::pratt::ast::{
    AstNode, BinaryNode, CallNode, LiteralNode, LiteralValue, NameNode, NodeKind, NodeVariant,
    TypeNameNode,
};
use pratt::pratt::diagnostics::{MessageSeverity, SourceDocument};
use pratt::pratt::parsing::parselets::{BinaryOperatorParselet, NumberParselet};
use pratt::pratt::parsing::{prefix_fn, Grammar};
use pratt::pratt::symbol::NUMBER;
use pratt::pratt::testing::{
    assert_no_errors, assert_ranges_nested, calculator_grammar, expression_grammar, parse,
    parse_and_print, type_name_grammar,
};
use pratt::pratt::visitor::print::print;
use pratt::pratt::visitor::{ActionVisitor, NodeVisitor};
use std::collections::HashMap;

#[test]
fn prefix_binds_tighter_than_sum() {
    insta::assert_snapshot!(parse_and_print(&calculator_grammar(), "-1+2"), @"((-1) + 2)");
}

#[test]
fn call_collects_arguments_and_covers_input() {
    let grammar = expression_grammar();
    let outcome = parse(&grammar, "f(1,2,3)");
    assert_no_errors(&outcome);

    let call = outcome.tree.payload::<CallNode>().expect("a call");
    assert_eq!(call.function.payload::<NameNode>().map(|n| n.name.as_str()), Some("f"));
    assert_eq!(call.arguments.len(), 3);
    assert!(call
        .arguments
        .iter()
        .all(|argument| argument.variant() == NodeVariant::Literal));
    assert_eq!(outcome.tree.range().span, 0..8);
    assert_ranges_nested(&outcome.tree);
}

#[test]
fn missing_operand_is_one_error_and_an_invalid_node() {
    let grammar = calculator_grammar();
    let outcome = parse(&grammar, "1+");

    let errors: Vec<_> = outcome.document.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].text, "unexpected end of input, expected an expression");
    assert_eq!(errors[0].code.as_deref(), Some("unexpected-token"));

    let binary = outcome.tree.payload::<BinaryNode>().expect("a binary node");
    assert!(binary.right.is_invalid());
    assert_eq!(print(&outcome.tree), "(1 + <invalid>)");
}

#[test]
fn generic_type_name() {
    let grammar = type_name_grammar();
    let outcome = parse(&grammar, "List<Int>");
    assert_no_errors(&outcome);

    let type_name = outcome.tree.payload::<TypeNameNode>().expect("a type name");
    assert_eq!(type_name.name, "List");
    assert_eq!(type_name.arguments.len(), 1);
    let argument = type_name.arguments[0]
        .payload::<TypeNameNode>()
        .expect("a type name argument");
    assert_eq!(argument.name, "Int");
    assert!(argument.arguments.is_empty());
}

#[test]
fn closing_generics_do_not_lex_as_shift() {
    let grammar = type_name_grammar();
    let outcome = parse(&grammar, "List<List<Int>> >> 2");
    assert_no_errors(&outcome);
    insta::assert_snapshot!(print(&outcome.tree), @"(List<List<Int>> >> 2)");
    assert_ranges_nested(&outcome.tree);
}

#[test]
fn printed_tree_reparses_to_same_shape() {
    let grammar = expression_grammar();
    for source in [
        "a = b ? -c ^ 2 ^ 3 : f(x, y)!",
        "1 + 2 * 3 - 4 / 5 % 6",
        "!a || b && c == d < e",
        "x << 1 | y & ~z >> 2",
        "{ a = 1; f(a); }",
    ] {
        let first = parse(&grammar, source);
        assert_no_errors(&first);
        let printed = print(&first.tree);
        let second = parse(&grammar, &printed);
        assert_no_errors(&second);
        assert!(
            first.tree.same_shape(&second.tree),
            "{source:?} printed as {printed:?} reparsed differently"
        );
        assert_eq!(print(&second.tree), printed);
    }
}

#[test]
fn statement_documents_parse_into_a_block() {
    let mut grammar = expression_grammar();
    grammar.set_statement_separator(";");
    let outcome = parse(&grammar, "x = 1;\ny = x + 2;\nf(y)");
    assert_no_errors(&outcome);
    assert_eq!(outcome.tree.variant(), NodeVariant::Block);
    assert_eq!(print(&outcome.tree), "{ (x = 1); (y = (x + 2)); f(y) }");
    assert_ranges_nested(&outcome.tree);
}

#[test]
fn errors_render_with_source_context() {
    let grammar = expression_grammar();
    let outcome = grammar
        .parse(SourceDocument::new("calc.expr", "1 +\n* 2\n3"))
        .expect("contexts stay balanced");
    assert!(outcome.has_errors());

    let rendered = outcome.document.render_messages(1);
    assert!(rendered.starts_with("calc.expr:2:1: error[unexpected-token]"), "{rendered}");
    assert!(rendered.contains(">>   2 | * 2"), "{rendered}");
}

#[test]
fn host_parselets_can_report_warnings() {
    let mut grammar = calculator_grammar();
    grammar.register_prefix(
        "todo",
        prefix_fn(|parser, token| {
            let node = AstNode::name(token.text.clone()).with_range(token.range);
            parser
                .document_mut()
                .add_message(MessageSeverity::Warning, "placeholder value", &node);
            node
        }),
    );
    let outcome = parse(&grammar, "1 + todo");
    assert!(!outcome.has_errors());
    assert_eq!(outcome.document.messages().len(), 1);
    assert_eq!(outcome.document.messages()[0].severity, MessageSeverity::Warning);
}

#[test]
fn evaluator_over_parsed_tree() {
    let grammar = expression_grammar();
    let outcome = parse(&grammar, "2 * (x + 1) - y");

    let mut eval: NodeVisitor<HashMap<String, f64>, f64> = NodeVisitor::new();
    eval.on::<LiteralNode>(|_, _, literal| match literal.value {
        LiteralValue::Number(n) => n,
        _ => f64::NAN,
    })
    .on::<NameNode>(|_, env, name| env.get(&name.name).copied().unwrap_or(f64::NAN))
    .on::<BinaryNode>(|visitor, env, binary| {
        let left = visitor.visit(env, &binary.left);
        let right = visitor.visit(env, &binary.right);
        match binary.operator.punctuator() {
            "+" => left + right,
            "-" => left - right,
            "*" => left * right,
            "/" => left / right,
            _ => f64::NAN,
        }
    });

    let mut env = HashMap::from([("x".to_string(), 4.0), ("y".to_string(), 3.0)]);
    assert_eq!(eval.visit(&mut env, &outcome.tree), 7.0);
}

#[test]
fn action_visitor_collects_assigned_names_in_order() {
    let grammar = expression_grammar();
    let outcome = parse(&grammar, "{ a = 1; b; c = a }");

    let mut collect: ActionVisitor<Vec<String>> = ActionVisitor::actions();
    collect.on_node(NodeVariant::Assign, |_, names, node| {
        if let NodeKind::Assign(assign) = node.kind() {
            names.push(assign.target.clone());
        }
    });

    let mut names = Vec::new();
    collect.visit(&mut names, &outcome.tree);
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn shared_grammar_parses_on_many_threads() {
    let grammar = std::sync::Arc::new(expression_grammar());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let grammar = grammar.clone();
            std::thread::spawn(move || {
                let source = format!("{i} + {i} * 2");
                parse_and_print(&grammar, &source)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let printed = handle.join().expect("thread panicked");
        assert_eq!(printed, format!("({i} + ({i} * 2))"));
    }
}

#[test]
fn custom_precedence_levels() {
    let mut grammar = Grammar::new();
    grammar.register_prefix(NUMBER, NumberParselet);
    grammar.register_infix("+", 1, BinaryOperatorParselet::left(1));
    grammar.register_infix("**", 3, BinaryOperatorParselet::right(3));
    grammar.register_infix("*", 2, BinaryOperatorParselet::left(2));

    assert_eq!(
        parse_and_print(&grammar, "1 + 2 ** 3 ** 4 * 5"),
        "(1 + ((2 ** (3 ** 4)) * 5))"
    );
}

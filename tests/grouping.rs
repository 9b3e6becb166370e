//! Integration tests for the grouping pass
//!
//! Grouping attaches each example to the signature with exactly the same
//! name, preserves source order, keeps duplicates, and never fails.

use mirror::mirror::grouper::{extract_expressions, group, group_signatures_with_examples};
use mirror::mirror::parser::parse;

#[test]
fn test_example_attaches_to_matching_signature_only() {
    let program = parse(
        "signature add(a: number, b: number) -> number\n\
         signature mul(a: number, b: number) -> number\n\
         example add(2, 3) = 5\n\
         example mul(2, 3) = 6\n\
         example add(0, 0) = 0",
    )
    .unwrap();

    let grouped = group_signatures_with_examples(&program);
    assert_eq!(grouped.len(), 2);

    let add = &grouped[0];
    assert_eq!(add.signature.name, "add");
    assert_eq!(add.examples.len(), 2);
    assert!(add.examples.iter().all(|example| example.name == "add"));

    let mul = &grouped[1];
    assert_eq!(mul.signature.name, "mul");
    assert_eq!(mul.examples.len(), 1);
    assert_eq!(mul.examples[0].name, "mul");
}

#[test]
fn test_examples_keep_source_order() {
    let program = parse(
        "signature f(x: number) -> number\n\
         example f(3) = 3\n\
         example f(1) = 1\n\
         example f(2) = 2",
    )
    .unwrap();

    let grouped = group_signatures_with_examples(&program);
    let firsts: Vec<&mirror::mirror::ast::LiteralExpr> = grouped[0]
        .examples
        .iter()
        .map(|example| &example.literals[0])
        .collect();
    assert_eq!(
        firsts,
        vec![
            &mirror::mirror::ast::LiteralExpr::number(3.0),
            &mirror::mirror::ast::LiteralExpr::number(1.0),
            &mirror::mirror::ast::LiteralExpr::number(2.0),
        ]
    );
}

#[test]
fn test_duplicate_examples_are_not_deduplicated() {
    let program = parse(
        "signature f(x: number) -> number\n\
         example f(1) = 1\n\
         example f(1) = 1",
    )
    .unwrap();

    let grouped = group_signatures_with_examples(&program);
    assert_eq!(grouped[0].examples.len(), 2);
    assert_eq!(grouped[0].examples[0], grouped[0].examples[1]);
}

#[test]
fn test_name_match_is_exact() {
    let program = parse(
        "signature add(a: number) -> number\n\
         example Add(1) = 1\n\
         example add_(1) = 1\n\
         example adder(1) = 1",
    )
    .unwrap();

    let grouped = group_signatures_with_examples(&program);
    assert!(grouped[0].examples.is_empty());
}

#[test]
fn test_orphan_example_parses_but_groups_nowhere() {
    // an example with no matching signature is not an error
    let program = parse("example ghost(1) = 1").unwrap();
    let grouped = group(&program);
    assert!(grouped.signatures.is_empty());
    assert!(grouped.expressions.is_empty());
}

#[test]
fn test_expressions_pass_through_untouched() {
    let program = parse(
        "signature add(a: number) -> number\n\
         foo(bar(1), 2)\n\
         example add(1) = 1\n\
         baz(\"x\")",
    )
    .unwrap();

    let expressions = extract_expressions(&program);
    assert_eq!(expressions.len(), 2);
    assert_eq!(expressions[0].name, "foo");
    assert_eq!(expressions[1].name, "baz");

    // grouping does not consume or reorder them
    let grouped = group(&program);
    assert_eq!(grouped.expressions, expressions);
    assert_eq!(grouped.signatures.len(), 1);
    assert_eq!(grouped.signatures[0].examples.len(), 1);
}

#[test]
fn test_grouping_is_idempotent() {
    let program = parse(
        "signature add(a: number) -> number\n\
         example add(1) = 1\n\
         add(2)",
    )
    .unwrap();

    let once = group(&program);
    let twice = group(&program);
    assert_eq!(once, twice);
}

#[test]
fn test_duplicate_signature_names_each_get_all_examples() {
    let program = parse(
        "signature f(x: number) -> number\n\
         signature f(x: string) -> string\n\
         example f(1) = 1",
    )
    .unwrap();

    let grouped = group_signatures_with_examples(&program);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].examples.len(), 1);
    assert_eq!(grouped[1].examples.len(), 1);
}

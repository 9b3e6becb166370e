//! Grouping pass over a parsed program
//!
//! Associates each signature with the examples sharing its name and
//! extracts the bare expression statements. This is a pure function over
//! the read-only AST: total, deterministic, and with no failure modes;
//! an empty program or one with no signatures simply yields empty
//! sequences.
//!
//! The matching is O(signatures × examples). That is fine for the small
//! specification files the language is written in; reusing this at scale
//! would want an index keyed by name.

use serde::Serialize;

use crate::mirror::ast::{Example, Expression, Program, Signature, Statement};

/// A signature extended with the examples whose name exactly equals its
/// own, in source order. Duplicate names are kept; the match is a
/// multiset, not a set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedSignature {
    #[serde(flatten)]
    pub signature: Signature,
    pub examples: Vec<Example>,
}

/// The serializable artifact handed to the boundary: grouped signatures
/// plus the bare expression statements, both in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedProgram {
    pub signatures: Vec<GroupedSignature>,
    pub expressions: Vec<Expression>,
}

/// Associate each signature with all same-named examples.
///
/// An example whose name matches no signature is dropped from this view
/// (it still parsed successfully); a signature with no matching examples
/// gets an empty sequence, never an error.
pub fn group_signatures_with_examples(program: &Program) -> Vec<GroupedSignature> {
    let examples: Vec<&Example> = program
        .statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::Example(example) => Some(example),
            _ => None,
        })
        .collect();

    program
        .statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::Signature(signature) => Some(signature),
            _ => None,
        })
        .map(|signature| GroupedSignature {
            signature: signature.clone(),
            examples: examples
                .iter()
                .filter(|example| example.name == signature.name)
                .map(|example| (*example).clone())
                .collect(),
        })
        .collect()
}

/// Extract the bare expression statements, untouched and in source order
pub fn extract_expressions(program: &Program) -> Vec<Expression> {
    program
        .statements
        .iter()
        .filter_map(|statement| match statement {
            Statement::Expression(expression) => Some(expression.clone()),
            _ => None,
        })
        .collect()
}

/// Run both partitions and assemble the boundary artifact
pub fn group(program: &Program) -> GroupedProgram {
    GroupedProgram {
        signatures: group_signatures_with_examples(program),
        expressions: extract_expressions(program),
    }
}

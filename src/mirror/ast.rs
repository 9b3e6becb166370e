//! Abstract Syntax Tree (AST) definitions for the Mirror specification language
//!
//! This module defines the data structures that represent a parsed Mirror
//! program. Every node category is a closed sum type with exhaustive
//! matching at its consumers, and every enum serializes with a stable
//! `kind` discriminator so the grouped program can be embedded losslessly
//! in a JSON payload.
//!
//! All nodes are created during a single parse pass and are immutable
//! thereafter; nothing is shared between parses.

use serde::Serialize;

/// A complete Mirror program: the ordered sequence of top-level statements.
///
/// Insertion order is significant: it determines the stability of the
/// later grouping pass, though not its semantics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A top-level statement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Statement {
    Signature(Signature),
    Example(Example),
    Expression(Expression),
}

/// A named function declaration with typed parameters and a typed return value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeExpr,
}

/// A single `name: type` parameter, owned by its enclosing signature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

/// A named input/output sample, tied to a signature by matching name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
    pub name: String,
    pub literals: Vec<LiteralExpr>,
    pub result: LiteralExpr,
}

/// A bare, possibly nested, call-like construct
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    pub name: String,
    pub mix: Vec<MixItem>,
}

/// An argument of an expression: a nested call or a literal.
///
/// Serialized untagged: a nested call is the only mix shape carrying
/// `name` and `mix` fields, and literals carry their own `kind`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MixItem {
    Expression(Expression),
    Literal(LiteralExpr),
}

/// A type expression: a primitive, or a single-type container.
///
/// Recursive; nesting depth is bounded only by the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeExpr {
    Primitive { name: PrimitiveType },
    List { inner: Box<TypeExpr> },
    Dict { inner: Box<TypeExpr> },
}

/// The three primitive types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Number,
    Bool,
}

/// A literal value.
///
/// The list and dict forms hold exactly one inner literal each; the
/// grammar has no multi-element container literals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LiteralExpr {
    Bool { value: bool },
    Number { value: f64 },
    Str { value: String },
    List { value: Box<LiteralExpr> },
    Dict { key: Box<LiteralExpr>, value: Box<LiteralExpr> },
}

impl TypeExpr {
    /// Shorthand for a primitive type expression
    pub fn primitive(name: PrimitiveType) -> Self {
        TypeExpr::Primitive { name }
    }

    /// Shorthand for `list[inner]`
    pub fn list(inner: TypeExpr) -> Self {
        TypeExpr::List {
            inner: Box::new(inner),
        }
    }

    /// Shorthand for `dict{inner}`
    pub fn dict(inner: TypeExpr) -> Self {
        TypeExpr::Dict {
            inner: Box::new(inner),
        }
    }
}

impl LiteralExpr {
    pub fn number(value: f64) -> Self {
        LiteralExpr::Number { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        LiteralExpr::Str {
            value: value.into(),
        }
    }

    pub fn bool(value: bool) -> Self {
        LiteralExpr::Bool { value }
    }

    pub fn list(value: LiteralExpr) -> Self {
        LiteralExpr::List {
            value: Box::new(value),
        }
    }

    pub fn dict(key: LiteralExpr, value: LiteralExpr) -> Self {
        LiteralExpr::Dict {
            key: Box::new(key),
            value: Box::new(value),
        }
    }
}

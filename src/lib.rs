//! # mirror
//!
//! A compiler front-end for the Mirror specification language.
//!
//! Mirror source text declares function signatures with typed parameters,
//! input/output examples tied to a signature by name, and bare call
//! expressions. This crate tokenizes and parses that text into an AST,
//! groups examples with their signatures, and hands the grouped program
//! to a local text-generation service that produces the function bodies.

pub mod mirror;

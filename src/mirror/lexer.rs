//! Lexer module for the Mirror specification language
//!
//! This module contains the tokenization logic for Mirror source text,
//! including token definitions and the lexer implementation.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with_spans};
pub use tokens::Token;

//! Implementation of the Mirror lexer
//!
//! This module provides convenience functions for tokenizing Mirror source
//! text. The actual tokenization is handled entirely by logos; the token
//! rules are total, so lexing is a single linear scan with no error states.

use crate::mirror::lexer::tokens::Token;
use logos::Logos;

/// Tokenize a string and collect all tokens
pub fn tokenize(source: &str) -> Vec<Token> {
    Token::lexer(source).filter_map(|result| result.ok()).collect()
}

/// Tokenize a string and collect tokens with their byte spans
pub fn tokenize_with_spans(source: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}

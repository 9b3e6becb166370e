//! Public API for the parser.

use crate::mirror::ast::Program;
use crate::mirror::lexer::{tokenize, Token};
use crate::mirror::parser::error::ParseResult;
use crate::mirror::parser::parser::Parser;

/// Tokenize and parse Mirror source text into a program
pub fn parse(source: &str) -> ParseResult<Program> {
    parse_tokens(tokenize(source))
}

/// Parse an already-tokenized sequence into a program
pub fn parse_tokens(tokens: Vec<Token>) -> ParseResult<Program> {
    Parser::new(tokens).parse_program()
}

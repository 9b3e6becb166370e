//! Recursive-descent parser for the Mirror specification language
//!
//! The parser owns the token sequence for the duration of one parse and
//! maintains a single cursor into it. Grammar:
//!
//! ```text
//! program        := statement*
//! signature-stmt := 'signature' IDENT '(' parameter (',' parameter)* ')' '->' type
//! parameter      := IDENT ':' type
//! type           := 'string' | 'number' | 'bool'
//!                 | 'list' '[' type ']'
//!                 | 'dict' '{' type '}'
//! example-stmt   := 'example' IDENT '(' literal (',' literal)* ')' '=' literal
//! expression-stmt:= IDENT '(' mix-item (',' mix-item)* ')'
//! mix-item       := expression-stmt | literal
//! literal        := 'true' | 'false' | NUMBER | STRING
//!                 | '[' literal ']'
//!                 | '{' literal ':' literal '}'
//! ```
//!
//! Comma-separated lists have no trailing-comma and no empty form: at
//! least one element is required, so `signature f() -> number` fails
//! inside the parameter rule rather than producing an empty list.

use crate::mirror::ast::{
    Example, Expression, LiteralExpr, MixItem, Parameter, PrimitiveType, Program, Signature,
    Statement, TypeExpr,
};
use crate::mirror::lexer::Token;
use crate::mirror::parser::error::{ParseError, ParseResult};

/// Cursor-based parser state over an owned token sequence
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    /// Parse the whole token sequence as a program.
    ///
    /// Fail-fast: the first unmet expectation aborts the parse with no
    /// partial result. Every statement consumes at least one token, so
    /// the loop always makes progress.
    pub fn parse_program(mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.peek() {
            Some(Token::Signature) => {
                self.pos += 1;
                Ok(Statement::Signature(self.parse_signature()?))
            }
            Some(Token::Example) => {
                self.pos += 1;
                Ok(Statement::Example(self.parse_example()?))
            }
            Some(token) if token.is_identifier() => {
                Ok(Statement::Expression(self.parse_expression()?))
            }
            _ => Err(ParseError::UnexpectedToken { found: self.found() }),
        }
    }

    fn parse_signature(&mut self) -> ParseResult<Signature> {
        let name = self.consume_identifier()?;
        self.consume(&Token::LParen, "(")?;
        let parameters = self.parse_parameters()?;
        self.consume(&Token::RParen, ")")?;
        self.consume(&Token::Arrow, "->")?;
        let return_type = self.parse_type()?;
        Ok(Signature {
            name,
            parameters,
            return_type,
        })
    }

    fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut parameters = Vec::new();
        loop {
            let name = self.consume_identifier()?;
            self.consume(&Token::Colon, ":")?;
            let ty = self.parse_type()?;
            parameters.push(Parameter { name, ty });
            if !self.advance_if(&Token::Comma) {
                break;
            }
        }
        Ok(parameters)
    }

    fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        match self.peek() {
            Some(Token::KwString) => {
                self.pos += 1;
                Ok(TypeExpr::primitive(PrimitiveType::String))
            }
            Some(Token::KwNumber) => {
                self.pos += 1;
                Ok(TypeExpr::primitive(PrimitiveType::Number))
            }
            Some(Token::KwBool) => {
                self.pos += 1;
                Ok(TypeExpr::primitive(PrimitiveType::Bool))
            }
            Some(Token::List) => {
                self.pos += 1;
                self.consume(&Token::LBracket, "[")?;
                let inner = self.parse_type()?;
                self.consume(&Token::RBracket, "]")?;
                Ok(TypeExpr::list(inner))
            }
            Some(Token::Dict) => {
                self.pos += 1;
                self.consume(&Token::LBrace, "{")?;
                let inner = self.parse_type()?;
                self.consume(&Token::RBrace, "}")?;
                Ok(TypeExpr::dict(inner))
            }
            _ => Err(ParseError::ExpectedType { found: self.found() }),
        }
    }

    fn parse_example(&mut self) -> ParseResult<Example> {
        let name = self.consume_identifier()?;
        self.consume(&Token::LParen, "(")?;
        let literals = self.parse_literals()?;
        self.consume(&Token::RParen, ")")?;
        self.consume(&Token::Equals, "=")?;
        let result = self.parse_literal()?;
        Ok(Example {
            name,
            literals,
            result,
        })
    }

    fn parse_literals(&mut self) -> ParseResult<Vec<LiteralExpr>> {
        let mut literals = Vec::new();
        loop {
            literals.push(self.parse_literal()?);
            if !self.advance_if(&Token::Comma) {
                break;
            }
        }
        Ok(literals)
    }

    fn parse_literal(&mut self) -> ParseResult<LiteralExpr> {
        match self.peek() {
            Some(Token::True) => {
                self.pos += 1;
                Ok(LiteralExpr::bool(true))
            }
            Some(Token::False) => {
                self.pos += 1;
                Ok(LiteralExpr::bool(false))
            }
            Some(Token::Number(value)) => {
                let value = *value;
                self.pos += 1;
                Ok(LiteralExpr::number(value))
            }
            Some(Token::Str(value)) => {
                let value = value.clone();
                self.pos += 1;
                Ok(LiteralExpr::string(value))
            }
            Some(Token::LBracket) => {
                self.pos += 1;
                let value = self.parse_literal()?;
                self.consume(&Token::RBracket, "]")?;
                Ok(LiteralExpr::list(value))
            }
            Some(Token::LBrace) => {
                self.pos += 1;
                let key = self.parse_literal()?;
                self.consume(&Token::Colon, ":")?;
                let value = self.parse_literal()?;
                self.consume(&Token::RBrace, "}")?;
                Ok(LiteralExpr::dict(key, value))
            }
            _ => Err(ParseError::ExpectedLiteral { found: self.found() }),
        }
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        let name = self.consume_identifier()?;
        self.consume(&Token::LParen, "(")?;
        let mix = self.parse_mix()?;
        self.consume(&Token::RParen, ")")?;
        Ok(Expression { name, mix })
    }

    fn parse_mix(&mut self) -> ParseResult<Vec<MixItem>> {
        let mut mix = Vec::new();
        loop {
            // an identifier-shaped token starts a nested call; anything
            // else must be a literal
            let item = match self.peek() {
                Some(token) if token.is_identifier() => {
                    MixItem::Expression(self.parse_expression()?)
                }
                _ => MixItem::Literal(self.parse_literal()?),
            };
            mix.push(item);
            if !self.advance_if(&Token::Comma) {
                break;
            }
        }
        Ok(mix)
    }

    // Cursor helpers

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Rendering of the current token for error messages
    fn found(&self) -> String {
        match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    /// Advance past the expected token if it is next
    fn advance_if(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Require the expected token, or fail naming it
    fn consume(&mut self, expected: &Token, rendering: &'static str) -> ParseResult<()> {
        if self.advance_if(expected) {
            Ok(())
        } else {
            Err(ParseError::ExpectedToken {
                expected: rendering,
                found: self.found(),
            })
        }
    }

    /// Require an identifier-shaped token and return its spelling
    fn consume_identifier(&mut self) -> ParseResult<String> {
        let name = self
            .peek()
            .and_then(|token| token.identifier_text())
            .map(str::to_string);
        match name {
            Some(name) => {
                self.pos += 1;
                Ok(name)
            }
            None => Err(ParseError::ExpectedIdentifier { found: self.found() }),
        }
    }
}

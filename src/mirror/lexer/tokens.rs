//! Token definitions for the Mirror specification language
//!
//! All tokens are defined using the logos derive macro. The lexer has no
//! error state of its own: any single character no other rule matches
//! becomes an [`Token::Unknown`] token, and rejecting it is the parser's
//! job. Whitespace separates tokens and is never a token itself.
use logos::Logos;

/// All possible tokens in Mirror source text
#[derive(Logos, Debug, Clone, PartialEq, serde::Serialize)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // Keywords
    #[token("signature")]
    Signature,
    #[token("example")]
    Example,
    #[token("string")]
    KwString,
    #[token("number")]
    KwNumber,
    #[token("bool")]
    KwBool,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("list")]
    List,
    #[token("dict")]
    Dict,

    // Operators and punctuation
    #[token("->")]
    Arrow,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,
    #[token(".")]
    Period,

    /// A name: letter or underscore, then word characters
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Decimal numeric literal, optionally fractional
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    /// Double-quoted string literal with backslash-escaped quotes,
    /// stored without the surrounding quotes and with escapes resolved
    #[regex(r#""(?:[^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    Str(String),

    /// Catch-all for any other single non-whitespace character
    #[regex(r".", |lex| lex.slice().to_string(), priority = 0)]
    Unknown(String),
}

/// Strip the surrounding quotes and resolve backslash escapes.
fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

impl Token {
    /// The identifier spelling of this token, if it has one.
    ///
    /// Every keyword is identifier-shaped, so keywords are accepted
    /// wherever an identifier is required (a signature named `list` is
    /// legal, if unwise).
    pub fn identifier_text(&self) -> Option<&str> {
        match self {
            Token::Ident(name) => Some(name),
            Token::Signature => Some("signature"),
            Token::Example => Some("example"),
            Token::KwString => Some("string"),
            Token::KwNumber => Some("number"),
            Token::KwBool => Some("bool"),
            Token::True => Some("true"),
            Token::False => Some("false"),
            Token::List => Some("list"),
            Token::Dict => Some("dict"),
            _ => None,
        }
    }

    /// Check if this token can start an expression or name a construct
    pub fn is_identifier(&self) -> bool {
        self.identifier_text().is_some()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{}", name),
            Token::Number(value) => write!(f, "{}", value),
            Token::Str(value) => write!(f, "\"{}\"", value),
            Token::Unknown(text) => write!(f, "{}", text),
            Token::Signature => write!(f, "signature"),
            Token::Example => write!(f, "example"),
            Token::KwString => write!(f, "string"),
            Token::KwNumber => write!(f, "number"),
            Token::KwBool => write!(f, "bool"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::List => write!(f, "list"),
            Token::Dict => write!(f, "dict"),
            Token::Arrow => write!(f, "->"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Equals => write!(f, "="),
            Token::Period => write!(f, "."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::lexer::tokenize;

    #[test]
    fn test_keywords() {
        assert_eq!(
            tokenize("signature example string number bool true false list dict"),
            vec![
                Token::Signature,
                Token::Example,
                Token::KwString,
                Token::KwNumber,
                Token::KwBool,
                Token::True,
                Token::False,
                Token::List,
                Token::Dict,
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_is_an_identifier() {
        // "listing" must not lex as `list` + `ing`
        assert_eq!(tokenize("listing"), vec![Token::Ident("listing".to_string())]);
        assert_eq!(tokenize("numbers"), vec![Token::Ident("numbers".to_string())]);
        assert_eq!(
            tokenize("signature_"),
            vec![Token::Ident("signature_".to_string())]
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokenize("( ) [ ] { } , : = ."),
            vec![
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::LBrace,
                Token::RBrace,
                Token::Comma,
                Token::Colon,
                Token::Equals,
                Token::Period,
            ]
        );
    }

    #[test]
    fn test_arrow() {
        assert_eq!(tokenize("->"), vec![Token::Arrow]);
        // a lone dash matches no rule and degrades to Unknown
        assert_eq!(tokenize("-"), vec![Token::Unknown("-".to_string())]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokenize("42"), vec![Token::Number(42.0)]);
        assert_eq!(tokenize("2.5"), vec![Token::Number(2.5)]);
        assert_eq!(tokenize("0"), vec![Token::Number(0.0)]);
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            tokenize(r#""hello world""#),
            vec![Token::Str("hello world".to_string())]
        );
        assert_eq!(tokenize(r#""""#), vec![Token::Str(String::new())]);
    }

    #[test]
    fn test_string_escaped_quote() {
        assert_eq!(
            tokenize(r#""say \"hi\"""#),
            vec![Token::Str("say \"hi\"".to_string())]
        );
        assert_eq!(
            tokenize(r#""back\\slash""#),
            vec![Token::Str("back\\slash".to_string())]
        );
    }

    #[test]
    fn test_unknown_characters() {
        assert_eq!(tokenize("@"), vec![Token::Unknown("@".to_string())]);
        // unknown runs degrade one character at a time
        assert_eq!(
            tokenize("@@"),
            vec![
                Token::Unknown("@".to_string()),
                Token::Unknown("@".to_string())
            ]
        );
    }

    #[test]
    fn test_identifier_text() {
        assert_eq!(
            Token::Ident("add".to_string()).identifier_text(),
            Some("add")
        );
        assert_eq!(Token::List.identifier_text(), Some("list"));
        assert_eq!(Token::True.identifier_text(), Some("true"));
        assert_eq!(Token::LParen.identifier_text(), None);
        assert_eq!(Token::Number(1.0).identifier_text(), None);
        assert_eq!(Token::Str("x".to_string()).identifier_text(), None);
    }

    #[test]
    fn test_display_matches_source_rendering() {
        assert_eq!(Token::Arrow.to_string(), "->");
        assert_eq!(Token::Number(5.0).to_string(), "5");
        assert_eq!(Token::Number(2.5).to_string(), "2.5");
        assert_eq!(Token::Str("hi".to_string()).to_string(), "\"hi\"");
        assert_eq!(Token::Ident("foo".to_string()).to_string(), "foo");
        assert_eq!(Token::LBrace.to_string(), "{");
    }
}

//! Property-based tests for the Mirror lexer
//!
//! The lexer is total: any input tokenizes without panicking, and
//! characters no rule recognizes degrade to Unknown tokens instead of
//! producing lexer errors.

use mirror::mirror::lexer::{tokenize, tokenize_with_spans, Token};
use proptest::prelude::*;

const KEYWORDS: &[&str] = &[
    "signature", "example", "string", "number", "bool", "true", "false", "list", "dict",
];

proptest! {
    #[test]
    fn lexer_never_panics(source in ".*") {
        let _ = tokenize(&source);
    }

    #[test]
    fn whitespace_is_never_a_token(source in "[ \t\r\n]*") {
        prop_assert!(tokenize(&source).is_empty());
    }

    #[test]
    fn identifiers_lex_as_single_tokens(name in "[a-zA-Z_][a-zA-Z0-9_]{0,20}") {
        prop_assume!(!KEYWORDS.contains(&name.as_str()));
        prop_assert_eq!(tokenize(&name), vec![Token::Ident(name.clone())]);
    }

    #[test]
    fn integers_lex_as_single_number_tokens(value in 0u64..1_000_000_000) {
        let source = value.to_string();
        prop_assert_eq!(tokenize(&source), vec![Token::Number(value as f64)]);
    }

    #[test]
    fn fractional_numbers_lex_as_single_tokens(whole in 0u32..10_000, frac in 1u32..10_000) {
        let source = format!("{}.{}", whole, frac);
        let expected: f64 = source.parse().unwrap();
        prop_assert_eq!(tokenize(&source), vec![Token::Number(expected)]);
    }

    #[test]
    fn unrecognized_characters_degrade_to_unknown(source in "[!@#$%^&*;?~|]{1,10}") {
        let tokens = tokenize(&source);
        prop_assert_eq!(tokens.len(), source.chars().count());
        for token in tokens {
            prop_assert!(matches!(token, Token::Unknown(_)));
        }
    }

    #[test]
    fn quoted_strings_without_escapes_round_trip(content in "[a-zA-Z0-9 ,.:()]{0,30}") {
        let source = format!("\"{}\"", content);
        prop_assert_eq!(tokenize(&source), vec![Token::Str(content.clone())]);
    }

    #[test]
    fn spans_cover_disjoint_increasing_ranges(source in "[a-z0-9(),:>=\\[\\]{}\" .-]{0,60}") {
        let tokens = tokenize_with_spans(&source);
        let mut last_end = 0;
        for (_, span) in tokens {
            prop_assert!(span.start >= last_end);
            prop_assert!(span.end > span.start);
            last_end = span.end;
        }
    }
}

#[test]
fn token_count_matches_between_helpers() {
    let source = "signature add(a: number, b: number) -> number";
    assert_eq!(tokenize(source).len(), tokenize_with_spans(source).len());
}

//! Boundary and property-based tests for the lexer, kept separate
//! from the per-function unit tests colocated in `lexer.rs` itself.

use jfmc_util::Handler;
use proptest::prelude::*;

use crate::lexer::scan;
use crate::token::{Span, TokenKind};

#[test]
fn empty_source_is_just_eof() {
    let handler = Handler::new();
    let tokens = scan("", "t.jfm", &handler);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn only_whitespace_and_comments_is_just_eof() {
    let handler = Handler::new();
    let tokens = scan("   \n\t// comment\n/* block */\n", "t.jfm", &handler);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn exponent_without_following_digit_is_not_consumed() {
    let handler = Handler::new();
    let tokens = scan("1e", "t.jfm", &handler);
    // 'e' is not a valid identifier-continuation of a number here, so
    // it is tokenized separately: 1 then identifier 'e'.
    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
}

#[test]
fn crlf_line_endings_do_not_throw_off_column_tracking() {
    let handler = Handler::new();
    let tokens = scan("let x\r\n= 1;", "t.jfm", &handler);
    // the '=' sits at column 1 of line 2
    let eq_tok = tokens.iter().find(|t| t.kind == TokenKind::Eq).unwrap();
    assert_eq!(eq_tok.line, 2);
    assert_eq!(eq_tok.column, 1);
}

proptest! {
    #[test]
    fn identifiers_round_trip_their_lexeme(name in "[a-zA-Z_][a-zA-Z0-9_]{0,8}") {
        // avoid generating an accidental keyword
        if crate::token::keyword_from_ident(&name).is_some() {
            return Ok(());
        }
        let handler = Handler::new();
        let tokens = scan(&name, "t.jfm", &handler);
        prop_assert_eq!(tokens[0].kind, TokenKind::Identifier);
        let span = Span::new(tokens[0].lexeme.start, tokens[0].lexeme.end);
        prop_assert_eq!(span.as_str(&name), name.as_str());
    }

    #[test]
    fn every_non_error_non_eof_token_lexeme_matches_source_slice(src in "[a-z ]{0,40}") {
        let handler = Handler::new();
        let tokens = scan(&src, "t.jfm", &handler);
        for tok in &tokens {
            if matches!(tok.kind, TokenKind::Eof | TokenKind::Error) {
                continue;
            }
            let recovered = tok.lexeme.as_str(&src);
            prop_assert!(!recovered.is_empty());
        }
    }
}

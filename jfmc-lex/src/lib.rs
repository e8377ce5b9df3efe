//! jfmc-lex - turns SL source text into an EOF-terminated token
//! stream with precise line/column positions.

mod cursor;
mod lexer;
mod token;

#[cfg(test)]
mod edge_cases;

pub use lexer::{scan, Lexer};
pub use token::{keyword_from_ident, Span, Token, TokenKind, TokenLiteral};

//! The lexer: source text to a `Vec<Token>`.
//!
//! One pass, single-threaded, one token produced per call to
//! `next_token`, dispatching per leading character. On an
//! unrecognized character or a malformed literal the lexer pushes a
//! diagnostic, emits a single `Error` token, and stops — it does not
//! attempt to recover and keep scanning.

use jfmc_util::{Diagnostic, Handler, Location};

use crate::cursor::Cursor;
use crate::token::{keyword_from_ident, Span, Token, TokenKind, TokenLiteral};

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    handler: &'a Handler,
    file: std::path::PathBuf,
    token_start: usize,
    token_line: u32,
    token_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: impl Into<std::path::PathBuf>, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            source,
            handler,
            file: file.into(),
            token_start: 0,
            token_line: 1,
            token_column: 1,
        }
    }

    fn mark_start(&mut self) {
        self.token_start = self.cursor.position();
        self.token_line = self.cursor.line();
        self.token_column = self.cursor.column();
    }

    fn make(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            lexeme: Span::new(self.token_start, self.cursor.position()),
            line: self.token_line,
            column: self.token_column,
            literal: None,
        }
    }

    fn make_literal(&self, kind: TokenKind, literal: TokenLiteral) -> Token {
        Token {
            literal: Some(literal),
            ..self.make(kind)
        }
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.handler.push(Diagnostic::error(
            message,
            self.file.clone(),
            Location::new(self.token_line, self.token_column),
        ));
        self.make(TokenKind::Error)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_char(1) == '/' => {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                '/' if self.cursor.peek_char(1) == '*' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    while !self.cursor.is_at_end()
                        && !(self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/')
                    {
                        self.cursor.advance();
                    }
                    if !self.cursor.is_at_end() {
                        self.cursor.advance();
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.mark_start();

        if self.cursor.is_at_end() {
            return self.make(TokenKind::Eof);
        }

        let c = self.cursor.current_char();
        match c {
            '(' => { self.cursor.advance(); self.make(TokenKind::LParen) }
            ')' => { self.cursor.advance(); self.make(TokenKind::RParen) }
            '{' => { self.cursor.advance(); self.make(TokenKind::LBrace) }
            '}' => { self.cursor.advance(); self.make(TokenKind::RBrace) }
            '[' => { self.cursor.advance(); self.make(TokenKind::LBracket) }
            ']' => { self.cursor.advance(); self.make(TokenKind::RBracket) }
            ';' => { self.cursor.advance(); self.make(TokenKind::Semicolon) }
            ',' => { self.cursor.advance(); self.make(TokenKind::Comma) }

            '+' => { self.cursor.advance(); self.lex_maybe_eq('=', TokenKind::PlusEq, TokenKind::Plus) }
            '-' => self.lex_minus(),
            '*' => { self.cursor.advance(); self.lex_maybe_eq('=', TokenKind::StarEq, TokenKind::Star) }
            '/' => { self.cursor.advance(); self.lex_maybe_eq('=', TokenKind::SlashEq, TokenKind::Slash) }
            '%' => { self.cursor.advance(); self.make(TokenKind::Percent) }
            '=' => { self.cursor.advance(); self.lex_maybe_eq('=', TokenKind::EqEq, TokenKind::Eq) }
            '!' => { self.cursor.advance(); self.lex_maybe_eq('=', TokenKind::NotEq, TokenKind::Bang) }
            '<' => self.lex_angle('<', TokenKind::LtEq, TokenKind::Shl, TokenKind::Lt),
            '>' => self.lex_angle('>', TokenKind::GtEq, TokenKind::Shr, TokenKind::Gt),
            '&' => { self.cursor.advance(); self.lex_maybe_eq('&', TokenKind::AndAnd, TokenKind::Amp) }
            '|' => { self.cursor.advance(); self.lex_maybe_eq('|', TokenKind::OrOr, TokenKind::Pipe) }
            '^' => { self.cursor.advance(); self.make(TokenKind::Caret) }
            ':' => { self.cursor.advance(); self.lex_maybe_eq(':', TokenKind::ColonColon, TokenKind::Colon) }
            '.' => self.lex_dot(),

            '"' => self.lex_string(),
            '\'' => self.lex_char(),

            c if c.is_ascii_digit() => self.lex_number(),
            c if is_ident_start(c) => self.lex_identifier(),

            other => {
                self.cursor.advance();
                self.error(format!("unexpected character '{other}'"))
            }
        }
    }

    fn lex_maybe_eq(&mut self, expect: char, if_present: TokenKind, otherwise: TokenKind) -> Token {
        if self.cursor.advance_if(expect) {
            self.make(if_present)
        } else {
            self.make(otherwise)
        }
    }

    fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.advance_if('>') {
            self.make(TokenKind::Arrow)
        } else if self.cursor.advance_if('=') {
            self.make(TokenKind::MinusEq)
        } else {
            self.make(TokenKind::Minus)
        }
    }

    fn lex_angle(&mut self, same: char, eq_kind: TokenKind, double_kind: TokenKind, single_kind: TokenKind) -> Token {
        self.cursor.advance();
        if self.cursor.advance_if('=') {
            self.make(eq_kind)
        } else if self.cursor.advance_if(same) {
            self.make(double_kind)
        } else {
            self.make(single_kind)
        }
    }

    fn lex_dot(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.advance_if('.') {
            self.make(TokenKind::DotDot)
        } else {
            self.make(TokenKind::Dot)
        }
    }

    fn lex_number(&mut self) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_float = false;

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            is_float = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        if matches!(self.cursor.current_char(), 'e' | 'E') {
            let mut lookahead = 1;
            if matches!(self.cursor.peek_char(1), '+' | '-') {
                lookahead = 2;
            }
            if self.cursor.peek_char(lookahead).is_ascii_digit() {
                is_float = true;
                self.cursor.advance();
                if matches!(self.cursor.current_char(), '+' | '-') {
                    self.cursor.advance();
                }
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
        }

        let text = Span::new(self.token_start, self.cursor.position()).as_str(self.source);
        if is_float {
            match text.parse::<f64>() {
                Ok(v) => self.make_literal(TokenKind::FloatLiteral, TokenLiteral::Float(v)),
                Err(_) => self.error(format!("invalid float literal '{text}'")),
            }
        } else {
            match text.parse::<i64>() {
                Ok(v) => self.make_literal(TokenKind::IntLiteral, TokenLiteral::Int(v)),
                Err(_) => self.error(format!("invalid integer literal '{text}'")),
            }
        }
    }

    fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = Span::new(self.token_start, self.cursor.position()).as_str(self.source);
        match keyword_from_ident(text) {
            Some(TokenKind::True) => self.make_literal(TokenKind::True, TokenLiteral::Bool(true)),
            Some(TokenKind::False) => self.make_literal(TokenKind::False, TokenLiteral::Bool(false)),
            Some(kind) => self.make(kind),
            None => self.make(TokenKind::Identifier),
        }
    }

    fn decode_escape(&mut self) -> Option<char> {
        match self.cursor.current_char() {
            'n' => { self.cursor.advance(); Some('\n') }
            't' => { self.cursor.advance(); Some('\t') }
            'r' => { self.cursor.advance(); Some('\r') }
            '\\' => { self.cursor.advance(); Some('\\') }
            '\'' => { self.cursor.advance(); Some('\'') }
            '"' => { self.cursor.advance(); Some('"') }
            '0' => { self.cursor.advance(); Some('\0') }
            _ => None,
        }
    }

    fn lex_char(&mut self) -> Token {
        self.cursor.advance(); // opening '
        let value = if self.cursor.current_char() == '\\' {
            self.cursor.advance();
            match self.decode_escape() {
                Some(c) => c,
                None => return self.error("invalid escape sequence in character literal"),
            }
        } else if self.cursor.is_at_end() || self.cursor.current_char() == '\'' {
            return self.error("empty character literal");
        } else {
            self.cursor.advance()
        };
        if !self.cursor.advance_if('\'') {
            return self.error("unterminated character literal");
        }
        self.make_literal(TokenKind::CharLiteral, TokenLiteral::Char(value))
    }

    fn lex_string(&mut self) -> Token {
        self.cursor.advance(); // opening "
        loop {
            if self.cursor.is_at_end() {
                return self.error("unterminated string literal");
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    if self.cursor.is_at_end() {
                        return self.error("unterminated string literal");
                    }
                    self.cursor.advance();
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
        self.make(TokenKind::StrLiteral)
    }
}

/// Scans `source` completely, returning every token produced
/// (terminated by `Eof` on success, or by a single `Error` token if
/// scanning aborted early). Diagnostics are pushed to `handler` as
/// they're found.
pub fn scan(source: &str, file: impl Into<std::path::PathBuf>, handler: &Handler) -> Vec<Token> {
    let mut lexer = Lexer::new(source, file, handler);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let stop = matches!(token.kind, TokenKind::Eof | TokenKind::Error);
        tokens.push(token);
        if stop {
            break;
        }
    }
    tokens
}

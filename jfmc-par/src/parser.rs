//! The parser's token cursor: position tracking, lookahead, panic-mode
//! recovery, and the progress guards that defend list-parsing loops
//! against a grammar bug stalling forever. Grammar-specific parsing
//! (items, statements, expressions, types) lives in the sibling
//! modules; this one is just the shared machinery they all call.

use jfmc_util::{Diagnostic, Handler, Location};

use jfmc_lex::{Token, TokenKind};

/// Maximum call-depth of a postfix chain (`a.b.c[0](1)(2)...`) before
/// the parser gives up and diagnoses rather than recursing forever on
/// a pathological or buggy token stream.
pub const MAX_POSTFIX_CHAIN: usize = 256;

/// Maximum length of a list-parsing loop (struct fields, function
/// parameters, top-level declarations, ...) before the stuck-position
/// detector forces advancement.
pub const MAX_LIST_ITEMS: usize = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanicState {
    Normal,
    Panic,
}

pub struct Parser<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    panic: PanicState,
    pub(crate) handler: &'a Handler,
    pub(crate) file: std::path::PathBuf,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, source: &'a str, file: impl Into<std::path::PathBuf>, handler: &'a Handler) -> Self {
        Self {
            tokens,
            source,
            pos: 0,
            panic: PanicState::Normal,
            handler,
            file: file.into(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| self.tokens.last().unwrap())
    }

    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn previous(&self) -> &Token {
        let idx = self.pos.saturating_sub(1);
        &self.tokens[idx]
    }

    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    pub fn lexeme(&self, token: &Token) -> &'a str {
        token.lexeme_str(self.source)
    }

    pub fn loc(&self, token: &Token) -> Location {
        Location::new(token.line, token.column)
    }

    pub fn current_loc(&self) -> Location {
        self.loc(self.current())
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Looks at the token `offset` positions ahead without consuming
    /// anything.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.pos + offset)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    pub fn advance(&mut self) -> Token {
        let tok = *self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it has `kind`, else reports a
    /// diagnostic and enters panic mode. Returns the consumed token on
    /// success.
    pub fn expect(&mut self, kind: TokenKind, what: &str) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            let found = format!("{:?}", self.current_kind());
            self.error(format!("expected {what}, found {found}"));
            None
        }
    }

    /// Records a diagnostic unless the parser is already in panic
    /// mode, in which case the diagnostic is suppressed to avoid a
    /// cascade of errors caused by a single malformed construct.
    pub fn error(&mut self, message: impl Into<String>) {
        if self.panic == PanicState::Normal {
            self.handler.push(Diagnostic::error(message, self.file.clone(), self.current_loc()));
            self.panic = PanicState::Panic;
        }
    }

    pub fn in_panic(&self) -> bool {
        self.panic == PanicState::Panic
    }

    /// Advances past tokens until just after a `;` or up to (not past)
    /// a statement-starting keyword, exiting panic mode either way.
    pub fn synchronize(&mut self) {
        self.panic = PanicState::Normal;
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if matches!(
                self.current_kind(),
                TokenKind::Fn
                    | TokenKind::Let
                    | TokenKind::If
                    | TokenKind::While
                    | TokenKind::For
                    | TokenKind::Loop
                    | TokenKind::Return
                    | TokenKind::Break
                    | TokenKind::Continue
                    | TokenKind::Struct
                    | TokenKind::Impl
            ) {
                return;
            }
            self.advance();
        }
    }
}

//! Diagnostics.
//!
//! Every stage from the lexer onward reports problems the same way:
//! it pushes a [`Diagnostic`] onto a shared [`Handler`] and keeps
//! going rather than unwinding, so a single run can report more than
//! one error — the lexer, parser, and analyzer all continue past the
//! first fault and report everything they find. The driver asks
//! `Handler::has_errors()` once, after each stage, to decide whether
//! to proceed to the next one.
//!
//! [`DiagnosticBuilder`] exists because constructing a `Diagnostic`
//! inline at every call site is noisy once a handful of call sites
//! need one. Rendering is deliberately plain text (`file:line:column:
//! message`) — colorized, caret-underlined output is an external
//! concern this crate does not own.

use crate::span::{Location, SourceFile};
use std::fmt;
use std::path::PathBuf;

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single compiler diagnostic: a message anchored to a file and a
/// source position.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub file: PathBuf,
    pub location: Location,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, file: impl Into<PathBuf>, location: Location) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            file: file.into(),
            location,
        }
    }

    pub fn warning(message: impl Into<String>, file: impl Into<PathBuf>, location: Location) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            file: file.into(),
            location,
        }
    }

    /// Renders the one-line form (`Display`) followed by the offending
    /// source line and a caret under the reported column, the way
    /// `rustc`-style renderers annotate a diagnostic with its context.
    /// `source` is the file this diagnostic's location was recorded
    /// against; the caller is responsible for matching the two up.
    pub fn render_with_source(&self, source: &SourceFile) -> String {
        let line_text = source.line(self.location.line);
        let caret_offset = self.location.column.saturating_sub(1) as usize;
        format!("{self}\n  {line_text}\n  {:caret_offset$}^", "")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.file.display(),
            self.location,
            self.level,
            self.message
        )
    }
}

/// A fluent helper for building a [`Diagnostic`] at a call site that
/// already knows its file and location and just needs to compose a
/// message, e.g. from the semantic analyzer:
///
/// ```ignore
/// DiagnosticBuilder::error("undeclared variable 'x'", file, loc).emit(handler);
/// ```
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    file: PathBuf,
    location: Location,
}

impl DiagnosticBuilder {
    pub fn error(message: impl Into<String>, file: impl Into<PathBuf>, location: Location) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            file: file.into(),
            location,
        }
    }

    pub fn warning(message: impl Into<String>, file: impl Into<PathBuf>, location: Location) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            file: file.into(),
            location,
        }
    }

    pub fn note(mut self, extra: impl AsRef<str>) -> Self {
        self.message.push_str(" (");
        self.message.push_str(extra.as_ref());
        self.message.push(')');
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            file: self.file,
            location: self.location,
        }
    }

    pub fn emit(self, handler: &Handler) {
        handler.push(self.build());
    }
}

/// Collects diagnostics across a compilation stage. Shared by
/// reference between the lexer, parser, and semantic analyzer so that
/// a single run accumulates every error they find rather than
/// stopping at the first one.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: std::cell::RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

//! The diagnostic channel: `(file, line, severity, text)` messages that
//! accumulate across a whole assembly run and suppress object output.

use std::fmt::Display;

use serde::Serialize;

/// The only severity the reference implementation ever emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
        }
    }
}

/// A single assembler message, optionally attached to a source location.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub file: Option<String>,
    /// 0-based internally; rendered 1-based by [`Diagnostic::render`].
    pub line: Option<usize>,
    pub severity: Severity,
    pub text: String,
}

impl Diagnostic {
    pub fn error(file: Option<&str>, line: Option<usize>, text: impl Into<String>) -> Self {
        Diagnostic {
            file: file.map(str::to_owned),
            line,
            severity: Severity::Error,
            text: text.into(),
        }
    }

    /// Renders this diagnostic as `<file>:<line+1>: <severity>: <text>`,
    /// omitting the file/line prefix entirely when either is absent.
    pub fn render(&self) -> String {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => {
                format!("{file}:{}: {}: {}", line + 1, self.severity, self.text)
            }
            _ => format!("{}: {}", self.severity, self.text),
        }
    }
}

/// A growing list of diagnostics shared across the whole assembly run.
///
/// Matching/encoding continue even once this is non-empty, so that a single
/// run reports every problem it finds rather than stopping at the first one.
#[derive(Debug, Default)]
pub struct DiagnosticChannel {
    messages: Vec<Diagnostic>,
}

impl DiagnosticChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.messages.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Diagnostic> {
        self.messages
    }
}

//! Problems found while compiling a song, reported to the user.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub column: Option<usize>,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn warning(line: usize, column: Option<usize>, message: impl Into<String>) -> Diagnostic {
        Diagnostic {
            line,
            column,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(line: usize, column: Option<usize>, message: impl Into<String>) -> Diagnostic {
        Diagnostic {
            line,
            column,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

// The form shown directly to an end user.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {} — {}", self.line, self.message)
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn user_facing_message() {
        let diagnostic = Diagnostic::warning(12, Some(1), "Unknown directive: {foo}");
        assert_eq!(diagnostic.to_string(), "Line 12 — Unknown directive: {foo}");
        assert!(!diagnostic.is_error());
        assert!(Diagnostic::error(3, None, "Parse error: boom").is_error());
    }
}

//! Diagnostic types.

use std::fmt;

use trango_ir::SourceLocation;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
    Help,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
            Severity::Help => write!(f, "help"),
        }
    }
}

/// One diagnostic: a code, a message, and the location it points at.
#[derive(Clone, PartialEq, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub loc: SourceLocation,
    /// Optional `help:` hint printed under the snippet.
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the code's default severity.
    pub fn new(code: ErrorCode, message: impl Into<String>, loc: SourceLocation) -> Self {
        Diagnostic {
            code,
            severity: code.severity(),
            message: message.into(),
            loc,
            help: None,
        }
    }

    /// Attach a help hint.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Whether this diagnostic is an error (vs. warning/note/help).
    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// The one-line summary: `error[E3001]: message`.
    pub fn summary(&self) -> String {
        format!("{}[{}]: {}", self.severity, self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_format() {
        let diag = Diagnostic::new(
            ErrorCode::E3001,
            "decorators are not supported",
            SourceLocation::synthetic(),
        );
        assert_eq!(diag.summary(), "error[E3001]: decorators are not supported");
        assert!(diag.is_error());
    }

    #[test]
    fn warnings_inherit_code_severity() {
        let diag = Diagnostic::new(ErrorCode::W4003, "lossy", SourceLocation::synthetic());
        assert_eq!(diag.severity, Severity::Warning);
        assert!(!diag.is_error());
    }
}

//! The diagnostic side-channel.
//!
//! Lowering, optimization, and emission never abort on a recoverable
//! problem; they append here and continue. The driver drains the queue
//! after the pipeline and decides (with the `strict` flag) whether the
//! module's output is usable.

use crate::{Diagnostic, Severity};

/// An append-only queue of diagnostics for one pipeline run.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        DiagnosticQueue::default()
    }

    /// Append a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Number of warning-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Whether any error-severity diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Borrow all recorded diagnostics in push order.
    pub fn all(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take ownership of the diagnostics, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Diagnostics sorted for display: grouped by file, then by
    /// position within the file.
    pub fn sorted_for_display(&self) -> Vec<Diagnostic> {
        let mut sorted = self.diagnostics.clone();
        sorted.sort_by(|a, b| {
            a.loc
                .file
                .cmp(&b.loc.file)
                .then(a.loc.start.line.cmp(&b.loc.start.line))
                .then(a.loc.start.column.cmp(&b.loc.start.column))
        });
        sorted
    }
}

//! Diagnostic output emitters.
//!
//! Two renderings of the same diagnostics: a human-readable terminal
//! form with snippets and carets, and a machine-readable JSON form.

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Something that can provide the source text for a file path, so the
/// terminal emitter can extract snippet lines. Sources are optional;
/// a missing source just skips the snippet.
pub trait SourceProvider {
    /// The full text of `path`, if available.
    fn source(&self, path: &str) -> Option<&str>;
}

/// A provider with no sources; diagnostics render header-only.
pub struct NoSources;

impl SourceProvider for NoSources {
    fn source(&self, _path: &str) -> Option<&str> {
        None
    }
}

/// Trait for diagnostic output destinations.
pub trait DiagnosticEmitter {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic, sources: &dyn SourceProvider);

    /// Emit a display-sorted batch (grouped by file).
    fn emit_batch(&mut self, diagnostics: &[Diagnostic], sources: &dyn SourceProvider) {
        for diagnostic in diagnostics {
            self.emit(diagnostic, sources);
        }
    }
}

/// Escape a string for inclusion in JSON output.
///
/// Kept by hand to avoid a serde dependency for machine output.
pub(crate) fn escape_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests;

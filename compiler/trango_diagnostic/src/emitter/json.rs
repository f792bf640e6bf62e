//! JSON Emitter
//!
//! Machine-readable diagnostic output in JSON format. JSON is built by
//! hand (shared `escape_json`) to keep machine output dependency-free.

use std::io::Write;

use crate::Diagnostic;

use super::{escape_json, DiagnosticEmitter, SourceProvider};

/// JSON emitter for machine-readable output.
pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    /// Create a new JSON emitter.
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        let _ = writeln!(self.writer, "\n]");
    }

    /// Consume the emitter and return its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, _sources: &dyn SourceProvider) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(
            self.writer,
            "    \"code\": \"{}\",",
            diagnostic.code.as_str()
        );
        let _ = writeln!(self.writer, "    \"severity\": \"{}\",", diagnostic.severity);
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(&diagnostic.message)
        );
        let _ = writeln!(
            self.writer,
            "    \"file\": \"{}\",",
            escape_json(&diagnostic.loc.file)
        );
        let _ = writeln!(
            self.writer,
            "    \"line\": {},",
            diagnostic.loc.start.line
        );
        let _ = write!(
            self.writer,
            "    \"column\": {}",
            diagnostic.loc.start.column
        );
        if let Some(help) = &diagnostic.help {
            let _ = write!(self.writer, ",\n    \"help\": \"{}\"", escape_json(help));
        }
        let _ = write!(self.writer, "\n  }}");
    }
}

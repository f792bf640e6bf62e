//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//!
//! ```text
//! error[E3001]: decorators are not supported
//!   --> src/app.ts:3:1
//!    |
//!  3 | @component
//!    | ^^^^^^^^^^
//!    = help: remove the decorator
//! ```

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

use super::{DiagnosticEmitter, SourceProvider};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean; `is_tty` decides the `Auto` case.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create an emitter with an explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Emitter writing to stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }

    /// Consume the emitter and return its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn severity_color(&self, severity: Severity) -> &'static str {
        if !self.colors {
            return "";
        }
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
            Severity::Help => colors::HELP,
        }
    }

    fn reset(&self) -> &'static str {
        if self.colors {
            colors::RESET
        } else {
            ""
        }
    }

    fn gutter(&self) -> &'static str {
        if self.colors {
            colors::GUTTER
        } else {
            ""
        }
    }

    fn bold(&self) -> &'static str {
        if self.colors {
            colors::BOLD
        } else {
            ""
        }
    }

    fn write_snippet(&mut self, diagnostic: &Diagnostic, source: &str) {
        let line_no = diagnostic.loc.start.line;
        let Some(line) = source.lines().nth(line_no.saturating_sub(1) as usize) else {
            return;
        };

        let gutter_width = line_no.to_string().len();
        let col = diagnostic.loc.start.column.max(1) as usize;
        // Caret width spans the location when it stays on one line.
        let width = if diagnostic.loc.end.line == line_no {
            (diagnostic.loc.end.column.saturating_sub(diagnostic.loc.start.column)).max(1) as usize
        } else {
            1
        };

        let g = self.gutter();
        let r = self.reset();
        let _ = writeln!(self.writer, "{g}{:>gutter_width$} |{r}", "");
        let _ = writeln!(self.writer, "{g}{line_no:>gutter_width$} |{r} {line}");
        let _ = writeln!(
            self.writer,
            "{g}{:>gutter_width$} |{r} {:>pad$}{}",
            "",
            "",
            "^".repeat(width),
            pad = col.saturating_sub(1),
        );
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic, sources: &dyn SourceProvider) {
        let color = self.severity_color(diagnostic.severity);
        let reset = self.reset();
        let bold = self.bold();

        let _ = writeln!(
            self.writer,
            "{color}{}[{}]{reset}{bold}: {}{reset}",
            diagnostic.severity, diagnostic.code, diagnostic.message
        );
        let _ = writeln!(self.writer, "  --> {}", diagnostic.loc);

        if !diagnostic.loc.is_synthetic() {
            if let Some(source) = sources.source(&diagnostic.loc.file) {
                self.write_snippet(diagnostic, source);
            }
        }

        if let Some(help) = &diagnostic.help {
            let help_color = self.severity_color(Severity::Help);
            let _ = writeln!(self.writer, "   = {help_color}help{reset}: {help}");
        }
        let _ = writeln!(self.writer);
    }
}

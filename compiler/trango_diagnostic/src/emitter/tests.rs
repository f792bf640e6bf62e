use std::sync::Arc;

use pretty_assertions::assert_eq;
use trango_ir::{Pos, SourceLocation};

use super::{ColorMode, DiagnosticEmitter, JsonEmitter, SourceProvider, TerminalEmitter};
use crate::{Diagnostic, ErrorCode};

struct OneFile {
    path: &'static str,
    text: &'static str,
}

impl SourceProvider for OneFile {
    fn source(&self, path: &str) -> Option<&str> {
        (path == self.path).then_some(self.text)
    }
}

fn diag_at(line: u32, column: u32, len: u32) -> Diagnostic {
    let loc = SourceLocation::new(
        Arc::from("app.ts"),
        Pos::new(line, column, 0),
        Pos::new(line, column + len, len),
    );
    Diagnostic::new(ErrorCode::E3001, "decorators are not supported", loc)
        .with_help("remove the decorator")
}

#[test]
fn terminal_renders_header_snippet_and_help() {
    let sources = OneFile {
        path: "app.ts",
        text: "const x = 1;\n@component\nclass C {}\n",
    };
    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit(&diag_at(2, 1, 10), &sources);
    let out = String::from_utf8(emitter.into_writer()).unwrap_or_default();

    assert!(out.starts_with("error[E3001]: decorators are not supported\n"));
    assert!(out.contains("  --> app.ts:2:1\n"));
    assert!(out.contains("2 | @component\n"));
    assert!(out.contains("| ^^^^^^^^^^\n"));
    assert!(out.contains("help: remove the decorator"));
}

#[test]
fn terminal_skips_snippet_without_source() {
    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit(&diag_at(2, 1, 10), &super::NoSources);
    let out = String::from_utf8(emitter.into_writer()).unwrap_or_default();
    assert!(out.contains("--> app.ts:2:1"));
    assert!(!out.contains('^'));
}

#[test]
fn json_emits_escaped_fields() {
    let mut diagnostic = diag_at(1, 1, 1);
    diagnostic.message = "bad \"thing\"".to_string();

    let mut emitter = JsonEmitter::new(Vec::new());
    emitter.begin();
    emitter.emit(&diagnostic, &super::NoSources);
    emitter.end();
    let out = String::from_utf8(emitter.into_writer()).unwrap_or_default();

    assert!(out.contains(r#""code": "E3001""#));
    assert!(out.contains(r#""message": "bad \"thing\"""#));
    assert!(out.contains(r#""file": "app.ts""#));
    assert!(out.trim_end().ends_with(']'));
}

#[test]
fn escape_json_controls() {
    assert_eq!(super::escape_json("a\tb\nc"), "a\\tb\\nc");
    assert_eq!(super::escape_json("q\"\\"), "q\\\"\\\\");
}

//! Diagnostics for the trango transpiler core.
//!
//! The pipeline never aborts a module on a recoverable problem: every
//! stage appends to a [`DiagnosticQueue`] side-channel and continues,
//! leaving a placeholder at the point of failure. The driver decides
//! what to do with the collected diagnostics (and aborts only under
//! `strict`).
//!
//! Codes are phase-ranged (`E1xxx` syntax-stage, `E2xxx` type-system,
//! `E3xxx` unsupported construct, `W4xxx` semantics-affecting warning)
//! and render either human-readable (snippet + caret) or as JSON.

mod diagnostic;
pub mod emitter;
mod error_code;
mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, NoSources, SourceProvider, TerminalEmitter};
pub use error_code::ErrorCode;
pub use queue::DiagnosticQueue;

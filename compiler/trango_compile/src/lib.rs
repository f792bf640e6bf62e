//! The per-module compile pipeline.
//!
//! Drives the three core stages for one typed source file:
//!
//! ```text
//! typed AST → lower → IR → optimizer passes → IR → emit → Go source
//! ```
//!
//! Each stage appends recoverable problems to the shared diagnostic
//! side-channel and keeps going; in strict mode an error-severity
//! diagnostic fails the module instead. The pipeline is sequential and
//! deterministic; an embedder compiling many modules runs one pipeline
//! per module, each with its own state.

use trango_ast::SourceFile;
use trango_config::{AsyncStrategy, Config};
use trango_diagnostic::{Diagnostic, DiagnosticQueue};
use trango_emit::SourceMap;

pub use trango_config as config;
pub use trango_emit::runtime_helper_source;

/// Everything the pipeline produces for one module.
#[derive(Clone, PartialEq, Debug)]
pub struct CompileOutput {
    /// The target source text.
    pub code: String,
    /// Standard-library packages the code requires, sorted.
    pub imports: std::collections::BTreeSet<String>,
    /// Raw source map, when `sourceMap` is set.
    pub source_map: Option<SourceMap>,
    /// The companion runtime helper package, when `generateRuntime`
    /// is set.
    pub runtime: Option<&'static str>,
    /// Everything the stages reported, in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Fatal pipeline failures. Only strict mode produces one; otherwise
/// problems surface as diagnostics on the output.
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error("module {module}: {errors} error(s) in strict mode")]
    Strict { module: String, errors: usize },
}

/// Compile one typed source file to target source.
pub fn compile_module(file: &SourceFile, config: &Config) -> Result<CompileOutput, CompileError> {
    let mut diagnostics = DiagnosticQueue::new();

    if config.async_strategy != AsyncStrategy::Sync {
        tracing::warn!(
            module = %file.name,
            strategy = ?config.async_strategy,
            "async strategy not implemented; lowering as sync"
        );
    }

    let module = trango_lower::lower_file(file, config, &mut diagnostics);
    fail_if_strict(&file.name, config, &diagnostics)?;

    let module = trango_opt::optimize(module, config.optimization_level);

    let result = trango_emit::emit_module(&module, config, &mut diagnostics);
    fail_if_strict(&file.name, config, &diagnostics)?;

    Ok(CompileOutput {
        code: result.code,
        imports: result.imports,
        source_map: result.source_map,
        runtime: config
            .generate_runtime
            .then(trango_emit::runtime_helper_source),
        diagnostics: diagnostics.drain(),
    })
}

fn fail_if_strict(
    module: &str,
    config: &Config,
    diagnostics: &DiagnosticQueue,
) -> Result<(), CompileError> {
    if config.strict && diagnostics.has_errors() {
        return Err(CompileError::Strict {
            module: module.to_string(),
            errors: diagnostics.error_count(),
        });
    }
    Ok(())
}

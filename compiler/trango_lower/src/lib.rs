//! AST → IR lowering.
//!
//! Transforms the frontend's typed AST into the semantic IR:
//!
//! - Variable statements split into one declaration per declarator
//! - Modifier string sets become `Modifiers` bitsets
//! - Class constructors are analyzed (`this.x = e` assignments and the
//!   `super(...)` call are recorded) so the emitter can synthesize
//!   factories without re-walking bodies
//! - Constructor parameters bearing visibility/`readonly` keywords are
//!   promoted to instance properties
//! - Accessors are renamed `get_X`/`set_X`
//! - Interface method signatures become properties of function type; a
//!   lone index signature becomes the `[index]` property
//! - Imports and exports are captured off the statement list
//!
//! Lowering never aborts: unsupported constructs lower to a placeholder
//! (`Identifier("unknown")`) with a diagnostic pushed to the
//! side-channel, and the pipeline continues.

mod decl;
mod expr;
mod stmt;
mod ty;

#[cfg(test)]
mod tests;

use trango_ast::{AstStatementKind, ModifierSet, SourceFile};
use trango_config::Config;
use trango_diagnostic::DiagnosticQueue;
use trango_ir::{Modifiers, Module};

/// Lower one typed source file to an IR module.
///
/// Diagnostics raised along the way land in `diagnostics`; the returned
/// module is always usable (placeholders stand in for anything that
/// could not be lowered).
pub fn lower_file(
    file: &SourceFile,
    config: &Config,
    diagnostics: &mut DiagnosticQueue,
) -> Module {
    let mut lowerer = Lowerer::new(file, config, diagnostics);
    let module = lowerer.lower();
    tracing::debug!(
        module = %module.name,
        statements_in = file.statements.len(),
        declarations_out = module.declarations().count(),
        "lowered module"
    );
    module
}

/// The lowering context for one source file.
pub(crate) struct Lowerer<'a> {
    pub(crate) file: &'a SourceFile,
    pub(crate) config: &'a Config,
    pub(crate) diagnostics: &'a mut DiagnosticQueue,
}

impl<'a> Lowerer<'a> {
    fn new(
        file: &'a SourceFile,
        config: &'a Config,
        diagnostics: &'a mut DiagnosticQueue,
    ) -> Self {
        Lowerer {
            file,
            config,
            diagnostics,
        }
    }

    fn lower(&mut self) -> Module {
        let file = self.file;
        let mut module = Module::new(file.name.clone(), file.path.clone());

        for statement in &file.statements {
            match &statement.kind {
                AstStatementKind::Import { source, specifiers } => {
                    module
                        .imports
                        .push(self.lower_import(source, specifiers, &statement.loc));
                }
                AstStatementKind::Export {
                    specifiers,
                    source,
                    is_default,
                } => {
                    module.exports.push(self.lower_export(
                        specifiers,
                        source.as_deref(),
                        *is_default,
                        &statement.loc,
                    ));
                }
                _ => {
                    let lowered = self.lower_statement(statement);
                    module.body.extend(lowered);
                }
            }
        }

        module
    }

    /// Convert a modifier string set into the IR bitset. Keywords the
    /// core does not model (`declare`, ...) are ignored.
    pub(crate) fn lower_modifiers(&self, set: &ModifierSet) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        for keyword in set.iter() {
            if let Some(flag) = Modifiers::from_keyword(keyword) {
                modifiers |= flag;
            }
        }
        modifiers
    }
}

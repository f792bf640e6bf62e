//! IR optimizer.
//!
//! An ordered list of passes, each a pure `Module → Module` function.
//! The pass list is fixed at initialization time from the optimization
//! level; reordering is a configuration decision, never a runtime one.
//!
//! - Level 0: no passes
//! - Level 1: dead-code elimination, constant folding
//! - Level 2: level 1 plus type simplification, control-flow
//!   normalization, and inlining
//!
//! Control-flow normalization and inlining are registered with
//! documented intent but run as identity transforms; level-1 output is
//! unaffected by their presence.

mod passes;

pub use passes::{
    ConstFold, ControlFlowNormalize, DeadCodeElimination, Inline, TypeSimplify,
};

use trango_config::OptLevel;
use trango_ir::Module;

/// One optimizer pass: a named, pure IR transformation.
pub trait Pass {
    /// Stable pass name, used in logs.
    fn name(&self) -> &'static str;

    /// Produce the transformed module. Implementations never mutate
    /// `module`; they build new nodes.
    fn run(&self, module: &Module) -> Module;
}

/// The pass list for an optimization level, in execution order.
pub fn passes_for_level(level: OptLevel) -> Vec<Box<dyn Pass>> {
    let mut passes: Vec<Box<dyn Pass>> = Vec::new();
    if level >= OptLevel::O1 {
        passes.push(Box::new(DeadCodeElimination));
        passes.push(Box::new(ConstFold));
    }
    if level >= OptLevel::O2 {
        passes.push(Box::new(TypeSimplify));
        passes.push(Box::new(ControlFlowNormalize));
        passes.push(Box::new(Inline));
    }
    passes
}

/// Run the level's passes over a module.
pub fn optimize(module: Module, level: OptLevel) -> Module {
    let mut current = module;
    for pass in passes_for_level(level) {
        let before = current.body.len();
        current = pass.run(&current);
        tracing::debug!(
            pass = pass.name(),
            module = %current.name,
            statements_before = before,
            statements_after = current.body.len(),
            "optimizer pass"
        );
    }
    current
}

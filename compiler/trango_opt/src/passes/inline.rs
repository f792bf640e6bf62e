//! Inlining (level 2).
//!
//! Intended scope: replacing calls to trivial single-return functions
//! with their bodies. Registered as an identity transform; correctness
//! of emitted code never depends on it.

use trango_ir::Module;

use crate::Pass;

pub struct Inline;

impl Pass for Inline {
    fn name(&self) -> &'static str {
        "inlining"
    }

    fn run(&self, module: &Module) -> Module {
        module.clone()
    }
}

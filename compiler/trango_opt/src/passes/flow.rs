//! Control-flow normalization (level 2).
//!
//! Intended scope: merging nested blocks, rewriting `while(true)` into
//! the target's bare loop form, and hoisting single-statement blocks.
//! Registered as an identity transform; level-1 output is already
//! well-formed without it.

use trango_ir::Module;

use crate::Pass;

pub struct ControlFlowNormalize;

impl Pass for ControlFlowNormalize {
    fn name(&self) -> &'static str {
        "control-flow-normalization"
    }

    fn run(&self, module: &Module) -> Module {
        module.clone()
    }
}

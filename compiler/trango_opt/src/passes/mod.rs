//! The pass implementations.

mod const_fold;
mod dce;
mod flow;
mod inline;
mod simplify;

pub use const_fold::ConstFold;
pub use dce::DeadCodeElimination;
pub use flow::ControlFlowNormalize;
pub use inline::Inline;
pub use simplify::TypeSimplify;

#[cfg(test)]
mod tests;

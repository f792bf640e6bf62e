//! Go source emitter for the trango transpiler.
//!
//! Walks a lowered, optimized IR module and produces target source: one
//! string per module, plus the set of standard-library packages the
//! code requires and, optionally, a raw source map.
//!
//! The emitter is a per-module state machine. It tracks indentation, an
//! import set, a tuple-type interning table, the current class context
//! (field visibility, per-field types), and the current receiver name
//! for `this` rewrites. `reset` clears everything between modules;
//! nothing persists across pipelines.
//!
//! All structural rewrites the target demands happen here:
//! classes become records with synthesized factories and hoisted
//! statics, unions become tagged records or marker interfaces, tuples
//! become interned named records, strict equality collapses, `??` and
//! the ternary become inline functions, try/catch becomes error returns
//! or panic/recover, and async functions gain a context parameter and
//! an error result.

mod alias;
mod class;
mod decl;
mod emitter;
mod enums;
mod expr;
mod func;
mod iface;
mod output;
mod runtime;
mod sourcemap;
mod stmt;
mod template;
mod tuples;


pub use emitter::{emit_module, EmitResult};
pub use runtime::runtime_helper_source;
pub use sourcemap::{RawMapping, SourceMap};

//! Type mapping for the trango transpiler.
//!
//! A pure function from [`trango_ir::IRType`] to the target type's
//! rendered form, under the strategy configuration. The mapper never
//! touches emitter state: composite types that need a named definition
//! (tuples, aliased unions/intersections) get their canonical *name*
//! here, and the emitter decides when to materialize the definition.
//!
//! Pipeline position: consulted by the emitter whenever it renders a
//! type annotation, a struct field, a function signature, or a tuple
//! literal.

mod builtins;
mod mapper;
mod tuple;

pub use builtins::builtin_reference;
pub use mapper::{
    capitalize, map_type, map_type_named, nullable, number_repr, simplify_union, Mapped,
    NumberShape,
};
pub use tuple::{sanitize_type_part, tuple_name};

//! Trango IR - Intermediate Representation Types
//!
//! This crate contains the semantic IR the transpiler pipeline passes
//! between its stages:
//! - Source locations attached to every node
//! - Modifier bitsets
//! - The type sum (`IRType`) with full nullability/generics information
//! - Expression, statement, and declaration trees
//! - `Module`, the per-file root node
//! - A visitor for generic traversal
//!
//! # Design Philosophy
//!
//! - **Own the tree**: every node is owned by exactly one parent
//!   (`Box`/`Vec`, never shared). Cross-declaration references are by
//!   name only and resolved against the module's declaration set.
//! - **No partial types**: a slot either has a type or is `None`
//!   (unknown); the emitter infers at `None` sites.
//! - **Locations everywhere**: lowering propagates the originating
//!   construct's location and synthesizes one only for composed nodes.

mod decl;
mod expr;
mod location;
mod modifier;
mod module;
mod operators;
mod stmt;
mod types;
pub mod visitor;

pub use decl::{
    ClassDecl, ClassMember, CtorAnalysis, Declaration, EnumDecl, EnumMember, FunctionDecl,
    InterfaceDecl, MethodMember, PropertyMember, TypeAliasDecl, TypeRef, VariableDecl, INDEX_PROP,
};
pub use expr::{Expr, ExprKind, FunctionExpr, Lit, ObjectProp};
pub use location::{Located, Pos, SourceLocation};
pub use modifier::Modifiers;
pub use module::{decl_stmt, Export, ExportSpec, Import, ImportSpec, Module};
pub use operators::{AssignOp, BinaryOp, UnaryOp};
pub use stmt::{CatchClause, Stmt, StmtKind, SwitchCase};
pub use types::{
    FunctionType, IRType, IndexSignature, LiteralValue, Parameter, PrimitiveKind,
    PropertySignature, TypeParameter,
};

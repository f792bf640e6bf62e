//! Trango AST - the frontend contract.
//!
//! The upstream parser and type checker are external to the core. This
//! crate pins down exactly what the core consumes from them:
//!
//! - A typed AST per source file ([`SourceFile`]) whose nodes carry the
//!   types the checker resolved
//! - A symbol table ([`SymbolTable`]) answering name → symbol queries
//! - Declaration modifiers as a string set ([`ModifierSet`])
//! - A source-location builder ([`LocationBuilder`])
//!
//! The AST is surface-shaped: variable statements still hold declarator
//! lists, classes still hold constructors and accessors, methods are
//! still methods. Lowering (`trango_lower`) is what flattens these into
//! the semantic IR.

mod expr;
mod file;
mod item;
mod location;
mod modifiers;
mod symbol;
mod ty;

pub use expr::{AstExpr, AstExprKind, AstLit, AstObjectProp, AstTemplate};
pub use file::SourceFile;
pub use item::{
    AstAccessorKind, AstCatch, AstClass, AstClassMember, AstDeclarator, AstEnumMember,
    AstExportSpecifier, AstFunction, AstImportSpecifier, AstInterface, AstInterfaceMember,
    AstParam, AstStatement, AstStatementKind, AstSwitchCase, AstTypeParam, VarKind,
};
pub use location::LocationBuilder;
pub use modifiers::ModifierSet;
pub use symbol::{Symbol, SymbolId, SymbolKind, SymbolTable};
pub use ty::{AstType, AstTypeMember};

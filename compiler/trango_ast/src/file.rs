//! The per-file root of the typed AST.

use crate::expr::AstExpr;
use crate::item::AstStatement;
use crate::symbol::SymbolTable;
use crate::ty::AstType;

/// One typed source file, as delivered by the frontend.
#[derive(Clone, PartialEq, Debug)]
pub struct SourceFile {
    /// Module name (usually the file stem).
    pub name: String,
    /// Path as reported in diagnostics and source maps.
    pub path: String,
    pub statements: Vec<AstStatement>,
    pub symbols: SymbolTable,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        SourceFile {
            name: name.into(),
            path: path.into(),
            statements: Vec::new(),
            symbols: SymbolTable::new(),
        }
    }

    /// The type the checker resolved for a node, if any.
    ///
    /// Types ride on the nodes themselves; this is the query-function
    /// form of the same information for callers holding a node.
    pub fn type_of<'a>(&self, expr: &'a AstExpr) -> Option<&'a AstType> {
        expr.ty.as_ref()
    }
}

//! Module, import, and export nodes.

use crate::decl::Declaration;
use crate::location::SourceLocation;
use crate::stmt::{Stmt, StmtKind};

/// One import specifier: `imported` bound locally as `local`.
#[derive(Clone, PartialEq, Debug)]
pub struct ImportSpec {
    pub imported: String,
    pub local: String,
    pub is_default: bool,
    pub is_namespace: bool,
}

impl ImportSpec {
    /// A named import `{ name }` (no rename).
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        ImportSpec {
            imported: name.clone(),
            local: name,
            is_default: false,
            is_namespace: false,
        }
    }
}

/// An import statement.
#[derive(Clone, PartialEq, Debug)]
pub struct Import {
    pub source: String,
    pub specs: Vec<ImportSpec>,
    pub loc: SourceLocation,
}

/// One export specifier: `local` exposed as `exported`.
#[derive(Clone, PartialEq, Debug)]
pub struct ExportSpec {
    pub local: String,
    pub exported: String,
}

/// An export statement (`export { a as b }`, `export ... from "m"`,
/// `export default ...`). Declarations exported inline carry the
/// `export` modifier instead and do not appear here.
#[derive(Clone, PartialEq, Debug)]
pub struct Export {
    pub specs: Vec<ExportSpec>,
    /// Module path for re-exports.
    pub source: Option<String>,
    pub is_default: bool,
    pub loc: SourceLocation,
}

/// Root IR node for one source file.
#[derive(Clone, PartialEq, Debug)]
pub struct Module {
    pub name: String,
    pub path: String,
    pub body: Vec<Stmt>,
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
}

impl Module {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            path: path.into(),
            body: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    /// Top-level declarations, in source order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.body.iter().filter_map(|stmt| stmt.kind.as_decl())
    }

    /// Find a top-level declaration by name.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations().find(|decl| decl.name() == name)
    }

    /// Whether a local name is bound by an import.
    pub fn imports_name(&self, name: &str) -> bool {
        self.imports
            .iter()
            .any(|import| import.specs.iter().any(|spec| spec.local == name))
    }

    /// Replace the body, keeping imports/exports. Used by optimizer
    /// passes, which build a new module rather than mutating in place.
    #[must_use]
    pub fn with_body(&self, body: Vec<Stmt>) -> Module {
        Module {
            name: self.name.clone(),
            path: self.path.clone(),
            body,
            imports: self.imports.clone(),
            exports: self.exports.clone(),
        }
    }
}

/// Convenience for wrapping a declaration in statement position.
pub fn decl_stmt(decl: Declaration, loc: SourceLocation) -> Stmt {
    Stmt::new(StmtKind::Decl(decl), loc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{Declaration, VariableDecl};
    use crate::modifier::Modifiers;

    fn var(name: &str) -> Declaration {
        Declaration::Variable(VariableDecl {
            name: name.to_string(),
            ty: None,
            init: None,
            is_const: true,
            modifiers: Modifiers::empty(),
            loc: SourceLocation::synthetic(),
        })
    }

    #[test]
    fn declaration_lookup() {
        let mut module = Module::new("m", "src/m.ts");
        module
            .body
            .push(decl_stmt(var("x"), SourceLocation::synthetic()));
        assert!(module.declaration("x").is_some());
        assert!(module.declaration("y").is_none());
    }

    #[test]
    fn import_binding_lookup() {
        let mut module = Module::new("m", "src/m.ts");
        module.imports.push(Import {
            source: "./util".to_string(),
            specs: vec![ImportSpec::named("helper")],
            loc: SourceLocation::synthetic(),
        });
        assert!(module.imports_name("helper"));
        assert!(!module.imports_name("other"));
    }
}

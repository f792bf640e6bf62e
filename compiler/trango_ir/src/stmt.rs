//! IR statements.

use crate::decl::Declaration;
use crate::expr::Expr;
use crate::location::{Located, SourceLocation};

/// Statement node.
#[derive(Clone, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub loc: SourceLocation,
}

impl Stmt {
    pub fn new(kind: StmtKind, loc: SourceLocation) -> Self {
        Stmt { kind, loc }
    }
}

impl Located for Stmt {
    fn loc(&self) -> &SourceLocation {
        &self.loc
    }
}

/// A `catch (param) { ... }` clause.
#[derive(Clone, PartialEq, Debug)]
pub struct CatchClause {
    pub param: Option<String>,
    pub body: Vec<Stmt>,
    pub loc: SourceLocation,
}

/// One `case`/`default` arm of a switch. `test` is `None` for `default`.
#[derive(Clone, PartialEq, Debug)]
pub struct SwitchCase {
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
    pub loc: SourceLocation,
}

/// Statement variants.
#[derive(Clone, PartialEq, Debug)]
pub enum StmtKind {
    /// `{ ... }`
    Block(Vec<Stmt>),

    /// Expression statement.
    Expr(Expr),

    /// `return expr?`
    Return(Option<Expr>),

    /// `if (cond) then else other`
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `while (cond) body`
    While { cond: Expr, body: Box<Stmt> },

    /// `for (init; cond; update) body`
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },

    /// `for (const binding of iterable) body`
    ForOf {
        binding: String,
        iterable: Expr,
        body: Box<Stmt>,
    },

    /// `try { block } catch { handler? } finally { finalizer? }`
    Try {
        block: Vec<Stmt>,
        handler: Option<CatchClause>,
        finalizer: Option<Vec<Stmt>>,
    },

    /// `throw expr`
    Throw(Expr),

    /// `switch (discriminant) { cases }`
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },

    /// A declaration in statement position. Module bodies are statement
    /// lists, so top-level declarations arrive through this variant.
    Decl(Declaration),
}

impl StmtKind {
    /// The declaration, if this statement is one.
    pub fn as_decl(&self) -> Option<&Declaration> {
        match self {
            StmtKind::Decl(decl) => Some(decl),
            _ => None,
        }
    }
}

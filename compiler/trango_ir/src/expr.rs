//! IR expressions.
//!
//! Every expression node owns its children (`Box`/`Vec`, tree not DAG)
//! and carries its source location plus the type the frontend inferred
//! for it, when one was available. Lowering preserves source shapes
//! (strict equality, optional chaining, `??`, prefix increments) and the
//! emitter performs the target rewrites.

use crate::location::{Located, SourceLocation};
use crate::operators::{AssignOp, BinaryOp, UnaryOp};
use crate::types::IRType;

/// A literal value.
#[derive(Clone, PartialEq, Debug)]
pub enum Lit {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// A property in an object literal.
#[derive(Clone, PartialEq, Debug)]
pub struct ObjectProp {
    pub key: String,
    pub value: Expr,
    /// `{ x }` shorthand for `{ x: x }`.
    pub shorthand: bool,
}

/// A function expression or arrow function body.
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionExpr {
    pub params: Vec<crate::types::Parameter>,
    pub ret: Option<IRType>,
    pub body: Vec<crate::stmt::Stmt>,
    pub is_async: bool,
}

/// Expression node: a kind, a location, and the inferred type if the
/// frontend resolved one.
#[derive(Clone, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub loc: SourceLocation,
    pub ty: Option<IRType>,
}

impl Expr {
    pub fn new(kind: ExprKind, loc: SourceLocation) -> Self {
        Expr {
            kind,
            loc,
            ty: None,
        }
    }

    /// Attach an inferred type.
    #[must_use]
    pub fn typed(mut self, ty: IRType) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Placeholder node lowered in place of an unsupported construct.
    pub fn unknown(loc: SourceLocation) -> Self {
        Expr::new(ExprKind::Identifier("unknown".to_string()), loc)
    }

    /// The identifier name, if this is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl Located for Expr {
    fn loc(&self) -> &SourceLocation {
        &self.loc
    }
}

/// Expression variants.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    /// Variable reference.
    Identifier(String),

    /// Literal value.
    Literal(Lit),

    /// `[a, b, c]`
    Array(Vec<Expr>),

    /// `{ k: v, ... }`
    Object(Vec<ObjectProp>),

    /// `function (..) { .. }`
    Function(FunctionExpr),

    /// `(..) => ..`
    Arrow(FunctionExpr),

    /// `callee(args...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },

    /// `obj.prop` / `obj[prop]` / `obj?.prop`
    Member {
        object: Box<Expr>,
        property: String,
        computed: bool,
        optional: bool,
    },

    /// `new Callee(args...)`
    New { callee: String, args: Vec<Expr> },

    /// `super` (only valid inside constructor bodies).
    Super,

    /// `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `op arg` / `arg op`
    Unary {
        op: UnaryOp,
        arg: Box<Expr>,
        prefix: bool,
    },

    /// `target op value`
    Assignment {
        op: AssignOp,
        target: Box<Expr>,
        value: Box<Expr>,
    },

    /// `cond ? then : other`
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        other: Box<Expr>,
    },

    /// `await expr`
    Await(Box<Expr>),

    /// `...expr`
    Spread(Box<Expr>),

    /// `` `a${x}b` ``. `quasis` has exactly one more element than
    /// `exprs`, interleaved `q0 e0 q1 e1 ... qn`.
    TemplateLiteral {
        quasis: Vec<String>,
        exprs: Vec<Expr>,
    },
}

impl ExprKind {
    /// Whether evaluating this expression can have side effects. Used by
    /// dead-code elimination to decide which module-level expression
    /// statements must be retained.
    pub fn has_side_effects(&self) -> bool {
        match self {
            ExprKind::Identifier(_) | ExprKind::Literal(_) | ExprKind::Super => false,
            ExprKind::Array(elems) => elems.iter().any(|e| e.kind.has_side_effects()),
            ExprKind::Object(props) => props.iter().any(|p| p.value.kind.has_side_effects()),
            ExprKind::Function(_) | ExprKind::Arrow(_) => false,
            ExprKind::Member { object, .. } => object.kind.has_side_effects(),
            ExprKind::Binary { left, right, .. } => {
                left.kind.has_side_effects() || right.kind.has_side_effects()
            }
            ExprKind::Conditional { cond, then, other } => {
                cond.kind.has_side_effects()
                    || then.kind.has_side_effects()
                    || other.kind.has_side_effects()
            }
            ExprKind::Spread(inner) => inner.kind.has_side_effects(),
            ExprKind::TemplateLiteral { exprs, .. } => {
                exprs.iter().any(|e| e.kind.has_side_effects())
            }
            ExprKind::Unary { op, arg, .. } => {
                matches!(op, UnaryOp::Increment | UnaryOp::Decrement | UnaryOp::Delete)
                    || arg.kind.has_side_effects()
            }
            // Calls, news, assignments, and awaits are conservatively
            // side-effectful.
            ExprKind::Call { .. }
            | ExprKind::New { .. }
            | ExprKind::Assignment { .. }
            | ExprKind::Await(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expr {
        Expr::new(
            ExprKind::Identifier(name.to_string()),
            SourceLocation::synthetic(),
        )
    }

    #[test]
    fn side_effect_classification() {
        let call = ExprKind::Call {
            callee: Box::new(ident("f")),
            args: vec![],
        };
        assert!(call.has_side_effects());

        let read = ExprKind::Member {
            object: Box::new(ident("o")),
            property: "p".to_string(),
            computed: false,
            optional: false,
        };
        assert!(!read.has_side_effects());

        let increment = ExprKind::Unary {
            op: UnaryOp::Increment,
            arg: Box::new(ident("n")),
            prefix: true,
        };
        assert!(increment.has_side_effects());
    }

    #[test]
    fn unknown_placeholder_is_an_identifier() {
        let placeholder = Expr::unknown(SourceLocation::synthetic());
        assert_eq!(placeholder.as_identifier(), Some("unknown"));
    }
}

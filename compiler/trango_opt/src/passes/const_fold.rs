//! Constant folding.
//!
//! Bottom-up folding of compile-time-known expressions: literal
//! arithmetic and string concatenation, boolean logic, comparisons over
//! literals, and dead-branch elimination for conditionals (and `if`
//! statements) with literal conditions. Enum member initializers fold
//! here too, which is what lets the emitter print them as constants.
//!
//! Scope is deliberately small: no compile-time function evaluation,
//! no algebraic simplification. An expression either folds completely
//! to a literal or stays untouched.

use trango_ir::{
    BinaryOp, CatchClause, ClassMember, Declaration, Expr, ExprKind, FunctionExpr, Lit, Module,
    ObjectProp, Parameter, Stmt, StmtKind, SwitchCase, UnaryOp,
};

use crate::Pass;

/// The level-1 folding pass.
pub struct ConstFold;

impl Pass for ConstFold {
    fn name(&self) -> &'static str {
        "constant-folding"
    }

    fn run(&self, module: &Module) -> Module {
        let body = module.body.iter().flat_map(fold_stmt).collect();
        module.with_body(body)
    }
}

/// Fold one statement. `if` statements with literal conditions reduce
/// to the taken branch, which is why one statement can fold to zero.
fn fold_stmt(stmt: &Stmt) -> Vec<Stmt> {
    let loc = stmt.loc.clone();
    let kind = match &stmt.kind {
        StmtKind::Block(body) => StmtKind::Block(fold_body(body)),
        StmtKind::Expr(expr) => StmtKind::Expr(fold_expr(expr)),
        StmtKind::Return(value) => StmtKind::Return(value.as_ref().map(fold_expr)),

        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            let cond = fold_expr(cond);
            if let ExprKind::Literal(Lit::Boolean(taken)) = cond.kind {
                return if taken {
                    fold_stmt(then_branch)
                } else {
                    else_branch.as_deref().map(fold_stmt).unwrap_or_default()
                };
            }
            StmtKind::If {
                cond,
                then_branch: Box::new(fold_single(then_branch)),
                else_branch: else_branch
                    .as_deref()
                    .map(|stmt| Box::new(fold_single(stmt))),
            }
        }

        StmtKind::While { cond, body } => StmtKind::While {
            cond: fold_expr(cond),
            body: Box::new(fold_single(body)),
        },

        StmtKind::For {
            init,
            cond,
            update,
            body,
        } => StmtKind::For {
            init: init.as_deref().map(|stmt| Box::new(fold_single(stmt))),
            cond: cond.as_ref().map(fold_expr),
            update: update.as_ref().map(fold_expr),
            body: Box::new(fold_single(body)),
        },

        StmtKind::ForOf {
            binding,
            iterable,
            body,
        } => StmtKind::ForOf {
            binding: binding.clone(),
            iterable: fold_expr(iterable),
            body: Box::new(fold_single(body)),
        },

        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => StmtKind::Try {
            block: fold_body(block),
            handler: handler.as_ref().map(|h| CatchClause {
                param: h.param.clone(),
                body: fold_body(&h.body),
                loc: h.loc.clone(),
            }),
            finalizer: finalizer.as_ref().map(|body| fold_body(body)),
        },

        StmtKind::Throw(expr) => StmtKind::Throw(fold_expr(expr)),

        StmtKind::Switch {
            discriminant,
            cases,
        } => StmtKind::Switch {
            discriminant: fold_expr(discriminant),
            cases: cases
                .iter()
                .map(|case| SwitchCase {
                    test: case.test.as_ref().map(fold_expr),
                    body: fold_body(&case.body),
                    loc: case.loc.clone(),
                })
                .collect(),
        },

        StmtKind::Decl(decl) => StmtKind::Decl(fold_decl(decl)),
    };
    vec![Stmt::new(kind, loc)]
}

fn fold_body(body: &[Stmt]) -> Vec<Stmt> {
    body.iter().flat_map(fold_stmt).collect()
}

/// Fold a statement that must stay single (loop bodies). A fold-away
/// produces an empty block.
fn fold_single(stmt: &Stmt) -> Stmt {
    let loc = stmt.loc.clone();
    let mut folded = fold_stmt(stmt);
    if folded.len() == 1 {
        folded.swap_remove(0)
    } else {
        Stmt::new(StmtKind::Block(folded), loc)
    }
}

fn fold_decl(decl: &Declaration) -> Declaration {
    match decl {
        Declaration::Variable(var) => {
            let mut var = var.clone();
            var.init = var.init.as_ref().map(fold_expr);
            Declaration::Variable(var)
        }
        Declaration::Function(func) => {
            let mut func = func.clone();
            func.params = fold_params(&func.params);
            func.body = func.body.as_ref().map(|body| fold_body(body));
            Declaration::Function(func)
        }
        Declaration::Class(class) => {
            let mut class = class.clone();
            class.members = class
                .members
                .iter()
                .map(|member| match member {
                    ClassMember::Property(prop) => {
                        let mut prop = prop.clone();
                        prop.init = prop.init.as_ref().map(fold_expr);
                        ClassMember::Property(prop)
                    }
                    ClassMember::Method(method) => {
                        let mut method = method.clone();
                        method.params = fold_params(&method.params);
                        method.body = method.body.as_ref().map(|body| fold_body(body));
                        ClassMember::Method(method)
                    }
                })
                .collect();
            Declaration::Class(class)
        }
        Declaration::Enum(decl) => {
            let mut decl = decl.clone();
            for member in &mut decl.members {
                member.value = member.value.as_ref().map(fold_expr);
            }
            Declaration::Enum(decl)
        }
        Declaration::Interface(_) | Declaration::TypeAlias(_) => decl.clone(),
    }
}

fn fold_params(params: &[Parameter]) -> Vec<Parameter> {
    params
        .iter()
        .map(|param| {
            let mut param = param.clone();
            param.default = param.default.as_ref().map(fold_expr);
            param
        })
        .collect()
}

/// Fold one expression bottom-up.
fn fold_expr(expr: &Expr) -> Expr {
    let kind = match &expr.kind {
        ExprKind::Identifier(_) | ExprKind::Literal(_) | ExprKind::Super => expr.kind.clone(),

        ExprKind::Array(elems) => ExprKind::Array(elems.iter().map(fold_expr).collect()),

        ExprKind::Object(props) => ExprKind::Object(
            props
                .iter()
                .map(|prop| ObjectProp {
                    key: prop.key.clone(),
                    value: fold_expr(&prop.value),
                    shorthand: prop.shorthand,
                })
                .collect(),
        ),

        ExprKind::Function(func) => ExprKind::Function(fold_function(func)),
        ExprKind::Arrow(func) => ExprKind::Arrow(fold_function(func)),

        ExprKind::Call { callee, args } => ExprKind::Call {
            callee: Box::new(fold_expr(callee)),
            args: args.iter().map(fold_expr).collect(),
        },

        ExprKind::Member {
            object,
            property,
            computed,
            optional,
        } => ExprKind::Member {
            object: Box::new(fold_expr(object)),
            property: property.clone(),
            computed: *computed,
            optional: *optional,
        },

        ExprKind::New { callee, args } => ExprKind::New {
            callee: callee.clone(),
            args: args.iter().map(fold_expr).collect(),
        },

        ExprKind::Binary { op, left, right } => {
            let left = fold_expr(left);
            let right = fold_expr(right);
            match try_fold_binary(*op, &left, &right) {
                Some(folded) => folded,
                None => ExprKind::Binary {
                    op: *op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            }
        }

        ExprKind::Unary { op, arg, prefix } => {
            let arg = fold_expr(arg);
            match try_fold_unary(*op, &arg) {
                Some(folded) => folded,
                None => ExprKind::Unary {
                    op: *op,
                    arg: Box::new(arg),
                    prefix: *prefix,
                },
            }
        }

        ExprKind::Assignment { op, target, value } => ExprKind::Assignment {
            op: *op,
            target: Box::new(fold_expr(target)),
            value: Box::new(fold_expr(value)),
        },

        ExprKind::Conditional { cond, then, other } => {
            let cond = fold_expr(cond);
            if let ExprKind::Literal(Lit::Boolean(taken)) = cond.kind {
                let chosen = if taken { then } else { other };
                return fold_expr(chosen);
            }
            ExprKind::Conditional {
                cond: Box::new(cond),
                then: Box::new(fold_expr(then)),
                other: Box::new(fold_expr(other)),
            }
        }

        ExprKind::Await(inner) => ExprKind::Await(Box::new(fold_expr(inner))),
        ExprKind::Spread(inner) => ExprKind::Spread(Box::new(fold_expr(inner))),

        ExprKind::TemplateLiteral { quasis, exprs } => ExprKind::TemplateLiteral {
            quasis: quasis.clone(),
            exprs: exprs.iter().map(fold_expr).collect(),
        },
    };

    let mut folded = Expr::new(kind, expr.loc.clone());
    folded.ty = expr.ty.clone();
    folded
}

fn fold_function(func: &FunctionExpr) -> FunctionExpr {
    FunctionExpr {
        params: fold_params(&func.params),
        ret: func.ret.clone(),
        body: fold_body(&func.body),
        is_async: func.is_async,
    }
}

fn try_fold_binary(op: BinaryOp, left: &Expr, right: &Expr) -> Option<ExprKind> {
    let (ExprKind::Literal(lhs), ExprKind::Literal(rhs)) = (&left.kind, &right.kind) else {
        // Short-circuit forms with a literal boolean left operand.
        if let ExprKind::Literal(Lit::Boolean(b)) = &left.kind {
            return match (op, b) {
                (BinaryOp::And, true) | (BinaryOp::Or, false) => Some(right.kind.clone()),
                (BinaryOp::And, false) => Some(ExprKind::Literal(Lit::Boolean(false))),
                (BinaryOp::Or, true) => Some(ExprKind::Literal(Lit::Boolean(true))),
                _ => None,
            };
        }
        // `lit ?? x` folds when the left is known (non-)nullish.
        if op == BinaryOp::Coalesce {
            match &left.kind {
                ExprKind::Literal(Lit::Null | Lit::Undefined) => return Some(right.kind.clone()),
                ExprKind::Literal(_) => return Some(left.kind.clone()),
                _ => return None,
            }
        }
        return None;
    };

    match (lhs, rhs) {
        (Lit::Number(a), Lit::Number(b)) => fold_numeric(op, *a, *b),
        (Lit::String(a), Lit::String(b)) => fold_string(op, a, b),
        (Lit::Boolean(a), Lit::Boolean(b)) => fold_boolean(op, *a, *b),
        _ => match op {
            BinaryOp::Coalesce => match lhs {
                Lit::Null | Lit::Undefined => Some(ExprKind::Literal(rhs.clone())),
                _ => Some(ExprKind::Literal(lhs.clone())),
            },
            _ => None,
        },
    }
}

fn fold_numeric(op: BinaryOp, a: f64, b: f64) -> Option<ExprKind> {
    let num = |value: f64| Some(ExprKind::Literal(Lit::Number(value)));
    let boolean = |value: bool| Some(ExprKind::Literal(Lit::Boolean(value)));
    match op {
        BinaryOp::Add => num(a + b),
        BinaryOp::Sub => num(a - b),
        BinaryOp::Mul => num(a * b),
        // Division and modulo by zero stay runtime expressions.
        BinaryOp::Div if b != 0.0 => num(a / b),
        BinaryOp::Mod if b != 0.0 => num(a % b),
        BinaryOp::Eq | BinaryOp::StrictEq => boolean(a == b),
        BinaryOp::NotEq | BinaryOp::StrictNotEq => boolean(a != b),
        BinaryOp::Lt => boolean(a < b),
        BinaryOp::LtEq => boolean(a <= b),
        BinaryOp::Gt => boolean(a > b),
        BinaryOp::GtEq => boolean(a >= b),
        _ => None,
    }
}

fn fold_string(op: BinaryOp, a: &str, b: &str) -> Option<ExprKind> {
    match op {
        BinaryOp::Add => Some(ExprKind::Literal(Lit::String(format!("{a}{b}")))),
        BinaryOp::Eq | BinaryOp::StrictEq => Some(ExprKind::Literal(Lit::Boolean(a == b))),
        BinaryOp::NotEq | BinaryOp::StrictNotEq => Some(ExprKind::Literal(Lit::Boolean(a != b))),
        _ => None,
    }
}

fn fold_boolean(op: BinaryOp, a: bool, b: bool) -> Option<ExprKind> {
    let boolean = |value: bool| Some(ExprKind::Literal(Lit::Boolean(value)));
    match op {
        BinaryOp::And => boolean(a && b),
        BinaryOp::Or => boolean(a || b),
        BinaryOp::Eq | BinaryOp::StrictEq => boolean(a == b),
        BinaryOp::NotEq | BinaryOp::StrictNotEq => boolean(a != b),
        _ => None,
    }
}

fn try_fold_unary(op: UnaryOp, arg: &Expr) -> Option<ExprKind> {
    let ExprKind::Literal(lit) = &arg.kind else {
        return None;
    };
    match (op, lit) {
        (UnaryOp::Neg, Lit::Number(n)) => Some(ExprKind::Literal(Lit::Number(-n))),
        (UnaryOp::Plus, Lit::Number(n)) => Some(ExprKind::Literal(Lit::Number(*n))),
        (UnaryOp::Not, Lit::Boolean(b)) => Some(ExprKind::Literal(Lit::Boolean(!b))),
        _ => None,
    }
}

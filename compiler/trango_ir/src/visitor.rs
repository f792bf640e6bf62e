//! IR visitor.
//!
//! Generic traversal over the IR tree. Default `visit_*` methods call
//! the `walk_*` free functions, which traverse children with exhaustive
//! matches over every node kind; adding a kind fails compilation until
//! every walk function handles it.
//!
//! The visitor may mutate its own state; the IR stays immutable.
//! Optimizer passes that rewrite the tree build new nodes instead.
//!
//! # Example
//!
//! ```
//! use trango_ir::visitor::{walk_expr, Visitor};
//! use trango_ir::{Expr, ExprKind};
//!
//! struct CountIdents(usize);
//!
//! impl Visitor for CountIdents {
//!     fn visit_expr(&mut self, expr: &Expr) {
//!         if matches!(expr.kind, ExprKind::Identifier(_)) {
//!             self.0 += 1;
//!         }
//!         walk_expr(self, expr);
//!     }
//! }
//! ```

use crate::decl::{
    ClassDecl, ClassMember, Declaration, EnumDecl, FunctionDecl, InterfaceDecl, MethodMember,
    PropertyMember, TypeAliasDecl, TypeRef, VariableDecl,
};
use crate::expr::{Expr, ExprKind, FunctionExpr};
use crate::module::{Export, Import, Module};
use crate::stmt::{CatchClause, Stmt, StmtKind, SwitchCase};
use crate::types::{FunctionType, IRType, Parameter, PropertySignature, TypeParameter};

/// IR visitor trait.
///
/// Override `visit_*` methods for custom behavior at specific nodes;
/// call the matching `walk_*` to continue into children.
pub trait Visitor: Sized {
    fn visit_module(&mut self, module: &Module) {
        walk_module(self, module);
    }

    fn visit_import(&mut self, import: &Import) {
        let _ = import;
    }

    fn visit_export(&mut self, export: &Export) {
        let _ = export;
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_decl(&mut self, decl: &Declaration) {
        walk_decl(self, decl);
    }

    fn visit_class_member(&mut self, member: &ClassMember) {
        walk_class_member(self, member);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_param(&mut self, param: &Parameter) {
        walk_param(self, param);
    }

    fn visit_type(&mut self, ty: &IRType) {
        walk_type(self, ty);
    }

    fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        walk_type_ref(self, type_ref);
    }
}

/// Walk a module: imports, exports, then body statements in order.
pub fn walk_module<V: Visitor>(visitor: &mut V, module: &Module) {
    for import in &module.imports {
        visitor.visit_import(import);
    }
    for export in &module.exports {
        visitor.visit_export(export);
    }
    for stmt in &module.body {
        visitor.visit_stmt(stmt);
    }
}

/// Walk a statement's children.
pub fn walk_stmt<V: Visitor>(visitor: &mut V, stmt: &Stmt) {
    match &stmt.kind {
        StmtKind::Block(body) => {
            for inner in body {
                visitor.visit_stmt(inner);
            }
        }
        StmtKind::Expr(expr) => visitor.visit_expr(expr),
        StmtKind::Return(value) => {
            if let Some(expr) = value {
                visitor.visit_expr(expr);
            }
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_stmt(then_branch);
            if let Some(other) = else_branch {
                visitor.visit_stmt(other);
            }
        }
        StmtKind::While { cond, body } => {
            visitor.visit_expr(cond);
            visitor.visit_stmt(body);
        }
        StmtKind::For {
            init,
            cond,
            update,
            body,
        } => {
            if let Some(stmt) = init {
                visitor.visit_stmt(stmt);
            }
            if let Some(expr) = cond {
                visitor.visit_expr(expr);
            }
            if let Some(expr) = update {
                visitor.visit_expr(expr);
            }
            visitor.visit_stmt(body);
        }
        StmtKind::ForOf {
            binding: _,
            iterable,
            body,
        } => {
            visitor.visit_expr(iterable);
            visitor.visit_stmt(body);
        }
        StmtKind::Try {
            block,
            handler,
            finalizer,
        } => {
            for inner in block {
                visitor.visit_stmt(inner);
            }
            if let Some(CatchClause { body, .. }) = handler {
                for inner in body {
                    visitor.visit_stmt(inner);
                }
            }
            if let Some(body) = finalizer {
                for inner in body {
                    visitor.visit_stmt(inner);
                }
            }
        }
        StmtKind::Throw(expr) => visitor.visit_expr(expr),
        StmtKind::Switch {
            discriminant,
            cases,
        } => {
            visitor.visit_expr(discriminant);
            for SwitchCase { test, body, .. } in cases {
                if let Some(expr) = test {
                    visitor.visit_expr(expr);
                }
                for inner in body {
                    visitor.visit_stmt(inner);
                }
            }
        }
        StmtKind::Decl(decl) => visitor.visit_decl(decl),
    }
}

/// Walk a declaration's children.
pub fn walk_decl<V: Visitor>(visitor: &mut V, decl: &Declaration) {
    match decl {
        Declaration::Variable(VariableDecl { ty, init, .. }) => {
            if let Some(ty) = ty {
                visitor.visit_type(ty);
            }
            if let Some(expr) = init {
                visitor.visit_expr(expr);
            }
        }
        Declaration::Function(FunctionDecl {
            params, ret, body, ..
        }) => {
            for param in params {
                visitor.visit_param(param);
            }
            if let Some(ty) = ret {
                visitor.visit_type(ty);
            }
            if let Some(body) = body {
                for stmt in body {
                    visitor.visit_stmt(stmt);
                }
            }
        }
        Declaration::Class(ClassDecl {
            extends,
            implements,
            members,
            ..
        }) => {
            if let Some(parent) = extends {
                visitor.visit_type_ref(parent);
            }
            for iface in implements {
                visitor.visit_type_ref(iface);
            }
            for member in members {
                visitor.visit_class_member(member);
            }
        }
        Declaration::Interface(InterfaceDecl { extends, props, .. }) => {
            for parent in extends {
                visitor.visit_type_ref(parent);
            }
            for prop in props {
                visitor.visit_type(&prop.ty);
            }
        }
        Declaration::TypeAlias(TypeAliasDecl { ty, .. }) => visitor.visit_type(ty),
        Declaration::Enum(EnumDecl { members, .. }) => {
            for member in members {
                if let Some(value) = &member.value {
                    visitor.visit_expr(value);
                }
            }
        }
    }
}

/// Walk a class member's children.
pub fn walk_class_member<V: Visitor>(visitor: &mut V, member: &ClassMember) {
    match member {
        ClassMember::Property(PropertyMember { ty, init, .. }) => {
            if let Some(ty) = ty {
                visitor.visit_type(ty);
            }
            if let Some(expr) = init {
                visitor.visit_expr(expr);
            }
        }
        ClassMember::Method(MethodMember {
            params, ret, body, ..
        }) => {
            for param in params {
                visitor.visit_param(param);
            }
            if let Some(ty) = ret {
                visitor.visit_type(ty);
            }
            if let Some(body) = body {
                for stmt in body {
                    visitor.visit_stmt(stmt);
                }
            }
        }
    }
}

/// Walk an expression's children.
pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    if let Some(ty) = &expr.ty {
        visitor.visit_type(ty);
    }
    match &expr.kind {
        ExprKind::Identifier(_) | ExprKind::Literal(_) | ExprKind::Super => {}
        ExprKind::Array(elems) => {
            for elem in elems {
                visitor.visit_expr(elem);
            }
        }
        ExprKind::Object(props) => {
            for prop in props {
                visitor.visit_expr(&prop.value);
            }
        }
        ExprKind::Function(func) | ExprKind::Arrow(func) => walk_function_expr(visitor, func),
        ExprKind::Call { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Member { object, .. } => visitor.visit_expr(object),
        ExprKind::New { callee: _, args } => {
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        ExprKind::Unary { arg, .. } => visitor.visit_expr(arg),
        ExprKind::Assignment { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        ExprKind::Conditional { cond, then, other } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(then);
            visitor.visit_expr(other);
        }
        ExprKind::Await(inner) | ExprKind::Spread(inner) => visitor.visit_expr(inner),
        ExprKind::TemplateLiteral { quasis: _, exprs } => {
            for hole in exprs {
                visitor.visit_expr(hole);
            }
        }
    }
}

fn walk_function_expr<V: Visitor>(visitor: &mut V, func: &FunctionExpr) {
    for param in &func.params {
        visitor.visit_param(param);
    }
    if let Some(ret) = &func.ret {
        visitor.visit_type(ret);
    }
    for stmt in &func.body {
        visitor.visit_stmt(stmt);
    }
}

/// Walk a parameter: its type and default value.
pub fn walk_param<V: Visitor>(visitor: &mut V, param: &Parameter) {
    if let Some(ty) = &param.ty {
        visitor.visit_type(ty);
    }
    if let Some(default) = &param.default {
        visitor.visit_expr(default);
    }
}

/// Walk a type's constituents.
pub fn walk_type<V: Visitor>(visitor: &mut V, ty: &IRType) {
    match ty {
        IRType::Primitive(_) | IRType::Literal(_) => {}
        IRType::Array(elem) => visitor.visit_type(elem),
        IRType::Tuple(elems) => {
            for elem in elems {
                visitor.visit_type(elem);
            }
        }
        IRType::Object { props, index } => {
            for PropertySignature { ty, .. } in props {
                visitor.visit_type(ty);
            }
            if let Some(sig) = index {
                visitor.visit_type(&sig.key);
                visitor.visit_type(&sig.value);
            }
        }
        IRType::Function(func) => walk_function_type(visitor, func),
        IRType::Union(arms) => {
            for arm in arms {
                visitor.visit_type(arm);
            }
        }
        IRType::Intersection(parts) => {
            for part in parts {
                visitor.visit_type(part);
            }
        }
        IRType::Reference { type_args, .. } => {
            for arg in type_args {
                visitor.visit_type(arg);
            }
        }
    }
}

fn walk_function_type<V: Visitor>(visitor: &mut V, func: &FunctionType) {
    for param in &func.params {
        visitor.visit_param(param);
    }
    visitor.visit_type(&func.ret);
    for TypeParameter {
        constraint,
        default,
        ..
    } in &func.type_params
    {
        if let Some(ty) = constraint {
            visitor.visit_type(ty);
        }
        if let Some(ty) = default {
            visitor.visit_type(ty);
        }
    }
}

/// Walk a heritage type reference's type arguments.
pub fn walk_type_ref<V: Visitor>(visitor: &mut V, type_ref: &TypeRef) {
    for arg in &type_ref.type_args {
        visitor.visit_type(arg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SourceLocation;

    struct CountIdents(usize);

    impl Visitor for CountIdents {
        fn visit_expr(&mut self, expr: &Expr) {
            if matches!(expr.kind, ExprKind::Identifier(_)) {
                self.0 += 1;
            }
            walk_expr(self, expr);
        }
    }

    fn ident(name: &str) -> Expr {
        Expr::new(
            ExprKind::Identifier(name.to_string()),
            SourceLocation::synthetic(),
        )
    }

    #[test]
    fn walks_nested_expressions() {
        let expr = Expr::new(
            ExprKind::Binary {
                op: crate::operators::BinaryOp::Add,
                left: Box::new(ident("a")),
                right: Box::new(Expr::new(
                    ExprKind::Call {
                        callee: Box::new(ident("f")),
                        args: vec![ident("b"), ident("c")],
                    },
                    SourceLocation::synthetic(),
                )),
            },
            SourceLocation::synthetic(),
        );
        let mut counter = CountIdents(0);
        counter.visit_expr(&expr);
        assert_eq!(counter.0, 4);
    }

    #[test]
    fn walks_template_holes() {
        let expr = Expr::new(
            ExprKind::TemplateLiteral {
                quasis: vec!["a".to_string(), String::new()],
                exprs: vec![ident("x")],
            },
            SourceLocation::synthetic(),
        );
        let mut counter = CountIdents(0);
        counter.visit_expr(&expr);
        assert_eq!(counter.0, 1);
    }
}

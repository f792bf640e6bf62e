//! Dead-code elimination.
//!
//! Retains a top-level declaration when (a) its name is referenced from
//! a retained item, (b) it carries the `export` modifier, or (c) an
//! export statement names it. Imports, exports, and side-effectful
//! top-level statements are always retained; pure top-level expression
//! statements are dropped. Runs to fixed point so a declaration kept
//! alive only by another that is later dropped is dropped too.

use rustc_hash::FxHashSet;
use trango_ir::visitor::{walk_decl, Visitor};
use trango_ir::{Declaration, Expr, ExprKind, IRType, Module, Stmt, StmtKind, TypeRef};

use crate::Pass;

/// The mandatory level-1 pass.
pub struct DeadCodeElimination;

impl Pass for DeadCodeElimination {
    fn name(&self) -> &'static str {
        "dead-code-elimination"
    }

    fn run(&self, module: &Module) -> Module {
        // Root set: exported declarations and names exported by
        // specifier.
        let mut retained: FxHashSet<String> = module
            .declarations()
            .filter(|decl| decl.modifiers().is_exported())
            .map(|decl| decl.name().to_string())
            .collect();
        for export in &module.exports {
            // Re-exports from another module reference nothing local.
            if export.source.is_none() {
                for spec in &export.specs {
                    retained.insert(spec.local.clone());
                }
            }
        }

        // Non-declaration statements with effects are always retained
        // and contribute their references.
        let mut base_refs = ReferenceSet::default();
        for stmt in &module.body {
            if stmt.kind.as_decl().is_none() && retains_statement(stmt) {
                base_refs.collect_stmt(stmt);
            }
        }

        // Fixed point: pull in declarations referenced by anything
        // already retained.
        loop {
            let mut refs = base_refs.clone();
            for decl in module.declarations() {
                if retained.contains(decl.name()) {
                    refs.collect_decl(decl);
                }
            }

            let mut grew = false;
            for decl in module.declarations() {
                if !retained.contains(decl.name()) && refs.names.contains(decl.name()) {
                    retained.insert(decl.name().to_string());
                    grew = true;
                }
            }
            if !grew {
                break;
            }
        }

        let body: Vec<Stmt> = module
            .body
            .iter()
            .filter(|stmt| match stmt.kind.as_decl() {
                Some(decl) => retained.contains(decl.name()),
                None => retains_statement(stmt),
            })
            .cloned()
            .collect();

        module.with_body(body)
    }
}

/// Whether a non-declaration top-level statement survives DCE.
fn retains_statement(stmt: &Stmt) -> bool {
    match &stmt.kind {
        StmtKind::Expr(expr) => expr.kind.has_side_effects(),
        // Control flow, returns, throws: conservatively retained.
        _ => true,
    }
}

/// Every name a retained item can reach: identifiers, type references,
/// heritage clauses, and constructor callees.
#[derive(Clone, Default)]
struct ReferenceSet {
    names: FxHashSet<String>,
}

impl ReferenceSet {
    fn collect_stmt(&mut self, stmt: &Stmt) {
        self.visit_stmt(stmt);
    }

    fn collect_decl(&mut self, decl: &Declaration) {
        walk_decl(self, decl);
    }
}

impl Visitor for ReferenceSet {
    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Identifier(name) => {
                self.names.insert(name.clone());
            }
            ExprKind::New { callee, .. } => {
                self.names.insert(callee.clone());
            }
            _ => {}
        }
        trango_ir::visitor::walk_expr(self, expr);
    }

    fn visit_type(&mut self, ty: &IRType) {
        if let IRType::Reference { name, .. } = ty {
            self.names.insert(name.clone());
        }
        trango_ir::visitor::walk_type(self, ty);
    }

    fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        self.names.insert(type_ref.name.clone());
        trango_ir::visitor::walk_type_ref(self, type_ref);
    }
}

//! Surface statement → IR statement lowering.
//!
//! Most statements map one-to-one. Variable statements fan out into one
//! declaration per declarator, which is why lowering a single surface
//! statement can yield several IR statements.

use trango_ast::{AstCatch, AstStatement, AstStatementKind, AstSwitchCase};
use trango_diagnostic::{Diagnostic, ErrorCode};
use trango_ir::{CatchClause, Expr, Stmt, StmtKind, SwitchCase};

use crate::Lowerer;

impl Lowerer<'_> {
    /// Lower one surface statement into zero or more IR statements.
    pub(crate) fn lower_statement(&mut self, statement: &AstStatement) -> Vec<Stmt> {
        let loc = statement.loc.clone();
        let kind = match &statement.kind {
            AstStatementKind::VarStatement {
                kind,
                declarators,
                modifiers,
            } => {
                return self.lower_var_statement(*kind, declarators, modifiers, &loc);
            }
            AstStatementKind::Function(func) => {
                return vec![self.lower_function_decl(func, &loc)];
            }
            AstStatementKind::Class(class) => {
                return vec![self.lower_class_decl(class, &loc)];
            }
            AstStatementKind::Interface(interface) => {
                return vec![self.lower_interface_decl(interface, &loc)];
            }
            AstStatementKind::TypeAlias {
                name,
                type_params,
                ty,
                modifiers,
            } => {
                return vec![self.lower_type_alias(name, type_params, ty, modifiers, &loc)];
            }
            AstStatementKind::Enum {
                name,
                members,
                modifiers,
            } => {
                return vec![self.lower_enum_decl(name, members, modifiers, &loc)];
            }

            // Imports/exports are handled by the module loop; one that
            // slips into nested position has no lowering.
            AstStatementKind::Import { .. } | AstStatementKind::Export { .. } => {
                self.diagnostics.push(Diagnostic::new(
                    ErrorCode::E3004,
                    "imports and exports must appear at module level",
                    loc.clone(),
                ));
                return Vec::new();
            }

            AstStatementKind::Block(body) => StmtKind::Block(self.lower_body(body)),

            AstStatementKind::Expr(expr) => StmtKind::Expr(self.lower_expr(expr)),

            AstStatementKind::Return(value) => {
                StmtKind::Return(value.as_ref().map(|expr| self.lower_expr(expr)))
            }

            AstStatementKind::If {
                cond,
                then_branch,
                else_branch,
            } => StmtKind::If {
                cond: self.lower_expr(cond),
                then_branch: Box::new(self.lower_single(then_branch)),
                else_branch: else_branch
                    .as_ref()
                    .map(|stmt| Box::new(self.lower_single(stmt))),
            },

            AstStatementKind::While { cond, body } => StmtKind::While {
                cond: self.lower_expr(cond),
                body: Box::new(self.lower_single(body)),
            },

            AstStatementKind::For {
                init,
                cond,
                update,
                body,
            } => StmtKind::For {
                init: init.as_ref().map(|stmt| Box::new(self.lower_single(stmt))),
                cond: cond.as_ref().map(|expr| self.lower_expr(expr)),
                update: update.as_ref().map(|expr| self.lower_expr(expr)),
                body: Box::new(self.lower_single(body)),
            },

            AstStatementKind::ForOf {
                binding,
                iterable,
                body,
            } => StmtKind::ForOf {
                binding: binding.clone(),
                iterable: self.lower_expr(iterable),
                body: Box::new(self.lower_single(body)),
            },

            AstStatementKind::Try {
                block,
                handler,
                finalizer,
            } => StmtKind::Try {
                block: self.lower_body(block),
                handler: handler.as_ref().map(|h| self.lower_catch(h)),
                finalizer: finalizer.as_ref().map(|body| self.lower_body(body)),
            },

            AstStatementKind::Throw(expr) => StmtKind::Throw(self.lower_expr(expr)),

            AstStatementKind::Switch {
                discriminant,
                cases,
            } => StmtKind::Switch {
                discriminant: self.lower_expr(discriminant),
                cases: cases.iter().map(|case| self.lower_case(case)).collect(),
            },

            AstStatementKind::Unsupported { construct } => {
                self.diagnostics.push(
                    Diagnostic::new(
                        ErrorCode::E3004,
                        format!("cannot lower {construct}"),
                        loc.clone(),
                    )
                    .with_help("the statement is replaced by a placeholder"),
                );
                StmtKind::Expr(Expr::unknown(loc.clone()))
            }
        };

        vec![Stmt::new(kind, loc)]
    }

    /// Lower a statement list.
    pub(crate) fn lower_body(&mut self, body: &[AstStatement]) -> Vec<Stmt> {
        body.iter()
            .flat_map(|stmt| self.lower_statement(stmt))
            .collect()
    }

    /// Lower a statement that must stay single (loop/if bodies). A
    /// multi-declarator variable statement in this position becomes a
    /// block.
    fn lower_single(&mut self, statement: &AstStatement) -> Stmt {
        let loc = statement.loc.clone();
        let mut lowered = self.lower_statement(statement);
        if lowered.len() == 1 {
            lowered.swap_remove(0)
        } else {
            Stmt::new(StmtKind::Block(lowered), loc)
        }
    }

    fn lower_catch(&mut self, handler: &AstCatch) -> CatchClause {
        CatchClause {
            param: handler.param.clone(),
            body: self.lower_body(&handler.body),
            loc: handler.loc.clone(),
        }
    }

    fn lower_case(&mut self, case: &AstSwitchCase) -> SwitchCase {
        SwitchCase {
            test: case.test.as_ref().map(|expr| self.lower_expr(expr)),
            body: self.lower_body(&case.body),
            loc: case.loc.clone(),
        }
    }
}

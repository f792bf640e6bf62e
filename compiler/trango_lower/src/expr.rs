//! Surface expression → IR expression lowering.

use trango_ast::{AstExpr, AstExprKind, AstLit, AstTemplate};
use trango_diagnostic::{Diagnostic, ErrorCode};
use trango_ir::{Expr, ExprKind, FunctionExpr, Lit, Modifiers, ObjectProp};

use crate::Lowerer;

impl Lowerer<'_> {
    /// Lower one expression. Never fails: unsupported constructs yield
    /// a placeholder identifier plus a diagnostic.
    pub(crate) fn lower_expr(&mut self, expr: &AstExpr) -> Expr {
        let kind = match &expr.kind {
            AstExprKind::Ident(name) => ExprKind::Identifier(name.clone()),

            AstExprKind::Lit(lit) => ExprKind::Literal(lower_lit(lit)),

            AstExprKind::Array(elems) => {
                ExprKind::Array(elems.iter().map(|e| self.lower_expr(e)).collect())
            }

            AstExprKind::Object(props) => ExprKind::Object(
                props
                    .iter()
                    .map(|prop| ObjectProp {
                        key: prop.key.clone(),
                        value: self.lower_expr(&prop.value),
                        shorthand: prop.shorthand,
                    })
                    .collect(),
            ),

            AstExprKind::Template(template) => self.lower_template(template, expr),

            AstExprKind::Function {
                params,
                ret,
                body,
                is_async,
            } => ExprKind::Function(self.lower_function_expr(params, ret.as_ref(), body, *is_async, expr)),

            AstExprKind::Arrow {
                params,
                ret,
                body,
                is_async,
            } => ExprKind::Arrow(self.lower_function_expr(params, ret.as_ref(), body, *is_async, expr)),

            AstExprKind::Call { callee, args } => ExprKind::Call {
                callee: Box::new(self.lower_expr(callee)),
                args: args.iter().map(|arg| self.lower_expr(arg)).collect(),
            },

            AstExprKind::Member {
                object,
                property,
                computed,
                optional,
            } => ExprKind::Member {
                object: Box::new(self.lower_expr(object)),
                property: property.clone(),
                computed: *computed,
                optional: *optional,
            },

            AstExprKind::New { callee, args } => ExprKind::New {
                callee: callee.clone(),
                args: args.iter().map(|arg| self.lower_expr(arg)).collect(),
            },

            AstExprKind::Super => ExprKind::Super,

            AstExprKind::Binary { op, left, right } => ExprKind::Binary {
                op: *op,
                left: Box::new(self.lower_expr(left)),
                right: Box::new(self.lower_expr(right)),
            },

            AstExprKind::Unary { op, arg, prefix } => ExprKind::Unary {
                op: *op,
                arg: Box::new(self.lower_expr(arg)),
                prefix: *prefix,
            },

            AstExprKind::Assignment { op, target, value } => ExprKind::Assignment {
                op: *op,
                target: Box::new(self.lower_expr(target)),
                value: Box::new(self.lower_expr(value)),
            },

            AstExprKind::Conditional { cond, then, other } => ExprKind::Conditional {
                cond: Box::new(self.lower_expr(cond)),
                then: Box::new(self.lower_expr(then)),
                other: Box::new(self.lower_expr(other)),
            },

            AstExprKind::Await(inner) => ExprKind::Await(Box::new(self.lower_expr(inner))),

            AstExprKind::Spread(inner) => ExprKind::Spread(Box::new(self.lower_expr(inner))),

            AstExprKind::Unsupported { construct } => {
                return self.unsupported_expr(construct, expr);
            }
        };

        let mut lowered = Expr::new(kind, expr.loc.clone());
        if let Some(ty) = &expr.ty {
            lowered.ty = Some(self.lower_type(ty, &expr.loc));
        }
        lowered
    }

    fn lower_function_expr(
        &mut self,
        params: &[trango_ast::AstParam],
        ret: Option<&trango_ast::AstType>,
        body: &[trango_ast::AstStatement],
        is_async: bool,
        expr: &AstExpr,
    ) -> FunctionExpr {
        FunctionExpr {
            params: self.lower_params(params),
            ret: self.lower_opt_type(ret, &expr.loc),
            body: body
                .iter()
                .flat_map(|stmt| self.lower_statement(stmt))
                .collect(),
            is_async,
        }
    }

    /// Template literals keep their interleaving. The quasi list must
    /// be one longer than the hole list; inconsistent parts get padded
    /// with an E1002 diagnostic so emission stays aligned.
    fn lower_template(&mut self, template: &AstTemplate, expr: &AstExpr) -> ExprKind {
        let mut quasis = template.quasis.clone();
        let exprs: Vec<Expr> = template.exprs.iter().map(|e| self.lower_expr(e)).collect();

        if quasis.len() != exprs.len() + 1 {
            self.diagnostics.push(Diagnostic::new(
                ErrorCode::E1002,
                format!(
                    "template literal has {} text parts for {} holes",
                    quasis.len(),
                    exprs.len()
                ),
                expr.loc.clone(),
            ));
            quasis.resize(exprs.len() + 1, String::new());
        }

        ExprKind::TemplateLiteral { quasis, exprs }
    }

    /// Emit the right unsupported-construct code and a placeholder.
    fn unsupported_expr(&mut self, construct: &str, expr: &AstExpr) -> Expr {
        let code = match construct {
            "decorator" => ErrorCode::E3001,
            "reflection" => ErrorCode::E3002,
            "dynamic-import" => ErrorCode::E3003,
            _ => ErrorCode::E3004,
        };
        self.diagnostics.push(
            Diagnostic::new(
                code,
                format!("cannot lower {construct}"),
                expr.loc.clone(),
            )
            .with_help("the construct is replaced by a placeholder"),
        );
        Expr::unknown(expr.loc.clone())
    }

    /// Whether a lowered declaration should warn about `any` exposure.
    pub(crate) fn warn_any_if_needed(
        &mut self,
        ty: Option<&trango_ir::IRType>,
        modifiers: Modifiers,
        loc: &trango_ir::SourceLocation,
    ) {
        if self.config.allow_any {
            return;
        }
        let is_any = ty.is_some_and(trango_ir::IRType::is_top);
        if is_any && modifiers.is_exported() {
            self.diagnostics.push(Diagnostic::new(
                ErrorCode::W4001,
                "exported declaration round-trips through the top type",
                loc.clone(),
            ));
        }
    }
}

fn lower_lit(lit: &AstLit) -> Lit {
    match lit {
        AstLit::Null => Lit::Null,
        AstLit::Undefined => Lit::Undefined,
        AstLit::Boolean(b) => Lit::Boolean(*b),
        AstLit::Number(n) => Lit::Number(*n),
        AstLit::String(s) => Lit::String(s.clone()),
    }
}

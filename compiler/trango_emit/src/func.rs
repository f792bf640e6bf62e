//! Function machinery shared by declarations, methods, and closures:
//! signature rendering, async context/error injection, parameter
//! binding, and default-value guards.

use trango_ir::{FunctionExpr, IRType, Parameter, PrimitiveKind, Stmt};
use trango_types::nullable;

use crate::emitter::{zero_value, FnContext, GoEmitter};

/// A rendered function signature.
pub(crate) struct FnParts {
    /// Rendered parameter list, including the context parameter for
    /// async functions.
    pub params: String,
    /// Rendered return clause, with a leading space when present.
    pub ret_clause: String,
    /// Mapped value return type; `None` when the function returns
    /// nothing (or only an error).
    pub ret_repr: Option<String>,
    pub is_async: bool,
}

impl GoEmitter<'_> {
    /// Build the signature parts for a function-like item and bind its
    /// parameters into the current scope. `body` feeds return-type
    /// inference when no return annotation exists.
    pub(crate) fn fn_parts_with_body(
        &mut self,
        params: &[Parameter],
        ret: Option<&IRType>,
        is_async: bool,
        body: Option<&[Stmt]>,
    ) -> FnParts {
        let mut rendered = String::new();
        if is_async {
            self.require_import("context");
            rendered.push_str("ctx context.Context");
        }

        for param in params {
            if !rendered.is_empty() {
                rendered.push_str(", ");
            }
            let repr = self.param_repr(param);
            self.bind_local(&param.name, repr.clone());
            if param.rest {
                rendered.push_str(&format!("{} ...{}", param.name, repr));
            } else {
                rendered.push_str(&format!("{} {}", param.name, repr));
            }
        }

        let mut ret_repr = self.return_repr(ret);
        if ret_repr.is_none() && ret.is_none() {
            // No annotation is "unknown", not void: infer from the
            // returns the body actually has.
            ret_repr = body.and_then(|body| self.infer_return_repr(body));
        }
        let ret_clause = match (&ret_repr, is_async) {
            (Some(repr), true) => format!(" ({repr}, error)"),
            (None, true) => " error".to_string(),
            (Some(repr), false) => format!(" {repr}"),
            (None, false) => String::new(),
        };

        FnParts {
            params: rendered,
            ret_clause,
            ret_repr,
            is_async,
        }
    }

    /// Shorthand for signature building without a body.
    pub(crate) fn fn_parts(
        &mut self,
        params: &[Parameter],
        ret: Option<&IRType>,
        is_async: bool,
    ) -> FnParts {
        self.fn_parts_with_body(params, ret, is_async, None)
    }

    /// The return type the body's first value-carrying `return`
    /// suggests, if any.
    fn infer_return_repr(&mut self, body: &[Stmt]) -> Option<String> {
        for stmt in body {
            let found = match &stmt.kind {
                trango_ir::StmtKind::Return(Some(value)) => self.infer_expr_repr(value),
                trango_ir::StmtKind::If {
                    then_branch,
                    else_branch,
                    ..
                } => {
                    let mut nested = vec![then_branch.as_ref().clone()];
                    if let Some(other) = else_branch {
                        nested.push(other.as_ref().clone());
                    }
                    self.infer_return_repr(&nested)
                }
                trango_ir::StmtKind::Block(inner) => self.infer_return_repr(inner),
                _ => None,
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Best-effort expression shape, used only for return inference.
    fn infer_expr_repr(&mut self, expr: &trango_ir::Expr) -> Option<String> {
        use trango_ir::{BinaryOp, ExprKind};
        if let Some(mapped) = self.mapped_of(expr) {
            return Some(mapped);
        }
        match &expr.kind {
            ExprKind::Literal(_) | ExprKind::TemplateLiteral { .. } | ExprKind::New { .. } => {
                let inferred = self.infer_repr(Some(expr));
                (inferred != "interface{}").then_some(inferred)
            }
            ExprKind::Identifier(name) => self.local_type(name).map(ToString::to_string),
            ExprKind::Binary { op, left, right } => match op {
                BinaryOp::Add
                | BinaryOp::Sub
                | BinaryOp::Mul
                | BinaryOp::Div
                | BinaryOp::Mod
                | BinaryOp::Coalesce => self
                    .infer_expr_repr(left)
                    .map(|repr| repr.trim_start_matches('*').to_string())
                    .or_else(|| self.infer_expr_repr(right)),
                BinaryOp::Eq
                | BinaryOp::StrictEq
                | BinaryOp::NotEq
                | BinaryOp::StrictNotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
                | BinaryOp::And
                | BinaryOp::Or
                | BinaryOp::In
                | BinaryOp::InstanceOf => Some("bool".to_string()),
                _ => None,
            },
            ExprKind::Unary { op, arg, .. } => match op {
                trango_ir::UnaryOp::Not => Some("bool".to_string()),
                trango_ir::UnaryOp::TypeOf => Some("string".to_string()),
                trango_ir::UnaryOp::Increment
                | trango_ir::UnaryOp::Decrement
                | trango_ir::UnaryOp::Neg
                | trango_ir::UnaryOp::Plus => self.infer_expr_repr(arg),
                _ => None,
            },
            ExprKind::Member {
                object, property, ..
            } if object.as_identifier() == Some("this") => self
                .class_ctx
                .as_ref()
                .and_then(|ctx| ctx.field_types.get(property).cloned()),
            _ => None,
        }
    }

    /// The mapped type of one parameter. Optionality maps to the
    /// configured nullable form unless a default value fills the gap.
    fn param_repr(&mut self, param: &Parameter) -> String {
        let base = match &param.ty {
            Some(ty) => {
                let mapped = trango_types::map_type(ty, self.config);
                for package in &mapped.imports {
                    self.require_import(package);
                }
                self.intern_tuples(ty);
                mapped
            }
            None => trango_types::Mapped::new("interface{}"),
        };
        if param.optional && param.default.is_none() {
            nullable(base, self.config).repr
        } else {
            base.repr
        }
    }

    /// The mapped value-return type; `None` for void-like returns.
    fn return_repr(&mut self, ret: Option<&IRType>) -> Option<String> {
        let ty = ret?;
        // Promise<void> and void return nothing.
        let unwrapped = match ty {
            IRType::Reference { name, type_args } if name == "Promise" => {
                type_args.first()?
            }
            other => other,
        };
        if matches!(
            unwrapped,
            IRType::Primitive(PrimitiveKind::Void | PrimitiveKind::Never)
        ) {
            return None;
        }
        Some(self.mapped(unwrapped))
    }

    /// Emit the guards that realize default parameter values: string
    /// defaults check emptiness, pointer defaults check nil, other
    /// scalars check zero.
    pub(crate) fn emit_default_guards(&mut self, params: &[Parameter]) {
        for param in params {
            let Some(default) = &param.default else {
                continue;
            };
            let repr = self
                .local_type(&param.name)
                .unwrap_or("interface{}")
                .to_string();
            let rendered_default = self.expr(default);
            let indent = self.indent;
            self.out.line(
                indent,
                &format!("if {} == {} {{", param.name, zero_value(&repr)),
            );
            self.out
                .line(indent + 1, &format!("{} = {}", param.name, rendered_default));
            self.out.line(indent, "}");
        }
    }

    /// Emit a function body: parameter scope, default guards, then the
    /// statements, with the function context set for return rewrites.
    pub(crate) fn emit_fn_body(&mut self, body: &[Stmt], parts: &FnParts, params: &[Parameter]) {
        let saved_fn = self.current_fn.take();
        self.current_fn = Some(FnContext {
            is_async: parts.is_async,
            ret_repr: parts.ret_repr.clone(),
        });

        self.emit_default_guards(params);
        for stmt in body {
            self.emit_stmt(stmt);
        }

        self.current_fn = saved_fn;
    }

    /// Render a function expression (closure). The body is captured
    /// into a string at the current indentation.
    pub(crate) fn function_value(&mut self, func: &FunctionExpr) -> String {
        self.push_scope();
        let parts =
            self.fn_parts_with_body(&func.params, func.ret.as_ref(), func.is_async, Some(&func.body));

        let base_indent = self.indent;
        let body = self.capture(|emitter| {
            emitter.indent = base_indent + 1;
            emitter.emit_fn_body(&func.body, &parts, &func.params);
            emitter.indent = base_indent;
        });
        self.pop_scope();

        let mut out = format!("func({}){} {{\n", parts.params, parts.ret_clause);
        out.push_str(&body);
        out.push_str(&"\t".repeat(base_indent));
        out.push('}');
        out
    }

    /// Run an emission closure against a fresh buffer and return what
    /// it produced. Imports and intern state accumulate as usual;
    /// source mappings pause, since captured text has no stable
    /// generated position yet.
    pub(crate) fn capture(&mut self, f: impl FnOnce(&mut Self)) -> String {
        let saved = std::mem::take(&mut self.out);
        let saved_map = self.source_map.take();
        f(self);
        self.source_map = saved_map;
        let captured = std::mem::replace(&mut self.out, saved);
        captured.as_str().to_string()
    }
}

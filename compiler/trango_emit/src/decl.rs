//! Top-level and local declaration emission.

use trango_config::NumberStrategy;
use trango_ir::{
    Declaration, Expr, ExprKind, FunctionDecl, IRType, Lit, PrimitiveKind, VariableDecl,
};
use trango_types::capitalize;

use crate::emitter::GoEmitter;

impl GoEmitter<'_> {
    /// Emit one top-level declaration. Tuple record definitions the
    /// declaration needs are flushed in front of it.
    pub(crate) fn emit_top_decl(&mut self, decl: &Declaration) {
        let text = self.capture(|emitter| emitter.emit_decl_inner(decl));
        self.flush_tuple_defs();
        self.record_mapping(decl.location(), Some(decl.name()));
        self.out.append(&text);
    }

    fn emit_decl_inner(&mut self, decl: &Declaration) {
        match decl {
            Declaration::Variable(var) => self.emit_top_var(var),
            Declaration::Function(func) => self.emit_function(func),
            Declaration::Class(class) => self.emit_class(class),
            Declaration::Interface(interface) => self.emit_interface(interface),
            Declaration::TypeAlias(alias) => self.emit_type_alias(alias),
            Declaration::Enum(decl) => self.emit_enum(decl),
        }
    }

    /// The target name a reference to a declaration renders as.
    /// Functions and type-level declarations are always exported-case;
    /// variables follow their export modifier.
    pub(crate) fn go_decl_name(&self, decl: &Declaration) -> String {
        match decl {
            Declaration::Variable(var) => {
                if var.modifiers.is_exported() {
                    capitalize(&var.name)
                } else {
                    var.name.clone()
                }
            }
            _ => capitalize(decl.name()),
        }
    }

    /// A module-level variable.
    fn emit_top_var(&mut self, var: &VariableDecl) {
        let repr = self.var_repr(var.ty.as_ref(), var.init.as_ref(), &var.name);
        let name = if var.modifiers.is_exported() {
            capitalize(&var.name)
        } else {
            var.name.clone()
        };

        match &var.init {
            Some(init) => {
                let rendered = self.expr_expecting(init, Some(&repr));
                if repr == "interface{}" && var.ty.is_none() {
                    // Fully inferred: let the target infer too.
                    self.out.line(0, &format!("var {name} = {rendered}"));
                } else {
                    self.out.line(0, &format!("var {name} {repr} = {rendered}"));
                }
            }
            None => self.out.line(0, &format!("var {name} {repr}")),
        }
    }

    /// The rendered type of a variable: declared type unless inference
    /// applies (absent, or top type with a literal initializer and no
    /// any-hint in the name), with contextual number narrowing.
    pub(crate) fn var_repr(
        &mut self,
        ty: Option<&IRType>,
        init: Option<&Expr>,
        name: &str,
    ) -> String {
        let hints_top = {
            let lowered = name.to_lowercase();
            lowered.contains("any") || lowered.contains("unknown")
        };

        match ty {
            Some(ty) if ty.is_top() && !hints_top && init.is_some_and(is_literal) => {
                self.infer_repr(init)
            }
            Some(IRType::Primitive(PrimitiveKind::Number))
                if self.config.number_strategy == NumberStrategy::Contextual =>
            {
                self.infer_repr(init)
            }
            Some(ty) => self.mapped(ty),
            None => self.infer_repr(init),
        }
    }

    /// A function declaration.
    fn emit_function(&mut self, func: &FunctionDecl) {
        let name = capitalize(&func.name);
        self.push_scope();
        let parts = self.fn_parts_with_body(
            &func.params,
            func.ret.as_ref(),
            func.is_async(),
            func.body.as_deref(),
        );

        self.out.line(
            0,
            &format!("func {name}({}){} {{", parts.params, parts.ret_clause),
        );
        self.indent = 1;
        if let Some(body) = &func.body {
            self.emit_fn_body(body, &parts, &func.params);
            // An error-only async body that falls off the end still
            // needs its success return.
            let falls_off = !matches!(
                body.last().map(|stmt| &stmt.kind),
                Some(trango_ir::StmtKind::Return(_) | trango_ir::StmtKind::Throw(_))
            );
            if parts.is_async && parts.ret_repr.is_none() && falls_off {
                self.out.line(1, "return nil");
            }
        }
        self.indent = 0;
        self.out.line(0, "}");
        self.pop_scope();
    }

    /// A declaration in statement position (function-local).
    pub(crate) fn emit_local_decl(&mut self, decl: &Declaration) {
        let indent = self.indent;
        match decl {
            Declaration::Variable(var) => {
                let repr = self.var_repr(var.ty.as_ref(), var.init.as_ref(), &var.name);
                self.bind_local(&var.name, repr.clone());
                match &var.init {
                    Some(init) => {
                        // Awaited initializers consume the error pair.
                        if let ExprKind::Await(inner) = &init.kind {
                            self.emit_awaited_binding(&var.name, inner);
                            return;
                        }
                        let rendered = self.expr_expecting(init, Some(&repr));
                        self.out
                            .line(indent, &format!("{} := {}", var.name, rendered));
                    }
                    None => {
                        self.out.line(indent, &format!("var {} {}", var.name, repr));
                    }
                }
            }
            // Nested functions become bound closures.
            Declaration::Function(func) => {
                let rendered = self.function_value(&trango_ir::FunctionExpr {
                    params: func.params.clone(),
                    ret: func.ret.clone(),
                    body: func.body.clone().unwrap_or_default(),
                    is_async: func.is_async(),
                });
                self.bind_local(&func.name, "func".to_string());
                self.out
                    .line(indent, &format!("{} := {}", func.name, rendered));
            }
            // Type-level declarations cannot nest in the target; they
            // are hoisted by the lowering in practice, so a placeholder
            // comment is enough here.
            _ => {
                self.out
                    .line(indent, &format!("// hoisted: {}", decl.name()));
            }
        }
    }

    /// `x := await f(...)`: bind the value, consume the error.
    fn emit_awaited_binding(&mut self, name: &str, call: &Expr) {
        let indent = self.indent;
        let rendered = self.expr(call);
        let in_async = self.current_fn.as_ref().is_some_and(|f| f.is_async);
        if in_async {
            self.out
                .line(indent, &format!("{name}, err := {rendered}"));
            self.out.line(indent, "if err != nil {");
            let zero = self
                .current_fn
                .as_ref()
                .and_then(|f| f.ret_repr.clone())
                .map(|repr| format!("{}, ", crate::emitter::zero_value(&repr)))
                .unwrap_or_default();
            self.out.line(indent + 1, &format!("return {zero}err"));
            self.out.line(indent, "}");
        } else {
            self.out.line(indent, &format!("{name}, _ := {rendered}"));
        }
    }
}

fn is_literal(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Literal(
            Lit::Boolean(_) | Lit::Number(_) | Lit::String(_)
        )
    ) || matches!(expr.kind, ExprKind::TemplateLiteral { .. })
}

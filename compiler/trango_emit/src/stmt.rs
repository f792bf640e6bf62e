//! Statement emission.
//!
//! Carries the statement-position rewrites: truthiness conditions,
//! return-position `++`/`--` splitting, `array.includes` expansion,
//! async error returns, and the two try/catch strategies.

use trango_config::ErrorHandling;
use trango_ir::{
    CatchClause, Declaration, Expr, ExprKind, Lit, Stmt, StmtKind, SwitchCase, UnaryOp,
};

use crate::emitter::{zero_value, GoEmitter};

impl GoEmitter<'_> {
    /// Emit one statement at the current indentation.
    pub(crate) fn emit_stmt(&mut self, stmt: &Stmt) {
        self.record_mapping(&stmt.loc, None);
        match &stmt.kind {
            StmtKind::Block(body) => {
                let indent = self.indent;
                self.out.line(indent, "{");
                self.indent += 1;
                self.push_scope();
                for inner in body {
                    self.emit_stmt(inner);
                }
                self.pop_scope();
                self.indent -= 1;
                self.out.line(indent, "}");
            }

            StmtKind::Expr(expr) => self.emit_expr_stmt(expr),

            StmtKind::Return(value) => self.emit_return(value.as_ref()),

            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let rendered = self.condition(cond);
                let indent = self.indent;
                self.out.line(indent, &format!("if {rendered} {{"));
                self.emit_branch(then_branch);
                if let Some(other) = else_branch {
                    self.out.line(indent, "} else {");
                    self.emit_branch(other);
                }
                self.out.line(indent, "}");
            }

            StmtKind::While { cond, body } => {
                let rendered = self.condition(cond);
                let indent = self.indent;
                self.out.line(indent, &format!("for {rendered} {{"));
                self.emit_branch(body);
                self.out.line(indent, "}");
            }

            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                self.push_scope();
                let init = init
                    .as_deref()
                    .map(|stmt| self.inline_stmt(stmt))
                    .unwrap_or_default();
                let cond = cond
                    .as_ref()
                    .map(|expr| self.condition(expr))
                    .unwrap_or_default();
                let update = update
                    .as_ref()
                    .map(|expr| self.expr(expr))
                    .unwrap_or_default();
                let indent = self.indent;
                self.out
                    .line(indent, &format!("for {init}; {cond}; {update} {{"));
                self.emit_branch(body);
                self.out.line(indent, "}");
                self.pop_scope();
            }

            StmtKind::ForOf {
                binding,
                iterable,
                body,
            } => {
                self.push_scope();
                self.bind_local(binding, "interface{}".to_string());
                let rendered = self.expr(iterable);
                let indent = self.indent;
                self.out
                    .line(indent, &format!("for _, {binding} := range {rendered} {{"));
                self.emit_branch(body);
                self.out.line(indent, "}");
                self.pop_scope();
            }

            StmtKind::Try {
                block,
                handler,
                finalizer,
            } => match self.config.error_handling {
                ErrorHandling::Panic => {
                    self.emit_try_panic(block, handler.as_ref(), finalizer.as_deref());
                }
                ErrorHandling::Return => {
                    self.emit_try_return(block, handler.as_ref(), finalizer.as_deref());
                }
            },

            StmtKind::Throw(expr) => self.emit_throw(expr),

            StmtKind::Switch {
                discriminant,
                cases,
            } => self.emit_switch(discriminant, cases),

            StmtKind::Decl(decl) => self.emit_local_decl(decl),
        }
    }

    fn emit_branch(&mut self, branch: &Stmt) {
        self.indent += 1;
        self.push_scope();
        // A block branch already prints its own braces when emitted as
        // a statement; inline its body instead.
        if let StmtKind::Block(body) = &branch.kind {
            for inner in body {
                self.emit_stmt(inner);
            }
        } else {
            self.emit_stmt(branch);
        }
        self.pop_scope();
        self.indent -= 1;
    }

    /// Expression statements. Non-call pure expressions need a blank
    /// assignment to be legal statements in the target.
    fn emit_expr_stmt(&mut self, expr: &Expr) {
        let indent = self.indent;
        match &expr.kind {
            ExprKind::Unary {
                op: UnaryOp::Increment | UnaryOp::Decrement | UnaryOp::Delete,
                ..
            }
            | ExprKind::Assignment { .. }
            | ExprKind::Call { .. }
            | ExprKind::New { .. }
            | ExprKind::Await(_) => {
                let rendered = self.expr(expr);
                self.out.line(indent, &rendered);
            }
            _ => {
                let rendered = self.expr(expr);
                self.out.line(indent, &format!("_ = {rendered}"));
            }
        }
    }

    /// Return statements, with the target-specific rewrites.
    fn emit_return(&mut self, value: Option<&Expr>) {
        let indent = self.indent;
        let is_async = self.current_fn.as_ref().is_some_and(|f| f.is_async);

        let Some(value) = value else {
            if is_async {
                self.out.line(indent, "return nil");
            } else {
                self.out.line(indent, "return");
            }
            return;
        };

        // `return ++x` splits: the target's increment is a statement.
        if let ExprKind::Unary {
            op: op @ (UnaryOp::Increment | UnaryOp::Decrement),
            arg,
            prefix: true,
        } = &value.kind
        {
            let symbol = if *op == UnaryOp::Increment { "++" } else { "--" };
            let target = self.expr(arg);
            self.out.line(indent, &format!("{target}{symbol}"));
            if is_async {
                self.out.line(indent, &format!("return {target}, nil"));
            } else {
                self.out.line(indent, &format!("return {target}"));
            }
            return;
        }

        // `return xs.includes(v)` expands to a search loop.
        if let ExprKind::Call { callee, args } = &value.kind {
            if let ExprKind::Member {
                object, property, ..
            } = &callee.kind
            {
                if property == "includes" && args.len() == 1 {
                    let haystack = self.expr(object);
                    let needle = self.expr(&args[0]);
                    let (found, missing) = if is_async {
                        ("return true, nil", "return false, nil")
                    } else {
                        ("return true", "return false")
                    };
                    self.out
                        .line(indent, &format!("for _, item := range {haystack} {{"));
                    self.out.line(indent + 1, &format!("if item == {needle} {{"));
                    self.out.line(indent + 2, found);
                    self.out.line(indent + 1, "}");
                    self.out.line(indent, "}");
                    self.out.line(indent, missing);
                    return;
                }
            }
        }

        let rendered = self.expr(value);
        if is_async {
            self.out.line(indent, &format!("return {rendered}, nil"));
        } else {
            self.out.line(indent, &format!("return {rendered}"));
        }
    }

    /// `throw` under the error-return strategy produces an error
    /// return; under the panic strategy it panics.
    fn emit_throw(&mut self, expr: &Expr) {
        let indent = self.indent;
        match self.config.error_handling {
            ErrorHandling::Panic => {
                let error = self.error_value(expr);
                self.out.line(indent, &format!("panic({error})"));
            }
            ErrorHandling::Return => {
                let error = self.error_value(expr);
                let fn_ctx = self.current_fn.clone();
                match fn_ctx {
                    Some(ctx) => {
                        if let Some(repr) = &ctx.ret_repr {
                            let zero = zero_value(repr);
                            self.out.line(indent, &format!("return {zero}, {error}"));
                        } else {
                            self.out.line(indent, &format!("return {error}"));
                        }
                    }
                    // Module scope has nothing to return into.
                    None => {
                        let rendered = self.expr(expr);
                        self.out.line(indent, &format!("panic({rendered})"));
                    }
                }
            }
        }
    }

    /// The error value a thrown expression becomes.
    fn error_value(&mut self, expr: &Expr) -> String {
        // `throw new Error("...")` is the canonical form.
        if let ExprKind::New { callee, args } = &expr.kind {
            if callee == "Error" {
                self.require_import("errors");
                let message = args
                    .first()
                    .map(|arg| self.expr(arg))
                    .unwrap_or_else(|| "\"error\"".to_string());
                return format!("errors.New({message})");
            }
        }
        if let ExprKind::Literal(Lit::String(_)) = &expr.kind {
            self.require_import("errors");
            let rendered = self.expr(expr);
            return format!("errors.New({rendered})");
        }
        self.require_import("fmt");
        let rendered = self.expr(expr);
        format!("fmt.Errorf(\"%v\", {rendered})")
    }

    /// try/catch under the panic strategy: an anonymous function with a
    /// deferred recover; the finalizer is a second deferred function.
    fn emit_try_panic(
        &mut self,
        block: &[Stmt],
        handler: Option<&CatchClause>,
        finalizer: Option<&[Stmt]>,
    ) {
        let indent = self.indent;
        self.out.line(indent, "func() {");
        self.indent += 1;

        if let Some(handler) = handler {
            self.out.line(indent + 1, "defer func() {");
            self.out.line(indent + 2, "if r := recover(); r != nil {");
            self.indent += 2;
            self.push_scope();
            if let Some(param) = &handler.param {
                self.bind_local(param, "interface{}".to_string());
                self.out.line(indent + 3, &format!("{param} := r"));
                self.out.line(indent + 3, &format!("_ = {param}"));
            }
            for stmt in &handler.body {
                self.emit_stmt(stmt);
            }
            self.pop_scope();
            self.indent -= 2;
            self.out.line(indent + 2, "}");
            self.out.line(indent + 1, "}()");
        }

        if let Some(finalizer) = finalizer {
            self.out.line(indent + 1, "defer func() {");
            self.indent += 1;
            for stmt in finalizer {
                self.emit_stmt(stmt);
            }
            self.indent -= 1;
            self.out.line(indent + 1, "}()");
        }

        self.push_scope();
        for stmt in block {
            self.emit_stmt(stmt);
        }
        self.pop_scope();

        self.indent -= 1;
        self.out.line(indent, "}()");
    }

    /// try/catch under the error-return strategy: the block runs in a
    /// closure returning `error`, throws become error returns, and the
    /// catch body runs under `if err != nil`.
    fn emit_try_return(
        &mut self,
        block: &[Stmt],
        handler: Option<&CatchClause>,
        finalizer: Option<&[Stmt]>,
    ) {
        let indent = self.indent;
        let err_name = if self.try_counter == 0 {
            "err".to_string()
        } else {
            format!("err{}", self.try_counter)
        };
        self.try_counter += 1;
        self.out.line(indent, &format!("{err_name} := func() error {{"));
        self.indent += 1;

        if let Some(finalizer) = finalizer {
            self.out.line(indent + 1, "defer func() {");
            self.indent += 1;
            for stmt in finalizer {
                self.emit_stmt(stmt);
            }
            self.indent -= 1;
            self.out.line(indent + 1, "}()");
        }

        // Inside the closure, throws return the closure's error.
        let saved_fn = self.current_fn.take();
        self.current_fn = Some(crate::emitter::FnContext {
            is_async: false,
            ret_repr: None,
        });
        self.push_scope();
        for stmt in block {
            self.emit_stmt(stmt);
        }
        self.pop_scope();
        self.current_fn = saved_fn;

        self.out.line(indent + 1, "return nil");
        self.indent -= 1;
        self.out.line(indent, "}()");

        if let Some(handler) = handler {
            self.out.line(indent, &format!("if {err_name} != nil {{"));
            self.indent += 1;
            self.push_scope();
            if let Some(param) = &handler.param {
                if param != &err_name {
                    self.bind_local(param, "error".to_string());
                    self.out.line(indent + 1, &format!("{param} := {err_name}"));
                    self.out.line(indent + 1, &format!("_ = {param}"));
                }
            }
            for stmt in &handler.body {
                self.emit_stmt(stmt);
            }
            self.pop_scope();
            self.indent -= 1;
            self.out.line(indent, "}");
        } else {
            self.out.line(indent, &format!("_ = {err_name}"));
        }
    }

    fn emit_switch(&mut self, discriminant: &Expr, cases: &[SwitchCase]) {
        let indent = self.indent;
        let rendered = self.expr(discriminant);
        self.out.line(indent, &format!("switch {rendered} {{"));
        for case in cases {
            match &case.test {
                Some(test) => {
                    let test = self.expr(test);
                    self.out.line(indent, &format!("case {test}:"));
                }
                None => self.out.line(indent, "default:"),
            }
            self.indent += 1;
            self.push_scope();
            for stmt in &case.body {
                self.emit_stmt(stmt);
            }
            self.pop_scope();
            self.indent -= 1;
        }
        self.out.line(indent, "}");
    }

    /// A statement rendered inline (for-loop initializers).
    fn inline_stmt(&mut self, stmt: &Stmt) -> String {
        match &stmt.kind {
            StmtKind::Decl(Declaration::Variable(var)) => {
                let init = var
                    .init
                    .as_ref()
                    .map(|init| self.expr(init))
                    .unwrap_or_else(|| "0".to_string());
                let repr = var
                    .ty
                    .as_ref()
                    .map(|ty| self.mapped(ty))
                    .unwrap_or_else(|| self.infer_repr(var.init.as_ref()));
                self.bind_local(&var.name, repr);
                format!("{} := {}", var.name, init)
            }
            StmtKind::Expr(expr) => self.expr(expr),
            _ => String::new(),
        }
    }

    /// Truthiness for conditions: consult the declared shape of a bare
    /// identifier rather than assuming pointerness.
    pub(crate) fn condition(&mut self, cond: &Expr) -> String {
        if let ExprKind::Identifier(name) = &cond.kind {
            let repr = self.shape_of_name(name);
            let rendered = self.expr(cond);
            return match repr.as_deref() {
                Some("bool") => rendered,
                Some("string") => format!("{rendered} != \"\""),
                Some("int" | "float64") => format!("{rendered} != 0"),
                // Pointers and unknown shapes compare against nil.
                _ => format!("{rendered} != nil"),
            };
        }
        self.expr(cond)
    }

    /// The mapped shape of a name: locals first, then module-level
    /// variable declarations.
    fn shape_of_name(&mut self, name: &str) -> Option<String> {
        if let Some(repr) = self.local_type(name) {
            return Some(repr.to_string());
        }
        match self.module.declaration(name) {
            Some(Declaration::Variable(var)) => {
                let ty = var.ty.clone()?;
                Some(self.mapped(&ty))
            }
            _ => None,
        }
    }

    /// Fallback shape inference from an initializer expression.
    pub(crate) fn infer_repr(&mut self, init: Option<&Expr>) -> String {
        let Some(init) = init else {
            return "interface{}".to_string();
        };
        if let Some(mapped) = self.mapped_of(init) {
            return mapped;
        }
        match &init.kind {
            ExprKind::Literal(Lit::String(_)) => "string".to_string(),
            ExprKind::Literal(Lit::Boolean(_)) => "bool".to_string(),
            ExprKind::Literal(Lit::Number(n)) => trango_types::number_repr(
                self.config.number_strategy,
                Some(trango_types::NumberShape::of(*n)),
            )
            .to_string(),
            ExprKind::TemplateLiteral { .. } => "string".to_string(),
            ExprKind::New { callee, .. } if callee == "Date" => "time.Time".to_string(),
            ExprKind::New { callee, .. } => format!("*{callee}"),
            _ => "interface{}".to_string(),
        }
    }
}

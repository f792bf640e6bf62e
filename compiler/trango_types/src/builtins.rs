//! Built-in reference mappings.
//!
//! The source ecosystem's well-known generic names have hard-coded
//! target forms. Everything else maps to its own (possibly generic)
//! nominal name.

use trango_config::Config;
use trango_ir::IRType;

use crate::mapper::{map_type, Mapped};

/// Map a built-in reference name, if `name` is one.
///
/// Returns `None` for user-defined names, which keep their nominal
/// identity.
pub fn builtin_reference(name: &str, args: &[IRType], config: &Config) -> Option<Mapped> {
    match name {
        "Date" => Some(Mapped::with_import("time.Time", "time")),

        "Array" | "ReadonlyArray" => {
            let elem = map_single(args, config);
            Some(elem.map_repr(|repr| format!("[]{repr}")))
        }

        "Map" | "Record" => {
            let key = args
                .first()
                .map_or_else(|| Mapped::new("string"), |arg| map_type(arg, config));
            let value = args
                .get(1)
                .map_or_else(|| Mapped::new("interface{}"), |arg| map_type(arg, config));
            let mut mapped = Mapped::new(format!("map[{}]{}", key.repr, value.repr));
            mapped.absorb(key);
            mapped.absorb(value);
            Some(mapped)
        }

        "Set" => {
            let elem = map_single(args, config);
            Some(elem.map_repr(|repr| format!("map[{repr}]bool")))
        }

        // Mapped-type utilities are identity at the type level; the
        // differences they imply are explicit in the record layouts the
        // emitter generates.
        "Partial" | "Required" | "Readonly" | "Pick" | "Omit" => Some(map_single(args, config)),

        // The error side-channel replaces the promise wrapper.
        "Promise" => Some(map_single(args, config)),

        _ => None,
    }
}

/// Map the first type argument, defaulting to the empty interface when
/// the argument list is malformed.
fn map_single(args: &[IRType], config: &Config) -> Mapped {
    args.first()
        .map_or_else(|| Mapped::new("interface{}"), |arg| map_type(arg, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trango_ir::PrimitiveKind;

    fn num() -> IRType {
        IRType::primitive(PrimitiveKind::Number)
    }

    fn string() -> IRType {
        IRType::primitive(PrimitiveKind::String)
    }

    #[test]
    fn date_pulls_the_time_package() {
        let config = Config::default();
        let mapped = builtin_reference("Date", &[], &config);
        let Some(mapped) = mapped else {
            panic!("Date is a builtin");
        };
        assert_eq!(mapped.repr, "time.Time");
        assert_eq!(mapped.imports.as_slice(), &["time"]);
    }

    #[test]
    fn collection_builtins() {
        let config = Config::default();
        let cases: Vec<(&str, Vec<IRType>, &str)> = vec![
            ("Array", vec![num()], "[]float64"),
            ("Set", vec![string()], "map[string]bool"),
            ("Map", vec![string(), num()], "map[string]float64"),
            ("Record", vec![string(), num()], "map[string]float64"),
        ];
        for (name, args, expected) in cases {
            let mapped = builtin_reference(name, &args, &config);
            assert_eq!(mapped.map(|m| m.repr), Some(expected.to_string()));
        }
    }

    #[test]
    fn utility_types_are_identity() {
        let config = Config::default();
        for name in ["Partial", "Required", "Readonly", "Pick", "Omit", "Promise"] {
            let mapped = builtin_reference(name, &[string()], &config);
            assert_eq!(mapped.map(|m| m.repr), Some("string".to_string()));
        }
    }

    #[test]
    fn user_names_are_not_builtins() {
        let config = Config::default();
        assert!(builtin_reference("User", &[], &config).is_none());
    }
}

//! The type mapper.

use smallvec::SmallVec;
use trango_config::{Config, NullabilityStrategy, NumberStrategy, UnionStrategy};
use trango_ir::{FunctionType, IRType, LiteralValue, PrimitiveKind};

use crate::builtins::builtin_reference;
use crate::tuple::tuple_name;

/// A mapped type: the target rendering plus the standard-library
/// packages that rendering requires.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Mapped {
    pub repr: String,
    pub imports: SmallVec<[&'static str; 2]>,
}

impl Mapped {
    /// A rendering with no imports.
    pub fn new(repr: impl Into<String>) -> Self {
        Mapped {
            repr: repr.into(),
            imports: SmallVec::new(),
        }
    }

    /// A rendering that pulls one package.
    pub fn with_import(repr: impl Into<String>, package: &'static str) -> Self {
        Mapped {
            repr: repr.into(),
            imports: SmallVec::from_slice(&[package]),
        }
    }

    /// Transform the rendering, keeping imports.
    #[must_use]
    pub fn map_repr(mut self, f: impl FnOnce(&str) -> String) -> Self {
        self.repr = f(&self.repr);
        self
    }

    /// Merge another mapping's imports into this one.
    pub fn absorb(&mut self, other: Mapped) {
        for package in other.imports {
            if !self.imports.contains(&package) {
                self.imports.push(package);
            }
        }
    }

    fn push_import(&mut self, package: &'static str) {
        if !self.imports.contains(&package) {
            self.imports.push(package);
        }
    }
}

/// Initializer shape consulted by the `contextual` number strategy.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NumberShape {
    /// Whole-number literal; narrows to `int`.
    Integral,
    /// Fractional literal or unknown shape; stays `float64`.
    Fractional,
}

impl NumberShape {
    /// Classify a numeric literal value.
    pub fn of(value: f64) -> NumberShape {
        if value.fract() == 0.0 && value.is_finite() {
            NumberShape::Integral
        } else {
            NumberShape::Fractional
        }
    }
}

/// Target rendering for the `number` primitive.
///
/// `shape` is the initializer shape at a declaration site, when the
/// caller has one; type positions with no initializer pass `None`.
pub fn number_repr(strategy: NumberStrategy, shape: Option<NumberShape>) -> &'static str {
    match strategy {
        NumberStrategy::Float64 => "float64",
        NumberStrategy::Int => "int",
        NumberStrategy::Contextual => match shape {
            Some(NumberShape::Integral) => "int",
            _ => "float64",
        },
    }
}

/// Map an IR type to its target rendering.
pub fn map_type(ty: &IRType, config: &Config) -> Mapped {
    map_type_named(ty, None, config)
}

/// Map an IR type, with the name of the alias being defined when the
/// type appears as an alias body. Unions and intersections use the
/// name as their nominal identity; the emitter materializes the
/// definition.
pub fn map_type_named(ty: &IRType, name_hint: Option<&str>, config: &Config) -> Mapped {
    match ty {
        IRType::Primitive(kind) => map_primitive(*kind, config),

        IRType::Array(elem) => {
            map_type(elem, config).map_repr(|repr| format!("[]{repr}"))
        }

        IRType::Tuple(elems) => {
            let mut mapped = Mapped::new(tuple_name(elems, config));
            for elem in elems {
                mapped.absorb(map_type(elem, config));
            }
            mapped
        }

        IRType::Object { props, index } => map_object(props, index.as_deref(), config),

        IRType::Function(func) => map_function(func, config),

        IRType::Union(arms) => map_union(arms, name_hint, config),

        IRType::Intersection(_) => match name_hint {
            Some(name) => Mapped::new(name),
            None => Mapped::new("interface{}"),
        },

        IRType::Reference { name, type_args } => {
            if let Some(mapped) = builtin_reference(name, type_args, config) {
                return mapped;
            }
            if type_args.is_empty() {
                return Mapped::new(name.clone());
            }
            let mut mapped = Mapped::new(String::new());
            let mut repr = format!("{name}[");
            for (i, arg) in type_args.iter().enumerate() {
                if i > 0 {
                    repr.push_str(", ");
                }
                let arg_mapped = map_type(arg, config);
                repr.push_str(&arg_mapped.repr);
                mapped.absorb(arg_mapped);
            }
            repr.push(']');
            mapped.repr = repr;
            mapped
        }

        IRType::Literal(value) => map_literal(value, config),
    }
}

/// Wrap a mapped type in the configured optional representation.
pub fn nullable(mapped: Mapped, config: &Config) -> Mapped {
    match config.nullability_strategy {
        NullabilityStrategy::Pointer => {
            if mapped.repr.starts_with('*') {
                mapped
            } else {
                mapped.map_repr(|repr| format!("*{repr}"))
            }
        }
        // Lossy: the zero value stands in for absence.
        NullabilityStrategy::Zero => mapped,
        NullabilityStrategy::SqlNull => mapped.map_repr(|repr| format!("Null[{repr}]")),
    }
}

fn map_primitive(kind: PrimitiveKind, config: &Config) -> Mapped {
    Mapped::new(match kind {
        PrimitiveKind::Number => number_repr(config.number_strategy, None),
        PrimitiveKind::String => "string",
        PrimitiveKind::Boolean => "bool",
        PrimitiveKind::Void | PrimitiveKind::Any | PrimitiveKind::Unknown => "interface{}",
        PrimitiveKind::Never => "struct{}",
    })
}

fn map_literal(value: &LiteralValue, config: &Config) -> Mapped {
    match value {
        LiteralValue::String(_) => Mapped::new("string"),
        LiteralValue::Boolean(_) => Mapped::new("bool"),
        LiteralValue::Number(n) => Mapped::new(number_repr(
            config.number_strategy,
            Some(NumberShape::of(*n)),
        )),
    }
}

fn map_object(
    props: &[trango_ir::PropertySignature],
    index: Option<&trango_ir::IndexSignature>,
    config: &Config,
) -> Mapped {
    // A bare index signature is a mapping type.
    if props.is_empty() {
        if let Some(sig) = index {
            let key = map_type(&sig.key, config);
            let value = map_type(&sig.value, config);
            let mut mapped = Mapped::new(format!("map[{}]{}", key.repr, value.repr));
            mapped.absorb(key);
            mapped.absorb(value);
            return mapped;
        }
        return Mapped::new("struct{}");
    }

    // Anonymous record with capitalized field names.
    let mut mapped = Mapped::new(String::new());
    let mut repr = String::from("struct{ ");
    for (i, prop) in props.iter().enumerate() {
        if i > 0 {
            repr.push_str("; ");
        }
        let field = map_type(&prop.ty, config);
        let field = if prop.optional {
            nullable(field, config)
        } else {
            field
        };
        repr.push_str(&capitalize(&prop.name));
        repr.push(' ');
        repr.push_str(&field.repr);
        mapped.absorb(field);
    }
    repr.push_str(" }");
    mapped.repr = repr;
    mapped
}

fn map_function(func: &FunctionType, config: &Config) -> Mapped {
    let mut mapped = Mapped::new(String::new());
    let mut repr = String::from("func(");
    if func.is_async {
        repr.push_str("ctx context.Context");
        mapped.push_import("context");
        if !func.params.is_empty() {
            repr.push_str(", ");
        }
    }
    for (i, param) in func.params.iter().enumerate() {
        if i > 0 {
            repr.push_str(", ");
        }
        let param_ty = match &param.ty {
            Some(ty) => map_type(ty, config),
            None => Mapped::new("interface{}"),
        };
        let param_ty = if param.optional {
            nullable(param_ty, config)
        } else {
            param_ty
        };
        if param.rest {
            repr.push_str("...");
        }
        repr.push_str(&param_ty.repr);
        mapped.absorb(param_ty);
    }
    repr.push(')');

    let returns_value = !matches!(func.ret, IRType::Primitive(PrimitiveKind::Void));
    let ret = map_type(&func.ret, config);
    match (func.is_async, returns_value) {
        (true, true) => {
            repr.push_str(&format!(" ({}, error)", ret.repr));
            mapped.absorb(ret);
        }
        (true, false) => repr.push_str(" error"),
        (false, true) => {
            repr.push(' ');
            repr.push_str(&ret.repr);
            mapped.absorb(ret);
        }
        (false, false) => {}
    }
    mapped.repr = repr;
    mapped
}

/// The collapse rules every union goes through before its per-strategy
/// form, shared by the type mapper and the emitter's alias path:
///
/// - a union with one arm collapses to that arm
/// - one concrete arm plus nullish arms maps to the configured
///   optional representation of the concrete arm
/// - under the `any` strategy only, literal arms of one primitive
///   widen to it (`"a" | "b"` → `string`) instead of erasing to the
///   top type; discrimination is runtime-side under `any` either way
///
/// Returns `None` when the union keeps its selected strategy form.
pub fn simplify_union(arms: &[IRType], config: &Config) -> Option<Mapped> {
    if let [arm] = arms {
        return Some(map_type(arm, config));
    }

    let concrete: Vec<&IRType> = arms.iter().filter(|arm| !arm.is_nullish()).collect();
    if concrete.len() == 1 {
        return Some(nullable(map_type(concrete[0], config), config));
    }

    if config.union_strategy == UnionStrategy::Any {
        if let Some(widened) = literal_widening(arms) {
            return Some(map_primitive(widened, config));
        }
    }

    None
}

/// If every arm is a literal of one primitive, that primitive.
fn literal_widening(arms: &[IRType]) -> Option<PrimitiveKind> {
    let first = arms.first()?;
    let IRType::Literal(first_lit) = first else {
        return None;
    };
    let widened = first_lit.widened();
    arms.iter()
        .all(|arm| matches!(arm, IRType::Literal(lit) if lit.widened() == widened))
        .then_some(widened)
}

fn map_union(arms: &[IRType], name_hint: Option<&str>, config: &Config) -> Mapped {
    if let Some(collapsed) = simplify_union(arms, config) {
        return collapsed;
    }

    match config.union_strategy {
        UnionStrategy::Tagged | UnionStrategy::Interface => match name_hint {
            Some(name) => Mapped::new(name),
            // Anonymous wide unions have no nominal identity to hang a
            // definition on; they fall back to the top type.
            None => Mapped::new("interface{}"),
        },
        UnionStrategy::Any => Mapped::new("interface{}"),
    }
}

/// Capitalize the first character (source field → exported Go field).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests;

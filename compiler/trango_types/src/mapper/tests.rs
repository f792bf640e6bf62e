use pretty_assertions::assert_eq;
use trango_config::{Config, NullabilityStrategy, NumberStrategy, UnionStrategy};
use trango_ir::{
    FunctionType, IRType, IndexSignature, LiteralValue, Parameter, PrimitiveKind,
    PropertySignature,
};

use super::*;

fn num() -> IRType {
    IRType::primitive(PrimitiveKind::Number)
}

fn string() -> IRType {
    IRType::primitive(PrimitiveKind::String)
}

fn undefined() -> IRType {
    IRType::reference("undefined")
}

#[test]
fn primitives_under_default_config() {
    let config = Config::default();
    let cases = [
        (PrimitiveKind::Number, "float64"),
        (PrimitiveKind::String, "string"),
        (PrimitiveKind::Boolean, "bool"),
        (PrimitiveKind::Void, "interface{}"),
        (PrimitiveKind::Any, "interface{}"),
        (PrimitiveKind::Unknown, "interface{}"),
        (PrimitiveKind::Never, "struct{}"),
    ];
    for (kind, expected) in cases {
        assert_eq!(map_type(&IRType::primitive(kind), &config).repr, expected);
    }
}

#[test]
fn number_strategy_controls_number() {
    let mut config = Config::default();
    config.number_strategy = NumberStrategy::Int;
    assert_eq!(map_type(&num(), &config).repr, "int");

    config.number_strategy = NumberStrategy::Contextual;
    // No initializer shape at type positions: stays float64.
    assert_eq!(map_type(&num(), &config).repr, "float64");
    assert_eq!(
        number_repr(NumberStrategy::Contextual, Some(NumberShape::Integral)),
        "int"
    );
    assert_eq!(
        number_repr(NumberStrategy::Contextual, Some(NumberShape::Fractional)),
        "float64"
    );
}

#[test]
fn arrays_and_nested_arrays() {
    let config = Config::default();
    let ty = IRType::Array(Box::new(IRType::Array(Box::new(string()))));
    assert_eq!(map_type(&ty, &config).repr, "[][]string");
}

#[test]
fn tuple_maps_to_interned_name() {
    let config = Config::default();
    let ty = IRType::Tuple(vec![string(), num()]);
    assert_eq!(map_type(&ty, &config).repr, "Tuple2_string_float64");
}

#[test]
fn object_with_only_index_signature_is_a_map() {
    let config = Config::default();
    let ty = IRType::Object {
        props: vec![],
        index: Some(Box::new(IndexSignature {
            key: string(),
            value: num(),
        })),
    };
    assert_eq!(map_type(&ty, &config).repr, "map[string]float64");
}

#[test]
fn object_with_props_is_an_anonymous_record() {
    let config = Config::default();
    let ty = IRType::Object {
        props: vec![
            PropertySignature::new("name", string()),
            PropertySignature::new("age", num()),
        ],
        index: None,
    };
    assert_eq!(
        map_type(&ty, &config).repr,
        "struct{ Name string; Age float64 }"
    );
}

#[test]
fn async_function_gains_context_and_error() {
    let config = Config::default();
    let ty = IRType::Function(Box::new(FunctionType {
        params: vec![Parameter::new("u", Some(string()))],
        ret: string(),
        type_params: vec![],
        is_async: true,
    }));
    let mapped = map_type(&ty, &config);
    assert_eq!(mapped.repr, "func(ctx context.Context, string) (string, error)");
    assert_eq!(mapped.imports.as_slice(), &["context"]);
}

#[test]
fn void_function_has_no_return() {
    let config = Config::default();
    let ty = IRType::Function(Box::new(FunctionType {
        params: vec![],
        ret: IRType::primitive(PrimitiveKind::Void),
        type_params: vec![],
        is_async: false,
    }));
    assert_eq!(map_type(&ty, &config).repr, "func()");
}

#[test]
fn single_arm_union_collapses() {
    let config = Config::default();
    let ty = IRType::Union(vec![string()]);
    assert_eq!(map_type(&ty, &config).repr, "string");
}

#[test]
fn optional_shaped_union_becomes_pointer() {
    let config = Config::default();
    let ty = IRType::Union(vec![num(), undefined()]);
    assert_eq!(map_type(&ty, &config).repr, "*float64");
}

#[test]
fn nullability_strategies() {
    let mut config = Config::default();
    let ty = IRType::Union(vec![num(), undefined()]);

    config.nullability_strategy = NullabilityStrategy::Zero;
    assert_eq!(map_type(&ty, &config).repr, "float64");

    config.nullability_strategy = NullabilityStrategy::SqlNull;
    assert_eq!(map_type(&ty, &config).repr, "Null[float64]");
}

#[test]
fn literal_union_keeps_its_strategy_form() {
    // A literal union is a union like any other under the tagged and
    // interface strategies: the alias name is its nominal identity.
    let ty = IRType::Union(vec![
        IRType::Literal(LiteralValue::String("a".to_string())),
        IRType::Literal(LiteralValue::String("b".to_string())),
    ]);

    let mut config = Config::default();
    assert_eq!(config.union_strategy, UnionStrategy::Tagged);
    assert_eq!(map_type_named(&ty, Some("Status"), &config).repr, "Status");

    config.union_strategy = UnionStrategy::Interface;
    assert_eq!(map_type_named(&ty, Some("Status"), &config).repr, "Status");
}

#[test]
fn literal_union_widens_only_under_any_strategy() {
    let ty = IRType::Union(vec![
        IRType::Literal(LiteralValue::String("a".to_string())),
        IRType::Literal(LiteralValue::String("b".to_string())),
    ]);

    let mut config = Config::default();
    config.union_strategy = UnionStrategy::Any;
    // Widening beats erasing to the top type; runtime discrimination
    // works against either.
    assert_eq!(map_type(&ty, &config).repr, "string");
    assert_eq!(map_type_named(&ty, Some("Status"), &config).repr, "string");
}

#[test]
fn named_union_keeps_its_alias_name() {
    let config = Config::default();
    let ty = IRType::Union(vec![string(), num()]);
    assert_eq!(map_type_named(&ty, Some("R"), &config).repr, "R");
    // Anonymous wide unions fall back to the top type.
    assert_eq!(map_type(&ty, &config).repr, "interface{}");
}

#[test]
fn any_strategy_erases_unions() {
    let mut config = Config::default();
    config.union_strategy = UnionStrategy::Any;
    let ty = IRType::Union(vec![string(), num()]);
    assert_eq!(map_type_named(&ty, Some("R"), &config).repr, "interface{}");
}

#[test]
fn generic_reference_uses_brackets() {
    let config = Config::default();
    let ty = IRType::Reference {
        name: "Box".to_string(),
        type_args: vec![string()],
    };
    assert_eq!(map_type(&ty, &config).repr, "Box[string]");
}

#[test]
fn capitalize_handles_unicode_and_empty() {
    assert_eq!(capitalize("name"), "Name");
    assert_eq!(capitalize("Name"), "Name");
    assert_eq!(capitalize(""), "");
}

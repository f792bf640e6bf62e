//! End-to-end pipeline scenarios: typed AST in, Go source out.

use pretty_assertions::assert_eq;
use trango_ast::{
    AstAccessorKind, AstClass, AstClassMember, AstDeclarator, AstExpr, AstExprKind, AstLit,
    AstParam, AstStatement, AstStatementKind, AstType, LocationBuilder, ModifierSet, SourceFile,
    VarKind,
};
use trango_compile::{compile_module, CompileError, CompileOutput};
use trango_config::{Config, NumberStrategy, OptLevel};
use trango_ir::{BinaryOp, UnaryOp};

fn locs() -> LocationBuilder {
    LocationBuilder::new("m.ts")
}

fn file_with(statements: Vec<AstStatement>) -> SourceFile {
    let mut file = SourceFile::new("m", "m.ts");
    file.statements = statements;
    file
}

fn compile(statements: Vec<AstStatement>) -> CompileOutput {
    compile_with(statements, &Config::default())
}

fn compile_with(statements: Vec<AstStatement>, config: &Config) -> CompileOutput {
    match compile_module(&file_with(statements), config) {
        Ok(output) => output,
        Err(error) => panic!("pipeline failed: {error}"),
    }
}

fn const_decl(name: &str, ty: Option<AstType>, init: AstExpr, exported: bool) -> AstStatement {
    let l = locs();
    AstStatement::new(
        AstStatementKind::VarStatement {
            kind: VarKind::Const,
            declarators: vec![AstDeclarator {
                name: name.to_string(),
                ty,
                init: Some(init),
                loc: l.span(1, 7, 6, name.len() as u32),
            }],
            modifiers: if exported {
                ModifierSet::from_keywords(["export"])
            } else {
                ModifierSet::new()
            },
        },
        l.span(1, 1, 0, 20),
    )
}

#[test]
fn scenario_exported_number_constant() {
    let l = locs();
    let output = compile(vec![const_decl(
        "x",
        Some(AstType::keyword("number")),
        AstExpr::lit(AstLit::Number(42.0), l.span(1, 19, 18, 2)),
        true,
    )]);

    assert!(output.code.contains("var X float64 = 42"));
    assert!(output.diagnostics.is_empty());
    assert!(output.imports.is_empty());
}

#[test]
fn scenario_async_function_with_context_and_error() {
    let l = locs();
    let func = trango_ast::AstFunction {
        name: "f".to_string(),
        params: vec![AstParam::new(
            "u",
            Some(AstType::keyword("string")),
            l.span(1, 25, 24, 9),
        )],
        ret: Some(AstType::Ref {
            name: "Promise".to_string(),
            args: vec![AstType::keyword("string")],
        }),
        body: Some(vec![AstStatement::new(
            AstStatementKind::Return(Some(AstExpr::lit(
                AstLit::String("ok".to_string()),
                l.span(2, 10, 70, 4),
            ))),
            l.span(2, 3, 63, 12),
        )]),
        type_params: vec![],
        modifiers: ModifierSet::from_keywords(["export", "async"]),
    };
    let output = compile(vec![AstStatement::new(
        AstStatementKind::Function(func),
        l.span(1, 1, 0, 80),
    )]);

    assert!(output
        .code
        .contains("func F(ctx context.Context, u string) (string, error) {"));
    assert!(output.code.contains("return \"ok\", nil"));
    assert!(output.imports.contains("context"));
}

#[test]
fn scenario_tagged_union_alias() {
    let l = locs();
    let arm = |flag: bool, field: &str, ty: &str| {
        AstType::Object(vec![
            trango_ast::AstTypeMember::Property {
                name: "ok".to_string(),
                ty: AstType::Literal(AstLit::Boolean(flag)),
                optional: false,
                readonly: false,
                loc: l.span(1, 10, 9, 8),
            },
            trango_ast::AstTypeMember::Property {
                name: field.to_string(),
                ty: AstType::keyword(ty),
                optional: false,
                readonly: false,
                loc: l.span(1, 20, 19, 9),
            },
        ])
    };
    let alias = AstStatement::new(
        AstStatementKind::TypeAlias {
            name: "R".to_string(),
            type_params: vec![],
            ty: AstType::Union(vec![arm(true, "v", "number"), arm(false, "e", "string")]),
            modifiers: ModifierSet::from_keywords(["export"]),
        },
        l.span(1, 1, 0, 60),
    );
    let output = compile(vec![alias]);

    assert!(output.code.contains("type RArm0 struct {"));
    assert!(output.code.contains("type RArm1 struct {"));
    assert!(output
        .code
        .contains("type R struct {\n\ttag int\n\tvalue0 *RArm0\n\tvalue1 *RArm1\n}"));
    for i in 0..2 {
        assert!(output.code.contains(&format!("IsType{i}()")));
        assert!(output.code.contains(&format!("AsType{i}()")));
        assert!(output.code.contains(&format!("func NewRFromArm{i}")));
    }
}

#[test]
fn scenario_class_with_counter_method() {
    let l = locs();
    let class = AstClass {
        name: "C".to_string(),
        type_params: vec![],
        extends: None,
        implements: vec![],
        members: vec![
            AstClassMember::Property {
                name: "n".to_string(),
                ty: Some(AstType::keyword("number")),
                init: Some(AstExpr::lit(AstLit::Number(0.0), l.span(1, 30, 29, 1))),
                modifiers: ModifierSet::from_keywords(["private"]),
                loc: l.span(1, 11, 10, 20),
            },
            AstClassMember::Method {
                name: "inc".to_string(),
                kind: AstAccessorKind::Method,
                params: vec![],
                ret: Some(AstType::keyword("number")),
                body: Some(vec![AstStatement::new(
                    AstStatementKind::Return(Some(AstExpr::new(
                        AstExprKind::Unary {
                            op: UnaryOp::Increment,
                            arg: Box::new(AstExpr::new(
                                AstExprKind::Member {
                                    object: Box::new(AstExpr::ident("this", l.span(1, 60, 59, 4))),
                                    property: "n".to_string(),
                                    computed: false,
                                    optional: false,
                                },
                                l.span(1, 60, 59, 6),
                            )),
                            prefix: true,
                        },
                        l.span(1, 58, 57, 8),
                    ))),
                    l.span(1, 51, 50, 16),
                )]),
                type_params: vec![],
                modifiers: ModifierSet::new(),
                loc: l.span(1, 33, 32, 40),
            },
        ],
        modifiers: ModifierSet::from_keywords(["export"]),
    };

    let mut config = Config::default();
    config.number_strategy = NumberStrategy::Contextual;
    let output = compile_with(
        vec![AstStatement::new(
            AstStatementKind::Class(class),
            locs().span(1, 1, 0, 80),
        )],
        &config,
    );

    assert!(output.code.contains("type C struct {\n\tn int\n}"));
    assert!(output.code.contains("func NewC() *C {"));
    assert!(output.code.contains("func (c *C) Inc() int {"));
    assert!(output.code.contains("c.n++"));
    assert!(output.code.contains("return c.n"));
}

#[test]
fn scenario_tuple_variable() {
    let l = locs();
    let tuple_ty = AstType::Tuple(vec![AstType::keyword("string"), AstType::keyword("number")]);
    let init = AstExpr::new(
        AstExprKind::Array(vec![
            AstExpr::lit(AstLit::String("a".to_string()), l.span(1, 30, 29, 3)),
            AstExpr::lit(AstLit::Number(1.0), l.span(1, 35, 34, 1)),
        ]),
        l.span(1, 29, 28, 8),
    );
    // Level 0 keeps the unreferenced local-style constant around.
    let mut config = Config::default();
    config.optimization_level = OptLevel::O0;
    let output = compile_with(vec![const_decl("t", Some(tuple_ty), init, false)], &config);

    let def_at = output
        .code
        .find("type Tuple2_string_float64 struct {")
        .unwrap_or(usize::MAX);
    let use_at = output.code.find("var t Tuple2_string_float64").unwrap_or(0);
    assert!(def_at < use_at);
    assert!(output
        .code
        .contains("var t Tuple2_string_float64 = Tuple2_string_float64{\"a\", 1}"));
}

#[test]
fn scenario_nullish_coalescing_parameter() {
    let l = locs();
    let func = trango_ast::AstFunction {
        name: "g".to_string(),
        params: vec![
            AstParam::new("a", Some(AstType::keyword("number")), l.span(1, 12, 11, 9)),
            AstParam::new(
                "b",
                Some(AstType::Union(vec![
                    AstType::keyword("number"),
                    AstType::keyword("undefined"),
                ])),
                l.span(1, 23, 22, 21),
            ),
        ],
        ret: None,
        body: Some(vec![AstStatement::new(
            AstStatementKind::Return(Some(AstExpr::new(
                AstExprKind::Binary {
                    op: BinaryOp::Add,
                    left: Box::new(AstExpr::ident("a", l.span(2, 10, 60, 1))),
                    right: Box::new(AstExpr::new(
                        AstExprKind::Binary {
                            op: BinaryOp::Coalesce,
                            left: Box::new(AstExpr::ident("b", l.span(2, 15, 65, 1))),
                            right: Box::new(AstExpr::lit(
                                AstLit::Number(0.0),
                                l.span(2, 20, 70, 1),
                            )),
                        },
                        l.span(2, 15, 65, 7),
                    )),
                },
                l.span(2, 10, 60, 12),
            ))),
            l.span(2, 3, 53, 20),
        )]),
        type_params: vec![],
        modifiers: ModifierSet::from_keywords(["export"]),
    };
    let output = compile(vec![AstStatement::new(
        AstStatementKind::Function(func),
        l.span(1, 1, 0, 80),
    )]);

    assert!(output.code.contains("func G(a float64, b *float64)"));
    assert!(output
        .code
        .contains("func() float64 { if b != nil { return *b }; return 0 }()"));
}

#[test]
fn dead_code_is_eliminated_at_level_one_but_not_zero() {
    let l = locs();
    let statements = || {
        vec![
            const_decl(
                "kept",
                Some(AstType::keyword("number")),
                AstExpr::lit(AstLit::Number(1.0), l.span(1, 19, 18, 1)),
                true,
            ),
            const_decl(
                "dropped",
                Some(AstType::keyword("number")),
                AstExpr::lit(AstLit::Number(2.0), l.span(2, 19, 38, 1)),
                false,
            ),
        ]
    };

    let output = compile(statements());
    assert!(output.code.contains("var Kept"));
    assert!(!output.code.contains("dropped"));

    let mut config = Config::default();
    config.optimization_level = OptLevel::O0;
    let output = compile_with(statements(), &config);
    assert!(output.code.contains("var dropped"));
}

#[test]
fn constant_folding_reaches_the_output() {
    let l = locs();
    let init = AstExpr::new(
        AstExprKind::Binary {
            op: BinaryOp::Add,
            left: Box::new(AstExpr::lit(AstLit::Number(40.0), l.span(1, 19, 18, 2))),
            right: Box::new(AstExpr::lit(AstLit::Number(2.0), l.span(1, 24, 23, 1))),
        },
        l.span(1, 19, 18, 6),
    );
    let output = compile(vec![const_decl(
        "x",
        Some(AstType::keyword("number")),
        init,
        true,
    )]);
    assert!(output.code.contains("var X float64 = 42"));
}

#[test]
fn strict_mode_fails_on_unsupported_constructs() {
    let l = locs();
    let statements = vec![AstStatement::new(
        AstStatementKind::Expr(AstExpr::new(
            AstExprKind::Unsupported {
                construct: "decorator".to_string(),
            },
            l.span(1, 1, 0, 10),
        )),
        l.span(1, 1, 0, 10),
    )];

    let mut config = Config::default();
    config.strict = true;
    let result = compile_module(&file_with(statements.clone()), &config);
    assert!(matches!(
        result,
        Err(CompileError::Strict { errors: 1, .. })
    ));

    // Non-strict: same input compiles, diagnostic reported.
    let output = compile(statements);
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].code.as_str(), "E3001");
}

#[test]
fn runtime_helper_ships_only_on_request() {
    let l = locs();
    let decl = const_decl(
        "x",
        Some(AstType::keyword("number")),
        AstExpr::lit(AstLit::Number(1.0), l.span(1, 19, 18, 1)),
        true,
    );

    let output = compile(vec![decl.clone()]);
    assert!(output.runtime.is_none());

    let mut config = Config::default();
    config.generate_runtime = true;
    let output = compile_with(vec![decl], &config);
    let Some(runtime) = output.runtime else {
        panic!("runtime requested");
    };
    assert!(runtime.contains("package trangoruntime"));
}

#[test]
fn source_map_flows_through_the_pipeline() {
    let l = locs();
    let mut config = Config::default();
    config.source_map = true;
    let output = compile_with(
        vec![const_decl(
            "x",
            Some(AstType::keyword("number")),
            AstExpr::lit(AstLit::Number(1.0), l.span(1, 19, 18, 1)),
            true,
        )],
        &config,
    );

    let Some(map) = output.source_map else {
        panic!("source map requested");
    };
    assert_eq!(map.sources, vec!["m.ts".to_string()]);
    assert!(map.to_json().contains("\"version\": 3"));
}

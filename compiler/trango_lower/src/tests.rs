use pretty_assertions::assert_eq;
use trango_ast::{
    AstAccessorKind, AstClass, AstClassMember, AstDeclarator, AstEnumMember, AstExpr, AstExprKind,
    AstImportSpecifier, AstInterface, AstLit, AstParam, AstStatement, AstStatementKind,
    AstTemplate, AstType, AstTypeMember, LocationBuilder, ModifierSet, SourceFile, VarKind,
};
use trango_config::Config;
use trango_diagnostic::{DiagnosticQueue, ErrorCode};
use trango_ir::{
    ClassMember, Declaration, ExprKind, Modifiers, PrimitiveKind, StmtKind, INDEX_PROP,
};

use crate::lower_file;

fn locs() -> LocationBuilder {
    LocationBuilder::new("m.ts")
}

fn lower(statements: Vec<AstStatement>) -> (trango_ir::Module, DiagnosticQueue) {
    let mut file = SourceFile::new("m", "m.ts");
    file.statements = statements;
    let mut diagnostics = DiagnosticQueue::new();
    let module = lower_file(&file, &Config::default(), &mut diagnostics);
    (module, diagnostics)
}

#[test]
fn var_statement_splits_declarators() {
    let l = locs();
    let stmt = AstStatement::new(
        AstStatementKind::VarStatement {
            kind: VarKind::Const,
            declarators: vec![
                AstDeclarator {
                    name: "a".to_string(),
                    ty: Some(AstType::keyword("number")),
                    init: Some(AstExpr::lit(AstLit::Number(1.0), l.span(1, 11, 10, 1))),
                    loc: l.span(1, 7, 6, 5),
                },
                AstDeclarator {
                    name: "b".to_string(),
                    ty: None,
                    init: Some(AstExpr::lit(AstLit::Number(2.0), l.span(1, 18, 17, 1))),
                    loc: l.span(1, 14, 13, 5),
                },
            ],
            modifiers: ModifierSet::from_keywords(["export"]),
        },
        l.span(1, 1, 0, 19),
    );

    let (module, diagnostics) = lower(vec![stmt]);
    assert!(!diagnostics.has_errors());

    let names: Vec<&str> = module.declarations().map(Declaration::name).collect();
    assert_eq!(names, vec!["a", "b"]);

    let Some(Declaration::Variable(a)) = module.declaration("a") else {
        panic!("expected variable declaration");
    };
    assert!(a.is_const);
    assert!(a.modifiers.contains(Modifiers::EXPORT | Modifiers::CONST));
    assert_eq!(a.ty, Some(trango_ir::IRType::primitive(PrimitiveKind::Number)));
    // Locations come from the declarator, not the statement.
    assert_eq!(a.loc.start.column, 7);
}

#[test]
fn class_lowering_renames_accessors_and_promotes_ctor_params() {
    let l = locs();
    let ctor_param = {
        let mut param = AstParam::new("email", Some(AstType::keyword("string")), l.span(3, 15, 40, 5));
        param.modifiers = ModifierSet::from_keywords(["private"]);
        param
    };
    let class = AstClass {
        name: "User".to_string(),
        type_params: vec![],
        extends: Some(("Base".to_string(), vec![])),
        implements: vec![("Printable".to_string(), vec![])],
        members: vec![
            AstClassMember::Property {
                name: "age".to_string(),
                ty: Some(AstType::keyword("number")),
                init: None,
                modifiers: ModifierSet::new(),
                loc: l.span(2, 3, 20, 3),
            },
            AstClassMember::Method {
                name: "constructor".to_string(),
                kind: AstAccessorKind::Constructor,
                params: vec![ctor_param],
                ret: None,
                body: Some(vec![
                    AstStatement::new(
                        AstStatementKind::Expr(AstExpr::new(
                            AstExprKind::Call {
                                callee: Box::new(AstExpr::new(
                                    AstExprKind::Super,
                                    l.span(4, 5, 60, 5),
                                )),
                                args: vec![AstExpr::ident("email", l.span(4, 11, 66, 5))],
                            },
                            l.span(4, 5, 60, 12),
                        )),
                        l.span(4, 5, 60, 13),
                    ),
                    AstStatement::new(
                        AstStatementKind::Expr(AstExpr::new(
                            AstExprKind::Assignment {
                                op: trango_ir::AssignOp::Assign,
                                target: Box::new(AstExpr::new(
                                    AstExprKind::Member {
                                        object: Box::new(AstExpr::ident(
                                            "this",
                                            l.span(5, 5, 80, 4),
                                        )),
                                        property: "age".to_string(),
                                        computed: false,
                                        optional: false,
                                    },
                                    l.span(5, 5, 80, 8),
                                )),
                                value: Box::new(AstExpr::lit(
                                    AstLit::Number(0.0),
                                    l.span(5, 16, 91, 1),
                                )),
                            },
                            l.span(5, 5, 80, 12),
                        )),
                        l.span(5, 5, 80, 13),
                    ),
                ]),
                type_params: vec![],
                modifiers: ModifierSet::new(),
                loc: l.span(3, 3, 30, 10),
            },
            AstClassMember::Method {
                name: "title".to_string(),
                kind: AstAccessorKind::Getter,
                params: vec![],
                ret: Some(AstType::keyword("string")),
                body: Some(vec![]),
                type_params: vec![],
                modifiers: ModifierSet::new(),
                loc: l.span(7, 3, 120, 10),
            },
        ],
        modifiers: ModifierSet::from_keywords(["export"]),
    };

    let (module, diagnostics) = lower(vec![AstStatement::new(
        AstStatementKind::Class(class),
        l.span(1, 1, 0, 200),
    )]);
    assert!(!diagnostics.has_errors());

    let Some(Declaration::Class(class)) = module.declaration("User") else {
        panic!("expected class declaration");
    };

    assert_eq!(class.extends.as_ref().map(|p| p.name.as_str()), Some("Base"));
    assert_eq!(class.implements.len(), 1);

    // Accessor renamed.
    let method_names: Vec<&str> = class
        .members
        .iter()
        .filter_map(|m| match m {
            ClassMember::Method(method) => Some(method.name.as_str()),
            ClassMember::Property(_) => None,
        })
        .collect();
    assert!(method_names.contains(&"get_title"));

    // Promoted constructor-parameter property.
    let promoted: Vec<&trango_ir::PropertyMember> = class
        .members
        .iter()
        .filter_map(|m| match m {
            ClassMember::Property(prop) if prop.is_ctor_param => Some(prop),
            _ => None,
        })
        .collect();
    assert_eq!(promoted.len(), 1);
    assert_eq!(promoted[0].name, "email");
    assert!(promoted[0].modifiers.contains(Modifiers::PRIVATE));

    // Constructor analysis: super at 0, this.age at 1.
    let Some(ctor) = &class.ctor else {
        panic!("expected constructor analysis");
    };
    assert_eq!(ctor.super_call, Some(0));
    assert_eq!(ctor.field_assigns, vec![(1, "age".to_string())]);
}

#[test]
fn interface_methods_become_function_properties() {
    let l = locs();
    let interface = AstInterface {
        name: "Repo".to_string(),
        type_params: vec![],
        extends: vec![],
        members: vec![
            AstTypeMember::Method {
                name: "find".to_string(),
                params: vec![AstParam::new(
                    "id",
                    Some(AstType::keyword("string")),
                    l.span(2, 8, 20, 2),
                )],
                ret: Some(AstType::keyword("number")),
                optional: false,
                loc: l.span(2, 3, 15, 20),
            },
            AstTypeMember::Index {
                key: AstType::keyword("string"),
                value: AstType::keyword("number"),
                loc: l.span(3, 3, 40, 20),
            },
        ],
        modifiers: ModifierSet::new(),
    };

    let (module, _) = lower(vec![AstStatement::new(
        AstStatementKind::Interface(interface),
        l.span(1, 1, 0, 80),
    )]);

    let Some(Declaration::Interface(interface)) = module.declaration("Repo") else {
        panic!("expected interface declaration");
    };
    assert!(matches!(
        interface.props[0].ty,
        trango_ir::IRType::Function(_)
    ));
    assert_eq!(interface.props[1].name, INDEX_PROP);
}

#[test]
fn enum_string_member_marks_heterogeneous() {
    let l = locs();
    let make = |members: Vec<AstEnumMember>| {
        AstStatement::new(
            AstStatementKind::Enum {
                name: "Color".to_string(),
                members,
                modifiers: ModifierSet::new(),
            },
            l.span(1, 1, 0, 40),
        )
    };

    let (module, _) = lower(vec![make(vec![AstEnumMember {
        name: "Red".to_string(),
        init: Some(AstExpr::lit(AstLit::String("red".to_string()), l.span(1, 14, 13, 5))),
        loc: l.span(1, 8, 7, 12),
    }])]);
    let Some(Declaration::Enum(decl)) = module.declaration("Color") else {
        panic!("expected enum declaration");
    };
    assert!(decl.heterogeneous);

    let (module, _) = lower(vec![make(vec![AstEnumMember {
        name: "Red".to_string(),
        init: None,
        loc: l.span(1, 8, 7, 3),
    }])]);
    let Some(Declaration::Enum(decl)) = module.declaration("Color") else {
        panic!("expected enum declaration");
    };
    assert!(!decl.heterogeneous);
}

#[test]
fn unsupported_expression_lowers_to_placeholder() {
    let l = locs();
    let stmt = AstStatement::new(
        AstStatementKind::Expr(AstExpr::new(
            AstExprKind::Unsupported {
                construct: "decorator".to_string(),
            },
            l.span(1, 1, 0, 10),
        )),
        l.span(1, 1, 0, 10),
    );

    let (module, diagnostics) = lower(vec![stmt]);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.all()[0].code, ErrorCode::E3001);

    let Some(StmtKind::Expr(expr)) = module.body.first().map(|s| &s.kind) else {
        panic!("expected expression statement");
    };
    assert_eq!(expr.as_identifier(), Some("unknown"));
    // The placeholder keeps the source location for diagnostics.
    assert_eq!(expr.loc.start.line, 1);
}

#[test]
fn inconsistent_template_parts_are_padded() {
    let l = locs();
    let stmt = AstStatement::new(
        AstStatementKind::Expr(AstExpr::new(
            AstExprKind::Template(AstTemplate {
                quasis: vec!["hello ".to_string()],
                exprs: vec![AstExpr::ident("name", l.span(1, 9, 8, 4))],
            }),
            l.span(1, 1, 0, 16),
        )),
        l.span(1, 1, 0, 16),
    );

    let (module, diagnostics) = lower(vec![stmt]);
    assert_eq!(diagnostics.all()[0].code, ErrorCode::E1002);

    let Some(StmtKind::Expr(expr)) = module.body.first().map(|s| &s.kind) else {
        panic!("expected expression statement");
    };
    let ExprKind::TemplateLiteral { quasis, exprs } = &expr.kind else {
        panic!("expected template literal");
    };
    assert_eq!(quasis.len(), exprs.len() + 1);
}

#[test]
fn imports_and_exports_are_captured_off_the_body() {
    let l = locs();
    let statements = vec![
        AstStatement::new(
            AstStatementKind::Import {
                source: "./util".to_string(),
                specifiers: vec![AstImportSpecifier {
                    imported: "helper".to_string(),
                    local: "h".to_string(),
                    is_default: false,
                    is_namespace: false,
                }],
            },
            l.span(1, 1, 0, 30),
        ),
        AstStatement::new(
            AstStatementKind::Export {
                specifiers: vec![trango_ast::AstExportSpecifier {
                    local: "x".to_string(),
                    exported: "y".to_string(),
                }],
                source: Some("./other".to_string()),
                is_default: false,
            },
            l.span(2, 1, 31, 30),
        ),
    ];

    let (module, _) = lower(statements);
    assert!(module.body.is_empty());
    assert_eq!(module.imports.len(), 1);
    assert!(module.imports_name("h"));
    assert_eq!(module.exports.len(), 1);
    assert_eq!(module.exports[0].source.as_deref(), Some("./other"));
}

#[test]
fn async_functions_carry_the_async_modifier() {
    let l = locs();
    let func = trango_ast::AstFunction {
        name: "fetch".to_string(),
        params: vec![],
        ret: Some(AstType::Ref {
            name: "Promise".to_string(),
            args: vec![AstType::keyword("string")],
        }),
        body: Some(vec![]),
        type_params: vec![],
        modifiers: ModifierSet::from_keywords(["export", "async"]),
    };
    let (module, _) = lower(vec![AstStatement::new(
        AstStatementKind::Function(func),
        l.span(1, 1, 0, 50),
    )]);

    let Some(Declaration::Function(decl)) = module.declaration("fetch") else {
        panic!("expected function declaration");
    };
    assert!(decl.is_async());
    assert!(decl.modifiers.is_exported());
}

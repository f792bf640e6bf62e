//! Declaration lowering.

use trango_ast::{
    AstAccessorKind, AstClass, AstClassMember, AstDeclarator, AstEnumMember, AstExportSpecifier,
    AstFunction, AstImportSpecifier, AstInterface, AstLit, AstType, AstTypeMember, AstTypeParam,
    ModifierSet, VarKind,
};
use trango_diagnostic::{Diagnostic, ErrorCode};
use trango_ir::{
    decl_stmt, ClassDecl, ClassMember, CtorAnalysis, Declaration, EnumDecl, EnumMember, Export,
    ExportSpec, Expr, ExprKind, FunctionDecl, Import, ImportSpec, InterfaceDecl, MethodMember,
    Modifiers, PropertyMember, PropertySignature, SourceLocation, Stmt, StmtKind, TypeAliasDecl,
    TypeRef, VariableDecl, INDEX_PROP,
};

use crate::Lowerer;

impl Lowerer<'_> {
    /// Split a variable statement into one declaration per declarator.
    pub(crate) fn lower_var_statement(
        &mut self,
        kind: VarKind,
        declarators: &[AstDeclarator],
        modifiers: &ModifierSet,
        _loc: &SourceLocation,
    ) -> Vec<Stmt> {
        let mut modifiers = self.lower_modifiers(modifiers);
        if kind.is_const() {
            modifiers |= Modifiers::CONST;
        }

        declarators
            .iter()
            .map(|declarator| {
                let ty = self.lower_opt_type(declarator.ty.as_ref(), &declarator.loc);
                self.warn_any_if_needed(ty.as_ref(), modifiers, &declarator.loc);
                let decl = Declaration::Variable(VariableDecl {
                    name: declarator.name.clone(),
                    ty,
                    init: declarator.init.as_ref().map(|init| self.lower_expr(init)),
                    is_const: kind.is_const(),
                    modifiers,
                    loc: declarator.loc.clone(),
                });
                decl_stmt(decl, declarator.loc.clone())
            })
            .collect()
    }

    /// Lower a function declaration.
    pub(crate) fn lower_function_decl(&mut self, func: &AstFunction, loc: &SourceLocation) -> Stmt {
        let mut modifiers = self.lower_modifiers(&func.modifiers);
        if func.modifiers.contains("async") {
            modifiers |= Modifiers::ASYNC;
        }
        let decl = Declaration::Function(FunctionDecl {
            name: func.name.clone(),
            params: self.lower_params(&func.params),
            ret: self.lower_opt_type(func.ret.as_ref(), loc),
            body: func.body.as_ref().map(|body| self.lower_body(body)),
            type_params: self.lower_type_params(&func.type_params, loc),
            modifiers,
            loc: loc.clone(),
        });
        decl_stmt(decl, loc.clone())
    }

    /// Lower a class: members, constructor-parameter properties, and
    /// the constructor body analysis the emitter's factory synthesis
    /// relies on.
    pub(crate) fn lower_class_decl(&mut self, class: &AstClass, loc: &SourceLocation) -> Stmt {
        let mut members = Vec::with_capacity(class.members.len());

        for member in &class.members {
            match member {
                AstClassMember::Property {
                    name,
                    ty,
                    init,
                    modifiers,
                    loc: member_loc,
                } => {
                    members.push(ClassMember::Property(PropertyMember {
                        name: name.clone(),
                        ty: self.lower_opt_type(ty.as_ref(), member_loc),
                        init: init.as_ref().map(|init| self.lower_expr(init)),
                        modifiers: self.lower_modifiers(modifiers),
                        is_ctor_param: false,
                        loc: member_loc.clone(),
                    }));
                }
                AstClassMember::Method {
                    name,
                    kind,
                    params,
                    ret,
                    body,
                    type_params,
                    modifiers,
                    loc: member_loc,
                } => {
                    // Accessors are renamed; the emitter never sees
                    // getter/setter syntax.
                    let lowered_name = match kind {
                        AstAccessorKind::Getter => format!("get_{name}"),
                        AstAccessorKind::Setter => format!("set_{name}"),
                        AstAccessorKind::Constructor => "constructor".to_string(),
                        AstAccessorKind::Method => name.clone(),
                    };
                    let mut lowered_modifiers = self.lower_modifiers(modifiers);
                    if modifiers.contains("async") {
                        lowered_modifiers |= Modifiers::ASYNC;
                    }
                    members.push(ClassMember::Method(MethodMember {
                        name: lowered_name,
                        params: self.lower_params(params),
                        ret: self.lower_opt_type(ret.as_ref(), member_loc),
                        body: body.as_ref().map(|body| self.lower_body(body)),
                        type_params: self.lower_type_params(type_params, member_loc),
                        modifiers: lowered_modifiers,
                        loc: member_loc.clone(),
                    }));
                }
            }
        }

        // Constructor-parameter properties become instance fields.
        self.promote_ctor_params(class, &mut members, loc);

        let ctor = analyze_constructor(&members);

        let decl = Declaration::Class(ClassDecl {
            name: class.name.clone(),
            type_params: self.lower_type_params(&class.type_params, loc),
            extends: class
                .extends
                .as_ref()
                .map(|(name, args)| self.lower_heritage(name, args, loc)),
            implements: class
                .implements
                .iter()
                .map(|(name, args)| self.lower_heritage(name, args, loc))
                .collect(),
            members,
            ctor,
            modifiers: self.lower_modifiers(&class.modifiers),
            loc: loc.clone(),
        });
        decl_stmt(decl, loc.clone())
    }

    fn lower_heritage(
        &mut self,
        name: &str,
        args: &[AstType],
        loc: &SourceLocation,
    ) -> TypeRef {
        TypeRef {
            name: name.to_string(),
            type_args: args.iter().map(|arg| self.lower_type(arg, loc)).collect(),
        }
    }

    /// Append a property for every constructor parameter that carries a
    /// visibility or `readonly` keyword.
    fn promote_ctor_params(
        &mut self,
        class: &AstClass,
        members: &mut Vec<ClassMember>,
        _loc: &SourceLocation,
    ) {
        let ctor_params: Vec<(String, Option<AstType>, ModifierSet, SourceLocation)> = class
            .members
            .iter()
            .find_map(|member| match member {
                AstClassMember::Method {
                    kind: AstAccessorKind::Constructor,
                    params,
                    ..
                } => Some(
                    params
                        .iter()
                        .filter(|p| {
                            self.lower_modifiers(&p.modifiers)
                                .declares_parameter_property()
                        })
                        .map(|p| {
                            (
                                p.name.clone(),
                                p.ty.clone(),
                                p.modifiers.clone(),
                                p.loc.clone(),
                            )
                        })
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default();

        for (name, ty, modifiers, param_loc) in ctor_params {
            let ty = self.lower_opt_type(ty.as_ref(), &param_loc);
            members.push(ClassMember::Property(PropertyMember {
                name,
                ty,
                init: None,
                modifiers: self.lower_modifiers(&modifiers),
                is_ctor_param: true,
                loc: param_loc,
            }));
        }
    }

    /// Lower an interface. Method signatures become properties of
    /// function type; a lone index signature becomes the `[index]`
    /// property with a key→value function shape.
    pub(crate) fn lower_interface_decl(
        &mut self,
        interface: &AstInterface,
        loc: &SourceLocation,
    ) -> Stmt {
        let mut props = Vec::with_capacity(interface.members.len());

        for member in &interface.members {
            match member {
                AstTypeMember::Property {
                    name,
                    ty,
                    optional,
                    readonly,
                    loc: member_loc,
                } => props.push(PropertySignature {
                    name: name.clone(),
                    ty: self.lower_type(ty, member_loc),
                    optional: *optional,
                    readonly: *readonly,
                }),
                AstTypeMember::Method {
                    name,
                    params,
                    ret,
                    optional,
                    loc: member_loc,
                } => props.push(PropertySignature {
                    name: name.clone(),
                    ty: self.method_signature_type(params, ret.as_ref(), member_loc),
                    optional: *optional,
                    readonly: false,
                }),
                AstTypeMember::Index {
                    key,
                    value,
                    loc: member_loc,
                } => props.push(PropertySignature {
                    name: INDEX_PROP.to_string(),
                    ty: self.index_signature_type(key, value, member_loc),
                    optional: false,
                    readonly: false,
                }),
            }
        }

        let decl = Declaration::Interface(InterfaceDecl {
            name: interface.name.clone(),
            type_params: self.lower_type_params(&interface.type_params, loc),
            extends: interface
                .extends
                .iter()
                .map(|(name, args)| self.lower_heritage(name, args, loc))
                .collect(),
            props,
            modifiers: self.lower_modifiers(&interface.modifiers),
            loc: loc.clone(),
        });
        decl_stmt(decl, loc.clone())
    }

    /// An index signature's `Function(K) → V` shape.
    fn index_signature_type(
        &mut self,
        key: &AstType,
        value: &AstType,
        loc: &SourceLocation,
    ) -> trango_ir::IRType {
        use trango_ir::{FunctionType, IRType, Parameter};
        IRType::Function(Box::new(FunctionType {
            params: vec![Parameter::new("key", Some(self.lower_type(key, loc)))],
            ret: self.lower_type(value, loc),
            type_params: Vec::new(),
            is_async: false,
        }))
    }

    /// Lower a type alias; the body type is preserved verbatim.
    pub(crate) fn lower_type_alias(
        &mut self,
        name: &str,
        type_params: &[AstTypeParam],
        ty: &AstType,
        modifiers: &ModifierSet,
        loc: &SourceLocation,
    ) -> Stmt {
        let decl = Declaration::TypeAlias(TypeAliasDecl {
            name: name.to_string(),
            type_params: self.lower_type_params(type_params, loc),
            ty: self.lower_type(ty, loc),
            modifiers: self.lower_modifiers(modifiers),
            loc: loc.clone(),
        });
        decl_stmt(decl, loc.clone())
    }

    /// Lower an enum, marking heterogeneity when any member initializer
    /// is a string literal.
    pub(crate) fn lower_enum_decl(
        &mut self,
        name: &str,
        members: &[AstEnumMember],
        modifiers: &ModifierSet,
        loc: &SourceLocation,
    ) -> Stmt {
        let heterogeneous = members
            .iter()
            .any(|m| matches!(m.init, Some(ref init) if is_string_literal(init)));

        let lowered_members = members
            .iter()
            .map(|member| {
                let value = member.init.as_ref().map(|init| self.lower_expr(init));
                if let Some(value) = &value {
                    self.check_enum_initializer(value, &member.loc);
                }
                EnumMember {
                    name: member.name.clone(),
                    value,
                    loc: member.loc.clone(),
                }
            })
            .collect();

        let decl = Declaration::Enum(EnumDecl {
            name: name.to_string(),
            members: lowered_members,
            heterogeneous,
            modifiers: self.lower_modifiers(modifiers),
            loc: loc.clone(),
        });
        decl_stmt(decl, loc.clone())
    }

    /// Enum member initializers must fold to a literal eventually;
    /// anything that cannot possibly do so is flagged here.
    fn check_enum_initializer(&mut self, value: &Expr, loc: &SourceLocation) {
        let foldable = matches!(
            value.kind,
            ExprKind::Literal(_)
                | ExprKind::Binary { .. }
                | ExprKind::Unary { .. }
                | ExprKind::Identifier(_)
        );
        if !foldable {
            self.diagnostics.push(Diagnostic::new(
                ErrorCode::E1003,
                "enum member initializer must be a constant expression",
                loc.clone(),
            ));
        }
    }

    /// Lower an import statement.
    pub(crate) fn lower_import(
        &mut self,
        source: &str,
        specifiers: &[AstImportSpecifier],
        loc: &SourceLocation,
    ) -> Import {
        Import {
            source: source.to_string(),
            specs: specifiers
                .iter()
                .map(|spec| ImportSpec {
                    imported: spec.imported.clone(),
                    local: spec.local.clone(),
                    is_default: spec.is_default,
                    is_namespace: spec.is_namespace,
                })
                .collect(),
            loc: loc.clone(),
        }
    }

    /// Lower an export statement (specifier or re-export form).
    pub(crate) fn lower_export(
        &mut self,
        specifiers: &[AstExportSpecifier],
        source: Option<&str>,
        is_default: bool,
        loc: &SourceLocation,
    ) -> Export {
        Export {
            specs: specifiers
                .iter()
                .map(|spec| ExportSpec {
                    local: spec.local.clone(),
                    exported: spec.exported.clone(),
                })
                .collect(),
            source: source.map(ToString::to_string),
            is_default,
            loc: loc.clone(),
        }
    }
}

/// Record which constructor-body statements assign `this.x` and which
/// call `super(...)`.
fn analyze_constructor(members: &[ClassMember]) -> Option<CtorAnalysis> {
    let ctor = members.iter().find_map(|member| match member {
        ClassMember::Method(method) if method.is_constructor() => Some(method),
        _ => None,
    })?;
    let body = ctor.body.as_ref()?;

    let mut analysis = CtorAnalysis::default();
    for (index, stmt) in body.iter().enumerate() {
        match &stmt.kind {
            StmtKind::Expr(Expr {
                kind: ExprKind::Assignment { target, .. },
                ..
            }) => {
                if let ExprKind::Member {
                    object,
                    property,
                    computed: false,
                    ..
                } = &target.kind
                {
                    if object.as_identifier() == Some("this") {
                        analysis.field_assigns.push((index, property.clone()));
                    }
                }
            }
            StmtKind::Expr(Expr {
                kind: ExprKind::Call { callee, .. },
                ..
            }) => {
                if matches!(callee.kind, ExprKind::Super) {
                    analysis.super_call = Some(index);
                }
            }
            _ => {}
        }
    }
    Some(analysis)
}

fn is_string_literal(expr: &trango_ast::AstExpr) -> bool {
    matches!(
        expr.kind,
        trango_ast::AstExprKind::Lit(AstLit::String(_))
    )
}

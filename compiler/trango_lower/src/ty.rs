//! Surface type → IR type lowering.

use trango_ast::{AstLit, AstParam, AstType, AstTypeMember, AstTypeParam};
use trango_ir::{
    FunctionType, IRType, IndexSignature, LiteralValue, Parameter, PrimitiveKind,
    PropertySignature, SourceLocation, TypeParameter,
};

use crate::Lowerer;

impl Lowerer<'_> {
    /// Lower a surface type annotation.
    pub(crate) fn lower_type(&mut self, ty: &AstType, loc: &SourceLocation) -> IRType {
        match ty {
            AstType::Keyword(keyword) => lower_keyword(keyword),

            AstType::Literal(lit) => match lit {
                AstLit::String(s) => IRType::Literal(LiteralValue::String(s.clone())),
                AstLit::Number(n) => IRType::Literal(LiteralValue::Number(*n)),
                AstLit::Boolean(b) => IRType::Literal(LiteralValue::Boolean(*b)),
                // `null`/`undefined` literal types keep their nullish
                // reference form so unions can strip them.
                AstLit::Null => IRType::reference("null"),
                AstLit::Undefined => IRType::reference("undefined"),
            },

            AstType::Ref { name, args } => IRType::Reference {
                name: name.clone(),
                type_args: args.iter().map(|arg| self.lower_type(arg, loc)).collect(),
            },

            AstType::Array(elem) => IRType::Array(Box::new(self.lower_type(elem, loc))),

            AstType::Tuple(elems) => IRType::Tuple(
                elems
                    .iter()
                    .map(|elem| self.lower_type(elem, loc))
                    .collect(),
            ),

            AstType::Object(members) => self.lower_object_type(members, loc),

            AstType::Function {
                params,
                ret,
                type_params,
            } => IRType::Function(Box::new(FunctionType {
                params: self.lower_params(params),
                ret: self.lower_type(ret, loc),
                type_params: self.lower_type_params(type_params, loc),
                is_async: false,
            })),

            AstType::Union(arms) => {
                IRType::Union(arms.iter().map(|arm| self.lower_type(arm, loc)).collect())
            }

            AstType::Intersection(parts) => IRType::Intersection(
                parts
                    .iter()
                    .map(|part| self.lower_type(part, loc))
                    .collect(),
            ),

            AstType::Paren(inner) => self.lower_type(inner, loc),
        }
    }

    /// Lower an optional annotation.
    pub(crate) fn lower_opt_type(
        &mut self,
        ty: Option<&AstType>,
        loc: &SourceLocation,
    ) -> Option<IRType> {
        ty.map(|ty| self.lower_type(ty, loc))
    }

    /// Lower an inline object type. Method members become properties of
    /// function type; a lone index signature stays on the object shape.
    fn lower_object_type(&mut self, members: &[AstTypeMember], _loc: &SourceLocation) -> IRType {
        let mut props = Vec::new();
        let mut index = None;

        for member in members {
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
                } => {
                    index = Some(Box::new(IndexSignature {
                        key: self.lower_type(key, member_loc),
                        value: self.lower_type(value, member_loc),
                    }));
                }
            }
        }

        IRType::Object { props, index }
    }

    /// The function type a method signature lowers to.
    pub(crate) fn method_signature_type(
        &mut self,
        params: &[AstParam],
        ret: Option<&AstType>,
        loc: &SourceLocation,
    ) -> IRType {
        IRType::Function(Box::new(FunctionType {
            params: self.lower_params(params),
            ret: ret.map_or(IRType::primitive(PrimitiveKind::Void), |ty| {
                self.lower_type(ty, loc)
            }),
            type_params: Vec::new(),
            is_async: false,
        }))
    }

    /// Lower a parameter list.
    pub(crate) fn lower_params(&mut self, params: &[AstParam]) -> Vec<Parameter> {
        params
            .iter()
            .map(|param| {
                if param.optional {
                    self.warn_lossy_optional(&param.loc);
                }
                Parameter {
                    name: param.name.clone(),
                    ty: self.lower_opt_type(param.ty.as_ref(), &param.loc),
                    optional: param.optional,
                    default: param.default.as_ref().map(|init| self.lower_expr(init)),
                    rest: param.rest,
                }
            })
            .collect()
    }

    /// Under the zero-value nullability strategy an absent optional is
    /// indistinguishable from its zero value.
    fn warn_lossy_optional(&mut self, loc: &SourceLocation) {
        use trango_config::NullabilityStrategy;
        use trango_diagnostic::{Diagnostic, ErrorCode};
        if self.config.nullability_strategy == NullabilityStrategy::Zero {
            self.diagnostics.push(Diagnostic::new(
                ErrorCode::W4003,
                "optional value maps to a zero value; absence is lost",
                loc.clone(),
            ));
        }
    }

    /// Lower generic type parameters.
    pub(crate) fn lower_type_params(
        &mut self,
        type_params: &[AstTypeParam],
        loc: &SourceLocation,
    ) -> Vec<TypeParameter> {
        type_params
            .iter()
            .map(|tp| TypeParameter {
                name: tp.name.clone(),
                constraint: self.lower_opt_type(tp.constraint.as_ref(), loc),
                default: self.lower_opt_type(tp.default.as_ref(), loc),
            })
            .collect()
    }
}

/// Keyword types map straight onto primitives; `undefined`/`null` keep
/// their reference form so unions can recognize nullish arms.
fn lower_keyword(keyword: &str) -> IRType {
    match keyword {
        "number" => IRType::primitive(PrimitiveKind::Number),
        "string" => IRType::primitive(PrimitiveKind::String),
        "boolean" => IRType::primitive(PrimitiveKind::Boolean),
        "void" => IRType::primitive(PrimitiveKind::Void),
        "any" => IRType::primitive(PrimitiveKind::Any),
        "unknown" | "object" => IRType::primitive(PrimitiveKind::Unknown),
        "never" => IRType::primitive(PrimitiveKind::Never),
        other => IRType::reference(other),
    }
}

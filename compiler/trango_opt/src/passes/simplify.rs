//! Type simplification (level 2).
//!
//! Normalizes type shapes without changing meaning: nested unions
//! flatten, duplicate arms collapse, and a one-arm union becomes the
//! arm. Runs over every type position the module carries.

use trango_ir::{
    ClassMember, Declaration, FunctionType, IRType, Module, Parameter, PropertySignature,
};

use crate::Pass;

/// The level-2 union/intersection normalizer.
pub struct TypeSimplify;

impl Pass for TypeSimplify {
    fn name(&self) -> &'static str {
        "type-simplification"
    }

    fn run(&self, module: &Module) -> Module {
        let body = module
            .body
            .iter()
            .map(|stmt| {
                let mut stmt = stmt.clone();
                if let trango_ir::StmtKind::Decl(decl) = &mut stmt.kind {
                    *decl = simplify_decl(decl);
                }
                stmt
            })
            .collect();
        module.with_body(body)
    }
}

fn simplify_decl(decl: &Declaration) -> Declaration {
    match decl {
        Declaration::Variable(var) => {
            let mut var = var.clone();
            var.ty = var.ty.as_ref().map(simplify);
            Declaration::Variable(var)
        }
        Declaration::Function(func) => {
            let mut func = func.clone();
            func.params = simplify_params(&func.params);
            func.ret = func.ret.as_ref().map(simplify);
            Declaration::Function(func)
        }
        Declaration::Class(class) => {
            let mut class = class.clone();
            class.members = class
                .members
                .iter()
                .map(|member| match member {
                    ClassMember::Property(prop) => {
                        let mut prop = prop.clone();
                        prop.ty = prop.ty.as_ref().map(simplify);
                        ClassMember::Property(prop)
                    }
                    ClassMember::Method(method) => {
                        let mut method = method.clone();
                        method.params = simplify_params(&method.params);
                        method.ret = method.ret.as_ref().map(simplify);
                        ClassMember::Method(method)
                    }
                })
                .collect();
            Declaration::Class(class)
        }
        Declaration::Interface(interface) => {
            let mut interface = interface.clone();
            interface.props = simplify_props(&interface.props);
            Declaration::Interface(interface)
        }
        Declaration::TypeAlias(alias) => {
            let mut alias = alias.clone();
            alias.ty = simplify(&alias.ty);
            Declaration::TypeAlias(alias)
        }
        Declaration::Enum(_) => decl.clone(),
    }
}

fn simplify_params(params: &[Parameter]) -> Vec<Parameter> {
    params
        .iter()
        .map(|param| {
            let mut param = param.clone();
            param.ty = param.ty.as_ref().map(simplify);
            param
        })
        .collect()
}

fn simplify_props(props: &[PropertySignature]) -> Vec<PropertySignature> {
    props
        .iter()
        .map(|prop| {
            let mut prop = prop.clone();
            prop.ty = simplify(&prop.ty);
            prop
        })
        .collect()
}

/// Simplify one type, recursively.
pub(crate) fn simplify(ty: &IRType) -> IRType {
    match ty {
        IRType::Union(arms) => {
            // Flatten nested unions, then drop duplicate arms.
            let mut flat: Vec<IRType> = Vec::with_capacity(arms.len());
            for arm in arms {
                match simplify(arm) {
                    IRType::Union(inner) => flat.extend(inner),
                    other => flat.push(other),
                }
            }
            let mut unique: Vec<IRType> = Vec::with_capacity(flat.len());
            for arm in flat {
                if !unique.contains(&arm) {
                    unique.push(arm);
                }
            }
            if unique.len() == 1 {
                unique.swap_remove(0)
            } else {
                IRType::Union(unique)
            }
        }

        IRType::Intersection(parts) => {
            let parts: Vec<IRType> = parts.iter().map(simplify).collect();
            if parts.len() == 1 {
                parts.into_iter().next().unwrap_or(IRType::Intersection(vec![]))
            } else {
                IRType::Intersection(parts)
            }
        }

        IRType::Array(elem) => IRType::Array(Box::new(simplify(elem))),

        IRType::Tuple(elems) => IRType::Tuple(elems.iter().map(simplify).collect()),

        IRType::Object { props, index } => IRType::Object {
            props: simplify_props(props),
            index: index.clone(),
        },

        IRType::Function(func) => IRType::Function(Box::new(FunctionType {
            params: simplify_params(&func.params),
            ret: simplify(&func.ret),
            type_params: func.type_params.clone(),
            is_async: func.is_async,
        })),

        IRType::Reference { name, type_args } => IRType::Reference {
            name: name.clone(),
            type_args: type_args.iter().map(simplify).collect(),
        },

        IRType::Primitive(_) | IRType::Literal(_) => ty.clone(),
    }
}

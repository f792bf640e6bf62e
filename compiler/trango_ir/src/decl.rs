//! IR declarations.
//!
//! Each declaration carries its name, modifier set, and location.
//! Classes additionally carry the constructor analysis the lowering
//! performed (which constructor statements assign `this.x` and which
//! call `super(...)`), so the emitter can synthesize a factory without
//! re-walking the body.

use crate::expr::Expr;
use crate::location::{Located, SourceLocation};
use crate::modifier::Modifiers;
use crate::stmt::Stmt;
use crate::types::{IRType, Parameter, PropertySignature, TypeParameter};

/// A reference to a named type in an `extends`/`implements` clause.
#[derive(Clone, PartialEq, Debug)]
pub struct TypeRef {
    pub name: String,
    pub type_args: Vec<IRType>,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef {
            name: name.into(),
            type_args: Vec::new(),
        }
    }
}

/// The declaration sum.
#[derive(Clone, PartialEq, Debug)]
pub enum Declaration {
    Variable(VariableDecl),
    Function(FunctionDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    TypeAlias(TypeAliasDecl),
    Enum(EnumDecl),
}

impl Declaration {
    /// The declared name.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Variable(decl) => &decl.name,
            Declaration::Function(decl) => &decl.name,
            Declaration::Class(decl) => &decl.name,
            Declaration::Interface(decl) => &decl.name,
            Declaration::TypeAlias(decl) => &decl.name,
            Declaration::Enum(decl) => &decl.name,
        }
    }

    /// The declaration's modifier set.
    pub fn modifiers(&self) -> Modifiers {
        match self {
            Declaration::Variable(decl) => decl.modifiers,
            Declaration::Function(decl) => decl.modifiers,
            Declaration::Class(decl) => decl.modifiers,
            Declaration::Interface(decl) => decl.modifiers,
            Declaration::TypeAlias(decl) => decl.modifiers,
            Declaration::Enum(decl) => decl.modifiers,
        }
    }

    /// The declaration's source location.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Declaration::Variable(decl) => &decl.loc,
            Declaration::Function(decl) => &decl.loc,
            Declaration::Class(decl) => &decl.loc,
            Declaration::Interface(decl) => &decl.loc,
            Declaration::TypeAlias(decl) => &decl.loc,
            Declaration::Enum(decl) => &decl.loc,
        }
    }
}

impl Located for Declaration {
    fn loc(&self) -> &SourceLocation {
        self.location()
    }
}

/// A single variable declaration.
///
/// Source statements with several declarators are split into N of these
/// during lowering.
#[derive(Clone, PartialEq, Debug)]
pub struct VariableDecl {
    pub name: String,
    /// Declared type, if explicit. Absent means the emitter infers from
    /// the initializer.
    pub ty: Option<IRType>,
    pub init: Option<Expr>,
    pub is_const: bool,
    pub modifiers: Modifiers,
    pub loc: SourceLocation,
}

/// A function declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub ret: Option<IRType>,
    /// Absent for overload signatures and ambient declarations.
    pub body: Option<Vec<Stmt>>,
    pub type_params: Vec<TypeParameter>,
    pub modifiers: Modifiers,
    pub loc: SourceLocation,
}

impl FunctionDecl {
    /// Whether the function was declared `async`.
    #[inline]
    pub fn is_async(&self) -> bool {
        self.modifiers.contains(Modifiers::ASYNC)
    }
}

/// A class declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct ClassDecl {
    pub name: String,
    pub type_params: Vec<TypeParameter>,
    pub extends: Option<TypeRef>,
    /// Captured for completeness; the target layout ignores it.
    pub implements: Vec<TypeRef>,
    pub members: Vec<ClassMember>,
    /// Constructor body analysis recorded by the lowering.
    pub ctor: Option<CtorAnalysis>,
    pub modifiers: Modifiers,
    pub loc: SourceLocation,
}

impl ClassDecl {
    /// The constructor method, if the class declares one.
    pub fn constructor(&self) -> Option<&MethodMember> {
        self.members.iter().find_map(|member| match member {
            ClassMember::Method(method) if method.is_constructor() => Some(method),
            _ => None,
        })
    }

    /// Instance properties, in declaration order.
    pub fn instance_properties(&self) -> impl Iterator<Item = &PropertyMember> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Property(prop) if prop.modifiers.is_instance() => Some(prop),
            _ => None,
        })
    }

    /// Static properties, in declaration order.
    pub fn static_properties(&self) -> impl Iterator<Item = &PropertyMember> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Property(prop) if !prop.modifiers.is_instance() => Some(prop),
            _ => None,
        })
    }
}

/// A class member.
#[derive(Clone, PartialEq, Debug)]
pub enum ClassMember {
    Property(PropertyMember),
    Method(MethodMember),
}

/// An instance or static property.
#[derive(Clone, PartialEq, Debug)]
pub struct PropertyMember {
    pub name: String,
    pub ty: Option<IRType>,
    pub init: Option<Expr>,
    pub modifiers: Modifiers,
    /// Promoted from a constructor parameter bearing a visibility or
    /// `readonly` modifier.
    pub is_ctor_param: bool,
    pub loc: SourceLocation,
}

/// A method. Constructors are methods named `constructor`; accessors
/// arrive renamed `get_X`/`set_X` from the lowering.
#[derive(Clone, PartialEq, Debug)]
pub struct MethodMember {
    pub name: String,
    pub params: Vec<Parameter>,
    pub ret: Option<IRType>,
    pub body: Option<Vec<Stmt>>,
    pub type_params: Vec<TypeParameter>,
    pub modifiers: Modifiers,
    pub loc: SourceLocation,
}

impl MethodMember {
    /// Whether this method is the constructor.
    #[inline]
    pub fn is_constructor(&self) -> bool {
        self.name == "constructor"
    }
}

/// Constructor body analysis: which statements assign instance fields
/// and which call `super(...)`. Indices point into the constructor
/// method's body statement list.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CtorAnalysis {
    /// `(statement index, field name)` for each `this.x = expr`
    /// statement directly in the constructor body.
    pub field_assigns: Vec<(usize, String)>,
    /// Statement index of the `super(...)` call, if present.
    pub super_call: Option<usize>,
}

/// An interface declaration.
///
/// Method signatures arrive lowered to properties of `Function` type.
/// A lone index signature arrives as a property named `[index]` whose
/// type is a single-parameter `Function` from key to value.
#[derive(Clone, PartialEq, Debug)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_params: Vec<TypeParameter>,
    pub extends: Vec<TypeRef>,
    pub props: Vec<PropertySignature>,
    pub modifiers: Modifiers,
    pub loc: SourceLocation,
}

/// Name of the synthetic property an index signature lowers to.
pub const INDEX_PROP: &str = "[index]";

/// A type alias declaration. The body type is preserved verbatim; the
/// emitter decides the target representation.
#[derive(Clone, PartialEq, Debug)]
pub struct TypeAliasDecl {
    pub name: String,
    pub type_params: Vec<TypeParameter>,
    pub ty: IRType,
    pub modifiers: Modifiers,
    pub loc: SourceLocation,
}

/// An enum declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<EnumMember>,
    /// Present when any member has a string initializer; drives
    /// string-based emission.
    pub heterogeneous: bool,
    pub modifiers: Modifiers,
    pub loc: SourceLocation,
}

/// One enum member. Initializers are kept as expressions so the
/// constant-folding pass can evaluate them.
#[derive(Clone, PartialEq, Debug)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<Expr>,
    pub loc: SourceLocation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;

    fn method(name: &str) -> MethodMember {
        MethodMember {
            name: name.to_string(),
            params: vec![],
            ret: None,
            body: Some(vec![]),
            type_params: vec![],
            modifiers: Modifiers::empty(),
            loc: SourceLocation::synthetic(),
        }
    }

    fn property(name: &str, modifiers: Modifiers) -> PropertyMember {
        PropertyMember {
            name: name.to_string(),
            ty: Some(IRType::primitive(PrimitiveKind::Number)),
            init: None,
            modifiers,
            is_ctor_param: false,
            loc: SourceLocation::synthetic(),
        }
    }

    #[test]
    fn constructor_lookup() {
        let class = ClassDecl {
            name: "C".to_string(),
            type_params: vec![],
            extends: None,
            implements: vec![],
            members: vec![
                ClassMember::Method(method("render")),
                ClassMember::Method(method("constructor")),
            ],
            ctor: None,
            modifiers: Modifiers::empty(),
            loc: SourceLocation::synthetic(),
        };
        let found = class.constructor().map(|m| m.name.as_str());
        assert_eq!(found, Some("constructor"));
    }

    #[test]
    fn property_partition() {
        let class = ClassDecl {
            name: "C".to_string(),
            type_params: vec![],
            extends: None,
            implements: vec![],
            members: vec![
                ClassMember::Property(property("a", Modifiers::empty())),
                ClassMember::Property(property("b", Modifiers::STATIC)),
            ],
            ctor: None,
            modifiers: Modifiers::empty(),
            loc: SourceLocation::synthetic(),
        };
        let instance: Vec<_> = class.instance_properties().map(|p| p.name.as_str()).collect();
        let statics: Vec<_> = class.static_properties().map(|p| p.name.as_str()).collect();
        assert_eq!(instance, vec!["a"]);
        assert_eq!(statics, vec!["b"]);
    }
}

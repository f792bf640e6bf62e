//! Surface types as the frontend reports them.

use trango_ir::SourceLocation;

use crate::expr::AstLit;
use crate::item::{AstParam, AstTypeParam};

/// A surface type annotation.
#[derive(Clone, PartialEq, Debug)]
pub enum AstType {
    /// `number`, `string`, `boolean`, `void`, `any`, `unknown`, `never`,
    /// `undefined`, `null`, `object`.
    Keyword(String),

    /// A literal type: `"a"`, `42`, `true`.
    Literal(AstLit),

    /// A named reference with optional type arguments: `Foo<Bar>`.
    Ref { name: String, args: Vec<AstType> },

    /// `T[]`.
    Array(Box<AstType>),

    /// `[T1, ..., Tn]`.
    Tuple(Vec<AstType>),

    /// `{ members... }`: properties, method signatures, index
    /// signatures, still in surface form.
    Object(Vec<AstTypeMember>),

    /// `(params) => ret`.
    Function {
        params: Vec<AstParam>,
        ret: Box<AstType>,
        type_params: Vec<AstTypeParam>,
    },

    /// `A | B`.
    Union(Vec<AstType>),

    /// `A & B`.
    Intersection(Vec<AstType>),

    /// `(T)`; the frontend may or may not strip these.
    Paren(Box<AstType>),
}

impl AstType {
    /// Shorthand for a keyword type.
    pub fn keyword(name: &str) -> AstType {
        AstType::Keyword(name.to_string())
    }

    /// Shorthand for a bare reference.
    pub fn reference(name: &str) -> AstType {
        AstType::Ref {
            name: name.to_string(),
            args: Vec::new(),
        }
    }
}

/// A member of a surface object type or interface body.
#[derive(Clone, PartialEq, Debug)]
pub enum AstTypeMember {
    /// `name?: T` / `readonly name: T`.
    Property {
        name: String,
        ty: AstType,
        optional: bool,
        readonly: bool,
        loc: SourceLocation,
    },

    /// `name(params): ret`, a method signature; lowering converts it
    /// to a property of function type.
    Method {
        name: String,
        params: Vec<AstParam>,
        ret: Option<AstType>,
        optional: bool,
        loc: SourceLocation,
    },

    /// `[key: K]: V`.
    Index {
        key: AstType,
        value: AstType,
        loc: SourceLocation,
    },
}

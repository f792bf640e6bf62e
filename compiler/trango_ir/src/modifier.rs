//! Declaration modifiers.
//!
//! The frontend reports modifiers as a set of strings; lowering converts
//! them into a compact [`Modifiers`] bitset. Order is irrelevant and
//! duplicates collapse, which is exactly the set semantics the source
//! language gives them.

use bitflags::bitflags;
use smallvec::SmallVec;

bitflags! {
    /// Modifier set attached to a declaration or class member.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
    pub struct Modifiers: u16 {
        const EXPORT = 1 << 0;
        const DEFAULT = 1 << 1;
        const PUBLIC = 1 << 2;
        const PRIVATE = 1 << 3;
        const PROTECTED = 1 << 4;
        const STATIC = 1 << 5;
        const READONLY = 1 << 6;
        const ASYNC = 1 << 7;
        const CONST = 1 << 8;
        const ABSTRACT = 1 << 9;
    }
}

impl Modifiers {
    /// Parse a single modifier keyword. Unknown keywords yield `None`.
    pub fn from_keyword(keyword: &str) -> Option<Modifiers> {
        match keyword {
            "export" => Some(Modifiers::EXPORT),
            "default" => Some(Modifiers::DEFAULT),
            "public" => Some(Modifiers::PUBLIC),
            "private" => Some(Modifiers::PRIVATE),
            "protected" => Some(Modifiers::PROTECTED),
            "static" => Some(Modifiers::STATIC),
            "readonly" => Some(Modifiers::READONLY),
            "async" => Some(Modifiers::ASYNC),
            "const" => Some(Modifiers::CONST),
            "abstract" => Some(Modifiers::ABSTRACT),
            _ => None,
        }
    }

    /// The source keywords present in this set, in declaration-site order.
    pub fn keywords(self) -> SmallVec<[&'static str; 4]> {
        let mut out = SmallVec::new();
        for (flag, keyword) in [
            (Modifiers::EXPORT, "export"),
            (Modifiers::DEFAULT, "default"),
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::STATIC, "static"),
            (Modifiers::READONLY, "readonly"),
            (Modifiers::ASYNC, "async"),
            (Modifiers::CONST, "const"),
            (Modifiers::ABSTRACT, "abstract"),
        ] {
            if self.contains(flag) {
                out.push(keyword);
            }
        }
        out
    }

    /// Whether the declaration is visible outside its module.
    #[inline]
    pub fn is_exported(self) -> bool {
        self.contains(Modifiers::EXPORT)
    }

    /// Whether the member participates in the class instance layout
    /// (i.e., is not hoisted to module level).
    #[inline]
    pub fn is_instance(self) -> bool {
        !self.contains(Modifiers::STATIC)
    }

    /// Whether the member is visible from outside the class.
    ///
    /// Source semantics: members default to public unless `private` or
    /// `protected` is present.
    #[inline]
    pub fn is_public(self) -> bool {
        !self.intersects(Modifiers::PRIVATE | Modifiers::PROTECTED)
    }

    /// Whether this is a constructor-parameter-property modifier set:
    /// any of `public`/`private`/`protected`/`readonly` on a parameter
    /// promotes it to an instance field.
    #[inline]
    pub fn declares_parameter_property(self) -> bool {
        self.intersects(
            Modifiers::PUBLIC | Modifiers::PRIVATE | Modifiers::PROTECTED | Modifiers::READONLY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_round_trip() {
        for keyword in [
            "export",
            "default",
            "public",
            "private",
            "protected",
            "static",
            "readonly",
            "async",
            "const",
            "abstract",
        ] {
            let flag = Modifiers::from_keyword(keyword).unwrap_or_default();
            assert_eq!(flag.keywords().as_slice(), &[keyword]);
        }
        assert!(Modifiers::from_keyword("declare").is_none());
    }

    #[test]
    fn visibility_defaults_to_public() {
        assert!(Modifiers::empty().is_public());
        assert!(Modifiers::STATIC.is_public());
        assert!(!Modifiers::PRIVATE.is_public());
        assert!(!(Modifiers::PROTECTED | Modifiers::READONLY).is_public());
    }

    #[test]
    fn parameter_property_detection() {
        assert!(Modifiers::READONLY.declares_parameter_property());
        assert!(Modifiers::PRIVATE.declares_parameter_property());
        assert!(!Modifiers::ASYNC.declares_parameter_property());
        assert!(!Modifiers::empty().declares_parameter_property());
    }
}

//! Source locations.
//!
//! Every IR node carries a [`SourceLocation`] pointing back at the construct
//! it was lowered from. Nodes composed during lowering with no source
//! counterpart carry a synthetic location instead (see
//! [`SourceLocation::synthetic`]), which renders as `<generated>`.

use std::fmt;
use std::sync::Arc;

/// A position inside a source file.
///
/// Lines and columns are 1-based, matching what the upstream frontend
/// reports; `offset` is a 0-based byte offset from the start of the file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Pos {
    /// Create a new position.
    #[inline]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        Pos {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

/// A half-open source range `[start, end)` inside one file.
///
/// The file path is shared (`Arc<str>`) because every node in a module
/// points at the same file; cloning a location never copies the path.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct SourceLocation {
    pub file: Arc<str>,
    pub start: Pos,
    pub end: Pos,
}

impl SourceLocation {
    /// Create a location covering `start..end` in `file`.
    pub fn new(file: Arc<str>, start: Pos, end: Pos) -> Self {
        SourceLocation { file, start, end }
    }

    /// Location for nodes synthesized during lowering or emission.
    pub fn synthetic() -> Self {
        SourceLocation {
            file: Arc::from("<generated>"),
            start: Pos::default(),
            end: Pos::default(),
        }
    }

    /// Whether this location was synthesized (no source counterpart).
    pub fn is_synthetic(&self) -> bool {
        &*self.file == "<generated>"
    }

    /// Merge two locations into one covering both.
    ///
    /// The file is taken from `self`; merging locations from different
    /// files is a caller bug and keeps `self`'s file.
    #[must_use]
    pub fn merge(&self, other: &SourceLocation) -> SourceLocation {
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        SourceLocation {
            file: Arc::clone(&self.file),
            start,
            end,
        }
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.start.line, self.start.column)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.start.line, self.start.column)
    }
}

/// Trait for IR nodes that carry a source location.
pub trait Located {
    /// The node's source location.
    fn loc(&self) -> &SourceLocation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_takes_outermost_positions() {
        let file: Arc<str> = Arc::from("a.ts");
        let a = SourceLocation::new(Arc::clone(&file), Pos::new(1, 1, 0), Pos::new(1, 5, 4));
        let b = SourceLocation::new(file, Pos::new(2, 1, 10), Pos::new(2, 3, 12));
        let merged = a.merge(&b);
        assert_eq!(merged.start.offset, 0);
        assert_eq!(merged.end.offset, 12);
    }

    #[test]
    fn synthetic_is_flagged() {
        assert!(SourceLocation::synthetic().is_synthetic());
        let real = SourceLocation::new(Arc::from("m.ts"), Pos::default(), Pos::default());
        assert!(!real.is_synthetic());
    }

    #[test]
    fn display_is_file_line_column() {
        let loc =
            SourceLocation::new(Arc::from("src/m.ts"), Pos::new(3, 7, 40), Pos::new(3, 9, 42));
        assert_eq!(loc.to_string(), "src/m.ts:3:7");
    }
}

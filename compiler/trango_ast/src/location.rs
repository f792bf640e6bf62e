//! Source-location builder.

use std::sync::Arc;

use trango_ir::{Pos, SourceLocation};

/// Builds [`SourceLocation`]s for one file.
///
/// The frontend hands the core one of these per source file so every
/// location it constructs shares the same path allocation.
#[derive(Clone)]
pub struct LocationBuilder {
    file: Arc<str>,
}

impl LocationBuilder {
    /// Create a builder for the given file path.
    pub fn new(file: impl AsRef<str>) -> Self {
        LocationBuilder {
            file: Arc::from(file.as_ref()),
        }
    }

    /// The file this builder points at.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Build a location from two `(line, column, offset)` triples.
    pub fn range(
        &self,
        start: (u32, u32, u32),
        end: (u32, u32, u32),
    ) -> SourceLocation {
        SourceLocation::new(
            Arc::clone(&self.file),
            Pos::new(start.0, start.1, start.2),
            Pos::new(end.0, end.1, end.2),
        )
    }

    /// Build a single-line location from a line, column, and length.
    pub fn span(&self, line: u32, column: u32, offset: u32, len: u32) -> SourceLocation {
        self.range(
            (line, column, offset),
            (line, column + len, offset + len),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_share_the_file_allocation() {
        let builder = LocationBuilder::new("src/app.ts");
        let a = builder.span(1, 1, 0, 5);
        let b = builder.span(2, 1, 10, 3);
        assert!(Arc::ptr_eq(&a.file, &b.file));
        assert_eq!(a.to_string(), "src/app.ts:1:1");
        assert_eq!(b.end.offset, 13);
    }
}

//! Byte spans of style sheets embedded in host documents.

use std::ops::Range;

/// Half-open byte range `[start, end)` covering a style-sheet payload.
///
/// The range excludes the delimiting syntax (backticks, braces, tags) so
/// that the bytes it covers are exactly the CSS text as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleRegion {
    pub start: usize,
    pub end: usize,
}

impl StyleRegion {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "region start {start} past end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` lies strictly between the region bounds.
    ///
    /// Cursor queries use this test: a cursor sitting on the opening or
    /// closing delimiter is not inside the style sheet.
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for StyleRegion {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

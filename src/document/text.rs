//! Text utilities for position conversion.
//!
//! LSP positions count columns in UTF-16 code units while the extraction
//! pipeline works in UTF-8 byte offsets. `LineIndex` converts between the two.

use std::ops::Range;
use std::sync::Arc;

use tower_lsp::lsp_types::Position;

/// Pre-computed line start table over a shared document text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
    text: Arc<str>,
}

impl LineIndex {
    pub fn new(text: Arc<str>) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                text.bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        Self { line_starts, text }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte range of a line, excluding its terminating newline.
    fn line_range(&self, line: usize) -> Range<usize> {
        let start = self.line_starts[line];
        let end = self
            .line_starts
            .get(line + 1)
            .map(|&next| next - 1)
            .unwrap_or(self.text.len());
        start..end
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Convert a byte offset to an LSP position.
    ///
    /// Offsets past the end of the text clamp to the end.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.line_of(offset);
        let range = self.line_range(line);

        let character = self.text[range.start..]
            .char_indices()
            .take_while(|&(i, _)| range.start + i < offset)
            .map(|(_, c)| c.len_utf16() as u32)
            .sum();

        Position::new(line as u32, character)
    }

    /// Convert an LSP position to a byte offset.
    ///
    /// Returns `None` if the line is out of bounds. Columns past the end of a
    /// line clamp to the line end.
    pub fn position_to_offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        if line >= self.line_starts.len() {
            return None;
        }

        let range = self.line_range(line);
        let mut column = 0u32;
        for (i, c) in self.text[range.clone()].char_indices() {
            if column >= position.character {
                return Some(range.start + i);
            }
            column += c.len_utf16() as u32;
        }
        Some(range.end)
    }

    /// Convert a byte span to an LSP range.
    pub fn span_to_range(&self, span: &Range<usize>) -> tower_lsp::lsp_types::Range {
        tower_lsp::lsp_types::Range::new(
            self.offset_to_position(span.start),
            self.offset_to_position(span.end),
        )
    }
}

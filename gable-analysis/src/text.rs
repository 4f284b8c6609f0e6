//! Line-oriented view over an immutable document snapshot.

use std::sync::Arc;

use lsp_types::{Position, Range};

/// An immutable text snapshot with precomputed line start offsets.
///
/// Positions follow the protocol convention: zero-based line, character
/// measured in UTF-16 code units from the line start. Offsets are byte
/// offsets into the snapshot. All conversions clamp out-of-range input
/// instead of panicking, so a position past the end of a line or of the
/// document maps to the nearest valid location.
#[derive(Debug, Clone)]
pub struct LineIndex {
    text: Arc<str>,
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (idx, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Byte offset of the first character of `line`, clamped to the last line.
    pub fn line_start(&self, line: u32) -> usize {
        let line = (line as usize).min(self.line_starts.len() - 1);
        self.line_starts[line]
    }

    /// Content of `line` without the trailing line break.
    pub fn line_text(&self, line: u32) -> &str {
        let line = (line as usize).min(self.line_starts.len() - 1);
        let start = self.line_starts[line];
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        self.text[start..end].strip_suffix('\r').unwrap_or(&self.text[start..end])
    }

    /// Byte offset for a protocol position. Lines past the end clamp to the
    /// last line; characters past the line end clamp to the line end.
    pub fn offset_at(&self, position: Position) -> usize {
        let line = (position.line as usize).min(self.line_starts.len() - 1);
        let start = self.line_starts[line];
        let line_text = self.line_text(line as u32);

        let mut units = 0u32;
        for (idx, ch) in line_text.char_indices() {
            if units >= position.character {
                return start + idx;
            }
            units += ch.len_utf16() as u32;
        }
        start + line_text.len()
    }

    /// Protocol position for a byte offset. Offsets inside a multi-byte
    /// character or past the end are floored to the nearest boundary.
    pub fn position_at(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.text.len());
        while offset > 0 && !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let character: usize = self.text[self.line_starts[line]..offset]
            .chars()
            .map(char::len_utf16)
            .sum();
        Position::new(line as u32, character as u32)
    }

    pub fn end_position(&self) -> Position {
        self.position_at(self.text.len())
    }

    /// Range covering the whole document.
    pub fn full_range(&self) -> Range {
        Range::new(Position::new(0, 0), self.end_position())
    }

    /// Range covering the whole content of `line`.
    pub fn line_range(&self, line: u32) -> Range {
        let start = self.line_start(line);
        let end = start + self.line_text(line).len();
        Range::new(self.position_at(start), self.position_at(end))
    }
}

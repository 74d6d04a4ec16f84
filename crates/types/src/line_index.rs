//! Line-start table for offset/position conversion.

use crate::Position;

/// Line-start table for one text buffer.
///
/// Built once by scanning the buffer for `\n`. Entry 0 is always 0 and
/// entries are strictly increasing, one per line. Offsets are byte offsets;
/// columns count bytes from the line start. Lookups are `O(log n)` binary
/// searches over the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Build the line-start table for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(i + 1);
            }
        }
        Self {
            starts,
            len: text.len(),
        }
    }

    /// Number of lines in the indexed buffer.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Byte length of the indexed buffer.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the indexed buffer was empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset at which 1-based `line` starts, if the line exists.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<usize> {
        if line == 0 {
            return None;
        }
        self.starts.get(line as usize - 1).copied()
    }

    /// Convert a byte offset to a 1-based position.
    ///
    /// Returns `None` past the end of the buffer. The end-of-buffer offset
    /// itself is valid and maps to one past the last character of the final
    /// line.
    #[must_use]
    pub fn offset_to_position(&self, offset: usize) -> Option<Position> {
        if offset > self.len {
            return None;
        }
        Some(self.position_at(offset))
    }

    /// Convert a byte offset to a 1-based position, treating offsets past
    /// the end of the buffer as the end-of-buffer position.
    #[must_use]
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        let column = offset - self.starts[line] + 1;
        Position::new(line as u32 + 1, column as u32)
    }

    /// Convert a 1-based position to a byte offset.
    ///
    /// Returns `None` if the line is not in the table or the resulting
    /// offset lies past the end of the buffer. Columns are not required to
    /// stay within their line; analyzers report one-past-the-end columns
    /// for end-of-line diagnostics.
    #[must_use]
    pub fn position_to_offset(&self, position: Position) -> Option<usize> {
        if position.column == 0 {
            return None;
        }
        let start = self.line_start(position.line)?;
        let offset = start + position.column as usize - 1;
        (offset <= self.len).then_some(offset)
    }
}

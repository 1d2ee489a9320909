use std::ops::Range;

use serde::Serialize;

/// Byte range of a candidate inside the scanned buffer.
///
/// Offsets always refer to the caller's original text, even when a variant
/// scans a wrapped or sliced copy internally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the two ranges share at least one byte.
    pub fn overlaps(&self, other: &SourceRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Shift both ends by `offset` (used when scanning a sub-slice).
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for SourceRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Line start offsets of a text buffer, for O(log n) line/column lookups.
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut offsets = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based (line, column) of a byte offset. Column counts bytes.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.offsets.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        };
        (line + 1, offset - self.offsets[line] + 1)
    }
}

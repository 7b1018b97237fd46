//! Position and location tracking for source text
//!
//! This module defines the data structures for representing positions and ranges in a host
//! document, as well as utilities for converting byte offsets to line/column positions and back.
//!
//! ## Types
//!
//! - [`Position`] - A zero-based line:column position
//! - [`Range`] - A half-open range with start/end positions and byte span
//! - [`SourceLocation`] - Line-start index for offset <-> position conversion
//!
//! ## Key Design
//!
//! - **Byte ranges preserved**: Stores both byte spans and line:column positions, so stages can
//!   slice the source directly while adapters still get positions
//! - **Columns are bytes**: a column counts bytes from the start of its line. Adapters that need
//!   UTF-16 columns convert at the boundary
//! - **Efficient conversion**: O(log n) binary search for byte-to-position conversion

use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

/// Represents a position in source text (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// A half-open range of source text.
///
/// `start <= end` always holds; positions order by line, then column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub span: ByteRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(span: ByteRange<usize>, start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "range start {start} is after end {end}");
        Self { span, start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.span.start >= self.span.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(
            ByteRange { start: 0, end: 0 },
            Position::default(),
            Position::default(),
        )
    }
}

/// Provides fast conversion between byte offsets and line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Convert a byte offset to a line/column position. Offsets past the end clamp to it.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.len);
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line, column)
    }

    /// Convert a line/column position to a byte offset, clamping to the line's end.
    pub fn position_to_byte(&self, position: Position) -> usize {
        match self.line_starts.get(position.line) {
            Some(&start) => {
                let line_end = self.line_end(position.line).unwrap_or(self.len);
                (start + position.column).min(line_end)
            }
            None => self.len,
        }
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the byte offset for the start of a line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Byte offset where the line's content ends, excluding its line break
    pub fn line_end(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line)?;
        Some(match self.line_starts.get(line + 1) {
            Some(&next) => next - 1,
            None => self.len,
        })
    }
}

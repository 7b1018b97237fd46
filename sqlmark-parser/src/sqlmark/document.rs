//! Read-only, line-addressable text buffer
//!
//!     The pipeline never owns the host editor's document model. It reads through [`TextBuffer`],
//!     which is the whole input boundary: line count, line text, and offset <-> position mapping.
//!     [`SourceDocument`] is the in-process implementation used by the CLI, the language server
//!     and the tests.

use super::ast::{Position, Range, SourceLocation};

pub trait TextBuffer {
    fn line_count(&self) -> usize;

    /// Text of a line without its line break. Lines past the end read as empty.
    fn line(&self, index: usize) -> &str;

    fn offset_at(&self, position: Position) -> usize;

    fn position_at(&self, offset: usize) -> Position;

    /// Slice of the buffer covered by `range`'s byte span.
    fn text(&self, range: &Range) -> &str;

    fn range_for(&self, start: usize, end: usize) -> Range {
        Range::new(start..end, self.position_at(start), self.position_at(end))
    }

    fn range_between(&self, start: Position, end: Position) -> Range {
        Range::new(self.offset_at(start)..self.offset_at(end), start, end)
    }
}

/// Owned source text plus its line index.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    source: String,
    location: SourceLocation,
}

impl SourceDocument {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let location = SourceLocation::new(&source);
        Self { source, location }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl TextBuffer for SourceDocument {
    fn line_count(&self) -> usize {
        self.location.line_count()
    }

    fn line(&self, index: usize) -> &str {
        match (self.location.line_start(index), self.location.line_end(index)) {
            (Some(start), Some(end)) => {
                let line = &self.source[start..end];
                line.strip_suffix('\r').unwrap_or(line)
            }
            _ => "",
        }
    }

    fn offset_at(&self, position: Position) -> usize {
        self.location.position_to_byte(position)
    }

    fn position_at(&self, offset: usize) -> Position {
        self.location.byte_to_position(offset)
    }

    fn text(&self, range: &Range) -> &str {
        let end = range.span.end.min(self.source.len());
        let start = range.span.start.min(end);
        self.source.get(start..end).unwrap_or("")
    }
}

//! Regions, literal spans and SQL segments produced by the pipeline stages

use super::range::Range;
use crate::sqlmark::document::TextBuffer;
use serde::Serialize;
use std::fmt;

/// A `// sql begin` .. `// sql end` pair. Both fields are the marker lines themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkedRegion {
    pub begin_line: usize,
    pub end_line: usize,
}

impl MarkedRegion {
    pub fn new(begin_line: usize, end_line: usize) -> Self {
        Self {
            begin_line,
            end_line,
        }
    }

    /// Lines strictly between the two markers
    pub fn content_lines(&self) -> std::ops::Range<usize> {
        self.begin_line + 1..self.end_line
    }
}

/// Which verbatim literal form opened the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiteralKind {
    /// `@"..."`
    Verbatim,
    /// `$@"..."` or `@$"..."`
    Interpolated,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralKind::Verbatim => write!(f, "verbatim"),
            LiteralKind::Interpolated => write!(f, "interpolated"),
        }
    }
}

/// The content of a string literal, excluding its delimiting quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringLiteralSpan {
    pub range: Range,
    pub kind: LiteralKind,
}

impl StringLiteralSpan {
    pub fn new(range: Range, kind: LiteralKind) -> Self {
        Self { range, kind }
    }

    pub fn is_interpolated(&self) -> bool {
        self.kind == LiteralKind::Interpolated
    }

    /// Raw source text of the literal, escapes included.
    pub fn raw<'a, B: TextBuffer + ?Sized>(&self, buffer: &'a B) -> &'a str {
        buffer.text(&self.range)
    }

    /// The literal's value: the raw text with each `""` collapsed to `"`.
    pub fn value<B: TextBuffer + ?Sized>(&self, buffer: &B) -> String {
        self.raw(buffer).replace("\"\"", "\"")
    }
}

/// A run of literal SQL text. `literal` indexes the span it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlSegment {
    pub range: Range,
    pub literal: usize,
}

impl SqlSegment {
    pub fn new(range: Range, literal: usize) -> Self {
        Self { range, literal }
    }
}

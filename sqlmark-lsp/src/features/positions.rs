//! Conversion from byte columns to LSP positions.
//!
//! The pipeline measures columns in bytes. LSP clients count UTF-16 code units unless told
//! otherwise, so every position leaving the server goes through here.

use sqlmark_parser::sqlmark::ast::{Position as AstPosition, Range as AstRange};
use sqlmark_parser::sqlmark::document::TextBuffer;
use tower_lsp::lsp_types::{Position, Range};

/// UTF-16 width of `line[..byte_column]`, clamped to the line.
pub fn utf16_column(line: &str, byte_column: usize) -> u32 {
    let mut end = byte_column.min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].encode_utf16().count() as u32
}

pub fn to_lsp_position<B: TextBuffer + ?Sized>(buffer: &B, position: AstPosition) -> Position {
    Position::new(
        position.line as u32,
        utf16_column(buffer.line(position.line), position.column),
    )
}

pub fn to_lsp_range<B: TextBuffer + ?Sized>(buffer: &B, range: &AstRange) -> Range {
    Range {
        start: to_lsp_position(buffer, range.start),
        end: to_lsp_position(buffer, range.end),
    }
}

/// Break a range into `(line, start, length)` pieces, one per line, in UTF-16 units.
///
/// Semantic tokens may not span lines, and verbatim literals routinely do.
pub fn line_pieces<B: TextBuffer + ?Sized>(buffer: &B, range: &AstRange) -> Vec<(u32, u32, u32)> {
    let mut pieces = Vec::new();
    for line in range.start.line..=range.end.line {
        let text = buffer.line(line);
        let start = if line == range.start.line {
            range.start.column
        } else {
            0
        };
        let end = if line == range.end.line {
            range.end.column
        } else {
            text.len()
        };
        let start = utf16_column(text, start);
        let end = utf16_column(text, end);
        if end > start {
            pieces.push((line as u32, start, end - start));
        }
    }
    pieces
}

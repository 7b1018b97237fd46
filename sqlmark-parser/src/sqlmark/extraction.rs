//! String Extractor
//!
//! Finds C# verbatim string literals inside a marked region and computes the span of their
//! content.
//!
//! Onset
//!
//!     `@"`, `$@"` or `@$"`. The first onset on a line wins; a `$` in the prefix marks the
//!     literal as interpolated.
//!
//! Termination
//!
//!     Scanning starts right after the onset quote and may cross lines (the column resets to 0
//!     on each new line). Two consecutive quotes are one escaped quote and are skipped together.
//!     The first unescaped quote ends the literal; the span covers everything between the
//!     quotes.
//!
//! Once a literal is emitted, scanning resumes on the line after its closing quote, so a
//! literal's content is never scanned for onsets. A literal with no closing quote before the
//! region's end marker is dropped and the rest of the region is skipped: every later quote in
//! the region has already been consumed by the failed scan.

use super::ast::{LiteralKind, MarkedRegion, Position, StringLiteralSpan};
use super::document::TextBuffer;
use once_cell::sync::Lazy;
use regex::Regex;

static LITERAL_ONSET: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(@\$?|\$@)""#).unwrap());

/// A literal opening found on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralOnset {
    /// Byte column of the opening quote
    pub quote_column: usize,
    pub kind: LiteralKind,
}

/// Find the first literal onset on a line.
pub fn find_onset(line: &str) -> Option<LiteralOnset> {
    let found = LITERAL_ONSET.find(line)?;
    let kind = if found.as_str().contains('$') {
        LiteralKind::Interpolated
    } else {
        LiteralKind::Verbatim
    };
    Some(LiteralOnset {
        quote_column: found.end() - 1,
        kind,
    })
}

/// Scan forward from `start` for the closing quote, up to and including `last_line`.
///
/// Returns the position of the closing quote itself, which is the exclusive end of the
/// literal's content.
pub fn find_closing_quote<B: TextBuffer + ?Sized>(
    buffer: &B,
    start: Position,
    last_line: usize,
) -> Option<Position> {
    let mut column = start.column;
    for line_index in start.line..=last_line {
        let bytes = buffer.line(line_index).as_bytes();
        let mut i = column;
        while i < bytes.len() {
            if bytes[i] == b'"' {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 2;
                    continue;
                }
                return Some(Position::new(line_index, i));
            }
            i += 1;
        }
        column = 0;
    }
    None
}

/// Extract every literal span inside a region's content lines.
pub fn extract_literals<B: TextBuffer + ?Sized>(
    buffer: &B,
    region: &MarkedRegion,
) -> Vec<StringLiteralSpan> {
    let mut literals = Vec::new();
    let lines = region.content_lines();
    let Some(last_line) = lines.end.checked_sub(1) else {
        return literals;
    };

    let mut line_index = lines.start;
    while line_index < lines.end {
        let Some(onset) = find_onset(buffer.line(line_index)) else {
            line_index += 1;
            continue;
        };

        let start = Position::new(line_index, onset.quote_column + 1);
        match find_closing_quote(buffer, start, last_line) {
            Some(end) => {
                literals.push(StringLiteralSpan::new(
                    buffer.range_between(start, end),
                    onset.kind,
                ));
                line_index = end.line + 1;
            }
            None => {
                tracing::trace!(
                    line = line_index,
                    region_end = region.end_line,
                    "unterminated sql literal"
                );
                break;
            }
        }
    }

    literals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlmark::document::SourceDocument;
    use rstest::rstest;

    fn region_of(doc: &SourceDocument) -> MarkedRegion {
        MarkedRegion::new(0, doc.line_count() - 1)
    }

    fn values(source: &str) -> Vec<(String, LiteralKind)> {
        let doc = SourceDocument::new(source);
        extract_literals(&doc, &region_of(&doc))
            .iter()
            .map(|literal| (literal.value(&doc), literal.kind))
            .collect()
    }

    #[rstest]
    #[case(r#"var q = @"SELECT 1";"#, Some((9, LiteralKind::Verbatim)))]
    #[case(r#"var q = $@"SELECT {x}";"#, Some((10, LiteralKind::Interpolated)))]
    #[case(r#"var q = @$"SELECT {x}";"#, Some((10, LiteralKind::Interpolated)))]
    #[case(r#"var q = "SELECT 1";"#, None)]
    #[case(r#"var q = $"SELECT {x}";"#, None)]
    #[case(r#"var email = "a@b.c";"#, None)]
    fn detects_onsets(#[case] line: &str, #[case] expected: Option<(usize, LiteralKind)>) {
        let onset = find_onset(line).map(|onset| (onset.quote_column, onset.kind));
        assert_eq!(onset, expected);
    }

    #[test]
    fn extracts_multiline_literal() {
        let doc = SourceDocument::new(
            "// sql begin\nvar q = @\"SELECT id\n    FROM Users\n    WHERE id = 1\";\n// sql end",
        );
        let literals = extract_literals(&doc, &MarkedRegion::new(0, 4));

        assert_eq!(literals.len(), 1);
        let literal = &literals[0];
        assert_eq!(literal.range.start, Position::new(1, 10));
        assert_eq!(literal.range.end, Position::new(3, 16));
        assert_eq!(
            literal.raw(&doc),
            "SELECT id\n    FROM Users\n    WHERE id = 1"
        );
    }

    #[test]
    fn doubled_quotes_do_not_terminate() {
        let found = values("// sql begin\nvar q = @\"SELECT \"\"Order\"\" FROM T\";\n// sql end");
        assert_eq!(
            found,
            vec![(
                "SELECT \"Order\" FROM T".to_string(),
                LiteralKind::Verbatim
            )]
        );
    }

    #[test]
    fn doubled_quote_at_line_end_continues_on_next_line() {
        let found = values("// sql begin\nvar q = @\"a\"\"\nb\";\n// sql end");
        assert_eq!(found, vec![("a\"\nb".to_string(), LiteralKind::Verbatim)]);
    }

    #[test]
    fn empty_literal_is_emitted() {
        let doc = SourceDocument::new("// sql begin\nvar q = @\"\";\n// sql end");
        let literals = extract_literals(&doc, &region_of(&doc));

        assert_eq!(literals.len(), 1);
        assert!(literals[0].range.is_empty());
    }

    #[test]
    fn scanning_resumes_after_literal_end_line() {
        // The second literal shares the closing line of the first and is skipped.
        let found = values(
            "// sql begin\nvar a = @\"SELECT 1\nFROM A\"; var b = @\"SELECT 2\";\nvar c = @\"SELECT 3\";\n// sql end",
        );
        assert_eq!(
            found,
            vec![
                ("SELECT 1\nFROM A".to_string(), LiteralKind::Verbatim),
                ("SELECT 3".to_string(), LiteralKind::Verbatim),
            ]
        );
    }

    #[test]
    fn unterminated_literal_is_dropped() {
        let doc = SourceDocument::new("// sql begin\nvar q = @\"SELECT 1\nFROM T;\n// sql end\n\";");
        assert!(extract_literals(&doc, &MarkedRegion::new(0, 3)).is_empty());
    }

    #[test]
    fn literal_content_is_not_rescanned_for_onsets() {
        let found = values("// sql begin\nvar q = @\"SELECT '@\"\"x'\nFROM T\";\n// sql end");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "SELECT '@\"x'\nFROM T");
    }

    #[test]
    fn empty_region_has_no_literals() {
        let doc = SourceDocument::new("// sql begin\n// sql end");
        assert!(extract_literals(&doc, &MarkedRegion::new(0, 1)).is_empty());
    }
}

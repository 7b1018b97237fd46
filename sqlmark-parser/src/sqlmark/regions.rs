//! Region Finder
//!
//! Locates `// sql begin` .. `// sql end` marker pairs. A marker line holds nothing but the
//! comment (case-insensitive, any surrounding whitespace). Each begin marker pairs with the
//! nearest following end marker; regions never nest, so begin markers seen while a region is
//! open are plain content. A begin marker with no end before the end of the document is
//! dropped.
//!
//! The scan is a single forward pass over the lines.

use super::ast::MarkedRegion;
use super::document::TextBuffer;
use once_cell::sync::Lazy;
use regex::Regex;

static BEGIN_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*//\s*sql\s+begin\s*$").unwrap());

static END_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*//\s*sql\s+end\s*$").unwrap());

pub fn is_begin_marker(line: &str) -> bool {
    BEGIN_MARKER.is_match(line)
}

pub fn is_end_marker(line: &str) -> bool {
    END_MARKER.is_match(line)
}

/// Find every closed marker region in the buffer, in document order.
pub fn find_regions<B: TextBuffer + ?Sized>(buffer: &B) -> Vec<MarkedRegion> {
    let mut regions = Vec::new();
    let mut open: Option<usize> = None;

    for index in 0..buffer.line_count() {
        let line = buffer.line(index);
        match open {
            None if is_begin_marker(line) => open = Some(index),
            Some(begin_line) if is_end_marker(line) => {
                regions.push(MarkedRegion::new(begin_line, index));
                open = None;
            }
            _ => {}
        }
    }

    if let Some(begin_line) = open {
        tracing::trace!(begin_line, "sql begin marker without matching end");
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlmark::document::SourceDocument;
    use rstest::rstest;

    #[rstest]
    #[case("// sql begin")]
    #[case("//sql begin")]
    #[case("   // SQL   Begin   ")]
    #[case("\t//  Sql BEGIN")]
    fn recognizes_begin_markers(#[case] line: &str) {
        assert!(is_begin_marker(line));
    }

    #[rstest]
    #[case("// sql begin here")]
    #[case("var x = 1; // sql begin")]
    #[case("// sqlbegin")]
    #[case("/* sql begin */")]
    #[case("// sql")]
    fn rejects_non_markers(#[case] line: &str) {
        assert!(!is_begin_marker(line));
    }

    #[test]
    fn recognizes_end_markers() {
        assert!(is_end_marker("  // sql end"));
        assert!(is_end_marker("//SQL END  "));
        assert!(!is_end_marker("// sql ending"));
    }

    #[test]
    fn pairs_begin_with_nearest_end() {
        let doc = SourceDocument::new(
            "class A {\n// sql begin\nvar a = 1;\n// sql end\n// sql end\n// sql begin\n// sql end\n}",
        );

        assert_eq!(
            find_regions(&doc),
            vec![MarkedRegion::new(1, 3), MarkedRegion::new(5, 6)]
        );
    }

    #[test]
    fn regions_do_not_nest() {
        let doc = SourceDocument::new("// sql begin\n// sql begin\nx\n// sql end\n// sql end");

        assert_eq!(find_regions(&doc), vec![MarkedRegion::new(0, 3)]);
    }

    #[test]
    fn unclosed_begin_is_ignored() {
        let doc = SourceDocument::new("// sql begin\nvar q = @\"SELECT 1\";\n");

        assert!(find_regions(&doc).is_empty());
    }

    #[test]
    fn unclosed_begin_after_closed_region_keeps_earlier_region() {
        let doc = SourceDocument::new("// sql begin\n// sql end\n// sql begin\nx");

        assert_eq!(find_regions(&doc), vec![MarkedRegion::new(0, 1)]);
    }
}

//! Single-line SQL hint comments
//!
//! A `// sql` or `// sql syntax` comment directly in front of a construct marks it as SQL: the
//! text between the last line break before the construct and the construct itself must be the
//! hint. The region pipeline does not consult this predicate; only explicit begin/end regions
//! are highlighted.

use once_cell::sync::Lazy;
use regex::Regex;

static HINT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^//\s*(sql(?:\s+syntax)?)\s*$").unwrap());

pub fn is_sql_hint(line: &str) -> bool {
    HINT_MARKER.is_match(line.trim())
}

/// Whether the text leading up to `offset` on its own line is a hint comment.
///
/// `offset` is a byte offset into `text`; it is clamped to the text and moved back to a char
/// boundary. A construct that starts a line has nothing in front of it, so the answer is
/// `false`.
pub fn has_sql_hint_above(text: &str, offset: usize) -> bool {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let leading = match before.rfind('\n') {
        Some(line_break) => &before[line_break + 1..],
        None => before,
    };
    is_sql_hint(leading)
}

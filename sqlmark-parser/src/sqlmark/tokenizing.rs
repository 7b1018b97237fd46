//! Tokenizer/Classifier
//!
//! Classifies the text of one SQL segment. Each category has its own regex matcher; every
//! matcher scans the whole segment independently and reports all of its matches. Matches from
//! different categories overlap on purpose: identifiers are the base layer and the later passes
//! paint over them, so a renderer that applies ranges in pass order shows the last one.
//!
//! # Pass order
//!
//! 1. identifier - words, dotted names grouped (`u.name`)
//! 2. keyword - fixed clause/operator vocabulary
//! 3. function - fixed scalar/aggregate vocabulary
//! 4. boolean - `true` / `false`
//! 5. parameter - `@name`
//! 6. string - `'...'` with `''` escapes
//! 7. number - integer or decimal
//!
//! Swapping passes changes what is visible, so the order is part of the contract.
//!
//! The string pass is skipped for a segment whose trimmed text starts and ends with `'` (and
//! is at least two characters long). Such a segment sits between interpolation holes whose
//! surrounding quotes belong to the same SQL string, and matching it would pair quotes across
//! the holes.

mod vocabulary;

pub use vocabulary::{pattern_for, BOOLEANS, FUNCTIONS, KEYWORDS};

use super::ast::{Range, SqlSegment};
use super::document::TextBuffer;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use serde::Serialize;
use std::fmt;
use std::ops::Range as ByteRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Identifier,
    Keyword,
    Function,
    Boolean,
    Parameter,
    String,
    Number,
}

impl Category {
    /// Classification pass order.
    pub const ALL: [Category; 7] = [
        Category::Identifier,
        Category::Keyword,
        Category::Function,
        Category::Boolean,
        Category::Parameter,
        Category::String,
        Category::Number,
    ];

    /// Order in which category sets are handed to the styling sink.
    pub const EMIT_ORDER: [Category; 7] = [
        Category::Identifier,
        Category::Keyword,
        Category::Parameter,
        Category::String,
        Category::Number,
        Category::Function,
        Category::Boolean,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Identifier => "identifier",
            Category::Keyword => "keyword",
            Category::Function => "function",
            Category::Boolean => "boolean",
            Category::Parameter => "parameter",
            Category::String => "string",
            Category::Number => "number",
        }
    }

    /// Position in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified range of document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedToken {
    pub category: Category,
    pub range: Range,
}

static MATCHERS: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    Category::ALL
        .iter()
        .map(|&category| {
            let regex = Regex::new(&pattern_for(category))
                .unwrap_or_else(|e| panic!("invalid {category} pattern: {e}"));
            (category, regex)
        })
        .collect()
});

/// Whether the trimmed text is wrapped in single quotes, which disables the string pass.
pub fn is_quote_bounded(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'')
}

/// Classify a segment's text. Ranges are byte offsets into `text`, listed in pass order.
///
/// The matchers run over raw bytes, but every match starts and ends on an ASCII byte, so the
/// ranges always fall on char boundaries.
pub fn classify(text: &str) -> Vec<(Category, ByteRange<usize>)> {
    let skip_strings = is_quote_bounded(text);
    let mut found = Vec::new();

    for (category, regex) in MATCHERS.iter() {
        if *category == Category::String && skip_strings {
            continue;
        }
        found.extend(regex.find_iter(text.as_bytes()).map(|m| (*category, m.range())));
    }

    found
}

/// Classify one segment and map the matches back to document ranges.
pub fn tokenize_segment<B: TextBuffer + ?Sized>(
    buffer: &B,
    segment: &SqlSegment,
) -> Vec<ClassifiedToken> {
    let base = segment.range.span.start;
    classify(buffer.text(&segment.range))
        .into_iter()
        .map(|(category, span)| ClassifiedToken {
            category,
            range: buffer.range_for(base + span.start, base + span.end),
        })
        .collect()
}

//! The `sqlmark/decorations` notification
//!
//!     After every pass the server sends one notification per document carrying all seven
//!     category sets in emit order. Each set is the complete list of ranges for that category, so
//!     a client replaces its decorations wholesale and an empty set clears stale ones.

use super::positions::to_lsp_range;
use serde::{Deserialize, Serialize};
use sqlmark_config::{Style, StyleSheet};
use sqlmark_parser::sqlmark::document::TextBuffer;
use sqlmark_parser::Highlights;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::{Range, Url};

pub enum Decorations {}

impl Notification for Decorations {
    type Params = DecorationsParams;
    const METHOD: &'static str = "sqlmark/decorations";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationsParams {
    pub uri: Url,
    pub version: Option<i32>,
    pub decorations: Vec<CategoryDecorations>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDecorations {
    pub category: String,
    pub style: Style,
    pub ranges: Vec<Range>,
}

impl DecorationsParams {
    pub fn category(&self, name: &str) -> Option<&CategoryDecorations> {
        self.decorations
            .iter()
            .find(|decoration| decoration.category == name)
    }
}

pub fn build_decorations<B: TextBuffer + ?Sized>(
    uri: Url,
    version: Option<i32>,
    buffer: &B,
    highlights: &Highlights,
    styles: &StyleSheet,
) -> DecorationsParams {
    let decorations = highlights
        .by_category()
        .map(|(category, ranges)| CategoryDecorations {
            category: category.as_str().to_string(),
            style: styles.style(category).clone(),
            ranges: ranges
                .iter()
                .map(|range| to_lsp_range(buffer, range))
                .collect(),
        })
        .collect();

    DecorationsParams {
        uri,
        version,
        decorations,
    }
}

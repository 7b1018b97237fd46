//! Resolved display styles, one per category.

use crate::SqlmarkConfig;
use serde::{Deserialize, Serialize};
use sqlmark_parser::Category;

/// How one category is painted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub color: String,
    pub bold: bool,
}

/// Styles for every category, built once per configuration change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    styles: [Style; 7],
}

impl StyleSheet {
    pub fn from_config(config: &SqlmarkConfig) -> Self {
        let styles = Category::ALL.map(|category| Style {
            color: config.colors.color_for(category).to_string(),
            bold: category == Category::Keyword && config.keywords.bold,
        });
        Self { styles }
    }

    pub fn style(&self, category: Category) -> &Style {
        &self.styles[category.index()]
    }

    /// Styles in emit order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Style)> + '_ {
        Category::EMIT_ORDER
            .iter()
            .map(move |&category| (category, self.style(category)))
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::from_config(&SqlmarkConfig::default())
    }
}

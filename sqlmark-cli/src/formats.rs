//! Output formats for highlight results and style sheets.

use crate::error::CliError;
use serde::Serialize;
use sqlmark_config::StyleSheet;
use sqlmark_parser::sqlmark::ast::Position;
use sqlmark_parser::sqlmark::document::{SourceDocument, TextBuffer};
use sqlmark_parser::{Category, Highlights};
use std::str::FromStr;

pub const AVAILABLE_FORMATS: &[&str] = &["text", "json", "yaml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Yaml,
}

impl FromStr for Format {
    type Err = CliError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "yaml" => Ok(Format::Yaml),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    category: Category,
    start: Position,
    end: Position,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct StyleRecord<'a> {
    category: Category,
    color: &'a str,
    bold: bool,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}

fn to_yaml<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(value)?)
}

/// Keep multi-line tokens on one output line.
fn one_line(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

/// Render every classified token of one pass.
pub fn render_highlights(
    doc: &SourceDocument,
    highlights: &Highlights,
    format: Format,
) -> Result<String, CliError> {
    let records: Vec<TokenRecord<'_>> = highlights
        .tokens()
        .iter()
        .map(|token| TokenRecord {
            category: token.category,
            start: token.range.start,
            end: token.range.end,
            text: doc.text(&token.range),
        })
        .collect();

    match format {
        Format::Text => Ok(records
            .iter()
            .map(|record| {
                format!(
                    "{} {}..{} {}\n",
                    record.category,
                    record.start,
                    record.end,
                    one_line(record.text)
                )
            })
            .collect()),
        Format::Json => to_json(&records),
        Format::Yaml => to_yaml(&records),
    }
}

/// Render the resolved style of each category, in emit order.
pub fn render_styles(sheet: &StyleSheet, format: Format) -> Result<String, CliError> {
    let records: Vec<StyleRecord<'_>> = sheet
        .iter()
        .map(|(category, style)| StyleRecord {
            category,
            color: &style.color,
            bold: style.bold,
        })
        .collect();

    match format {
        Format::Text => Ok(records
            .iter()
            .map(|record| {
                let weight = if record.bold { " bold" } else { "" };
                format!("{} {}{}\n", record.category, record.color, weight)
            })
            .collect()),
        Format::Json => to_json(&records),
        Format::Yaml => to_yaml(&records),
    }
}

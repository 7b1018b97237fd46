//! Shared configuration loader for sqlmark.
//!
//! `defaults/sqlmark.default.toml` is embedded into every binary so that docs and runtime
//! behavior stay in sync. Applications layer a user file, editor settings and single-key
//! overrides on top of those defaults via [`Loader`] before deserializing into
//! [`SqlmarkConfig`]. Keys missing from every layer fall back to the defaults; unknown keys are
//! ignored and color strings are never validated.

mod styles;

pub use config::ConfigError;
pub use styles::{Style, StyleSheet};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use sqlmark_parser::Category;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/sqlmark.default.toml");

/// Settings namespace used by editors (`sqlmark.colors.keywords`, ...).
pub const SETTINGS_SECTION: &str = "sqlmark";

/// Top-level configuration consumed by sqlmark applications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqlmarkConfig {
    pub colors: ColorsConfig,
    pub keywords: KeywordsConfig,
    pub highlight: HighlightConfig,
}

/// Display color per category, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColorsConfig {
    pub keywords: String,
    pub parameters: String,
    pub strings: String,
    pub numbers: String,
    pub functions: String,
    pub booleans: String,
    pub identifiers: String,
}

impl ColorsConfig {
    pub fn color_for(&self, category: Category) -> &str {
        match category {
            Category::Identifier => &self.identifiers,
            Category::Keyword => &self.keywords,
            Category::Function => &self.functions,
            Category::Boolean => &self.booleans,
            Category::Parameter => &self.parameters,
            Category::String => &self.strings,
            Category::Number => &self.numbers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeywordsConfig {
    pub bold: bool,
}

/// When and where highlighting passes run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HighlightConfig {
    pub debounce_ms: u64,
    pub languages: Vec<String>,
}

impl HighlightConfig {
    pub fn applies_to(&self, language_id: &str) -> bool {
        self.languages
            .iter()
            .any(|language| language.eq_ignore_ascii_case(language_id))
    }
}

impl Default for SqlmarkConfig {
    fn default() -> Self {
        Self {
            colors: ColorsConfig {
                keywords: "#ef836eff".into(),
                parameters: "#9CDCFE".into(),
                strings: "#CE9178".into(),
                numbers: "#B5CEA8".into(),
                functions: "#DCDCAA".into(),
                booleans: "#569CD6".into(),
                identifiers: "#FFFFFF".into(),
            },
            keywords: KeywordsConfig { bold: true },
            highlight: HighlightConfig {
                debounce_ms: 100,
                languages: vec!["csharp".into()],
            },
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer editor settings, already narrowed to the sqlmark section.
    pub fn with_settings(mut self, settings: &serde_json::Value) -> Self {
        if settings.is_object() {
            let source = File::from_str(&settings.to_string(), FileFormat::Json);
            self.builder = self.builder.add_source(source);
        }
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<SqlmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SqlmarkConfig, ConfigError> {
    Loader::new().build()
}

/// Pick the sqlmark section out of an editor settings payload.
///
/// Clients send either the whole settings tree (`{"sqlmark": {...}}`) or just the section.
pub fn settings_section(settings: &serde_json::Value) -> &serde_json::Value {
    settings.get(SETTINGS_SECTION).unwrap_or(settings)
}

//! Runtime configuration.
//!
//! All fields have defaults, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! [extract]
//! reference_delimiter = " - "
//! observation_placeholders = ["nan", "", ".", "-"]
//! teacher_placeholders = ["nan", ""]
//! name_wrap_width = 30
//! workbook_extension = "xlsx"
//! http_timeout_secs = 30
//!
//! [search]
//! max_branches = 1000000
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on candidate branches examined by one search.
pub const DEFAULT_MAX_BRANCHES: u64 = 1_000_000;

/// Configuration failed to load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Document is not valid TOML for [`Config`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Table extraction settings.
    pub extract: ExtractConfig,
    /// Search engine settings.
    pub search: SearchConfig,
}

impl Config {
    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "configuration loaded");
        Ok(config)
    }
}

/// Settings for turning source tables into course units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Separator between components of the `Oblig.` field.
    pub reference_delimiter: String,
    /// Observation values treated as "no observation" (compared trimmed,
    /// case-insensitively).
    pub observation_placeholders: Vec<String>,
    /// Teacher values treated as "unknown teacher", compared the same way.
    pub teacher_placeholders: Vec<String>,
    /// Names longer than this many characters are wrapped onto two lines
    /// for display.
    pub name_wrap_width: usize,
    /// File extension of workbook sources in a directory.
    pub workbook_extension: String,
    /// Timeout for fetching a web source.
    pub http_timeout_secs: u64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            reference_delimiter: " - ".into(),
            observation_placeholders: vec!["nan".into(), "".into(), ".".into(), "-".into()],
            teacher_placeholders: vec!["nan".into(), "".into()],
            name_wrap_width: 30,
            workbook_extension: "xlsx".into(),
            http_timeout_secs: 30,
        }
    }
}

impl ExtractConfig {
    /// Sets the composite reference delimiter.
    pub fn with_reference_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.reference_delimiter = delimiter.into();
        self
    }

    /// Sets the display wrapping threshold.
    pub fn with_name_wrap_width(mut self, width: usize) -> Self {
        self.name_wrap_width = width;
        self
    }

    /// Whether `value` is an empty-observation placeholder.
    pub fn is_placeholder(&self, value: &str) -> bool {
        matches_placeholder(&self.observation_placeholders, value)
    }

    /// Whether `value` is an unknown-teacher placeholder.
    pub fn is_teacher_placeholder(&self, value: &str) -> bool {
        matches_placeholder(&self.teacher_placeholders, value)
    }
}

fn matches_placeholder(placeholders: &[String], value: &str) -> bool {
    let value = value.trim();
    placeholders
        .iter()
        .any(|p| p.trim().eq_ignore_ascii_case(value))
}

/// Settings for the combination search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum candidate branches examined per search. `None` = unbounded.
    pub max_branches: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_branches: Some(DEFAULT_MAX_BRANCHES),
        }
    }
}

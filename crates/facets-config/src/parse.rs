//! The on-disk `.facets.toml` schema.
//!
//! Every field is optional here: a file only states what it overrides, and
//! merging decides which file supplies each value.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// One config file as written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// Stops discovery at this file, skipping parents and `~/.facets.toml`.
    pub root: Option<bool>,
    /// Tree construction section.
    pub tree: Option<RawTreeSettings>,
    /// Commentary section.
    pub commentary: Option<RawCommentarySettings>,
    /// Display section.
    pub display: Option<RawDisplaySettings>,
    /// Filters section.
    pub filters: Option<RawFilterSettings>,
    /// Input sources section.
    pub sources: Option<RawSources>,
}

/// Raw tree construction settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTreeSettings {
    /// Path given to the root node.
    pub root_path: Option<String>,
}

/// Raw commentary settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCommentarySettings {
    /// Top-level aggregation key for commentary.
    pub key: Option<String>,
    /// Taxonomy dependence tag for commentary.
    pub tag: Option<String>,
    /// English title.
    pub title: Option<String>,
    /// Hebrew title.
    pub he_title: Option<String>,
}

/// Raw display settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDisplaySettings {
    /// Title language.
    pub language: Option<String>,
    /// Whether to show document counts.
    pub show_counts: Option<bool>,
}

/// Raw filter settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFilterSettings {
    /// Query parameter name.
    pub param: Option<String>,
    /// Default filter path(s).
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub default: Option<Vec<String>>,
}

/// Raw input source paths, relative to the defining config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSources {
    /// Taxonomy JSON path.
    pub taxonomy: Option<String>,
    /// Aggregation JSON path.
    pub aggregation: Option<String>,
}

/// Reads and parses one `.facets.toml`.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|contents| parse_config_str(&contents, path))
}

/// Parses config text, attributing errors to `path`.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses config text with no file attached.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Returns true if the file at `path` sets `root = true`.
///
/// Unreadable and malformed files count as not being a root; loading reports them.
pub fn is_root_config(path: &Path) -> bool {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| toml::from_str::<RawConfig>(&contents).ok())
        .and_then(|config| config.root)
        .unwrap_or(false)
}

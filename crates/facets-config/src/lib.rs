//! Configuration system for facets.
//!
//! facets uses TOML configuration files named `.facets.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.facets.toml` files found, then loading `~/.facets.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
use facets_tree::{BuildOptions, COMMENTARY, COMMENTARY_HE_TITLE, DEFAULT_PARAM, Language, ROOT_PATH};
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawCommentarySettings, RawConfig, RawDisplaySettings, RawFilterSettings, RawSources,
    RawTreeSettings, parse_config_file, parse_config_str,
};
pub use resolve::resolve_source_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for facets.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.facets.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Tree construction settings.
    pub tree: TreeSettings,
    /// Commentary flattening settings.
    pub commentary: CommentarySettings,
    /// Output settings.
    pub display: DisplaySettings,
    /// Applied filter settings.
    pub filters: FilterSettings,
    /// Input files, resolved to absolute paths.
    pub sources: Sources,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.facets.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.facets.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.facets.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Returns the tree build options described by this configuration.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            root_path: self.tree.root_path.clone(),
            commentary_key: self.commentary.key.clone(),
            commentary_tag: self.commentary.tag.clone(),
            commentary_title: self.commentary.title.clone(),
            commentary_he_title: self.commentary.he_title.clone(),
        }
    }

    /// Returns the configured display language, if it names a known one.
    pub fn language(&self) -> Option<Language> {
        self.display.language.parse().ok()
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.facets.toml` file. Source paths are written in
    /// their resolved absolute form.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            tree: &self.tree,
            commentary: &self.commentary,
            display: &self.display,
            filters: &self.filters,
            sources: &self.sources,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Tree construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TreeSettings {
    /// Path given to the root node.
    pub root_path: String,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            root_path: ROOT_PATH.to_string(),
        }
    }
}

/// Settings for the synthetic commentary facet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CommentarySettings {
    /// Top-level aggregation key holding commentary counts.
    pub key: String,
    /// Taxonomy dependence tag marking commentary branches.
    pub tag: String,
    /// English title of the commentary node.
    pub title: String,
    /// Hebrew title of the commentary node.
    pub he_title: String,
}

impl Default for CommentarySettings {
    fn default() -> Self {
        Self {
            key: COMMENTARY.to_string(),
            tag: COMMENTARY.to_string(),
            title: COMMENTARY.to_string(),
            he_title: COMMENTARY_HE_TITLE.to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Title language, `en` or `he`.
    pub language: String,
    /// Whether listings include document counts.
    pub show_counts: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            language: String::from("en"),
            show_counts: true,
        }
    }
}

/// Applied filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Name of the URL query parameter carrying applied filters.
    pub param: String,
    /// Filter paths applied when none are given explicitly.
    pub default: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            param: DEFAULT_PARAM.to_string(),
            default: Vec::new(),
        }
    }
}

/// Input file locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sources {
    /// Taxonomy JSON file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<PathBuf>,
    /// Aggregation buckets JSON file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<PathBuf>,
}

/// Borrowed view of the settings for TOML serialization.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Tree construction settings.
    tree: &'a TreeSettings,
    /// Commentary settings.
    commentary: &'a CommentarySettings,
    /// Output settings.
    display: &'a DisplaySettings,
    /// Applied filter settings.
    filters: &'a FilterSettings,
    /// Input file locations.
    sources: &'a Sources,
}

//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::Path};

use facets_tree::{FILTER_SEPARATOR, Language};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No taxonomy source is configured.
    NoTaxonomySource,
    /// A source path does not exist.
    SourceMissing {
        /// Which source (`taxonomy` or `aggregation`).
        source: &'static str,
        /// Path that doesn't exist.
        path: String,
    },
    /// A source path exists but is not a file.
    SourceNotFile {
        /// Which source (`taxonomy` or `aggregation`).
        source: &'static str,
        /// Path that is not a file.
        path: String,
    },
    /// The display language is not recognized.
    UnknownLanguage {
        /// The configured value.
        language: String,
    },
    /// A setting that must be non-empty is empty.
    EmptySetting {
        /// Dotted name of the setting.
        setting: &'static str,
    },
    /// The query parameter name cannot appear in a query string as-is.
    InvalidParamName {
        /// The configured name.
        param: String,
    },
    /// A default filter path contains the filter separator.
    DefaultFilterHasSeparator {
        /// The offending path.
        path: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTaxonomySource => write!(f, "no taxonomy source is configured"),
            Self::SourceMissing { source, path } => {
                write!(f, "{source} source does not exist: {path}")
            }
            Self::SourceNotFile { source, path } => {
                write!(f, "{source} source is not a file: {path}")
            }
            Self::UnknownLanguage { language } => {
                write!(f, "unknown display language '{language}' (expected en or he)")
            }
            Self::EmptySetting { setting } => write!(f, "{setting} is empty"),
            Self::InvalidParamName { param } => {
                write!(f, "filter parameter name '{param}' contains '=', '&' or '?'")
            }
            Self::DefaultFilterHasSeparator { path } => {
                write!(
                    f,
                    "default filter '{path}' contains '{FILTER_SEPARATOR}' and will be split"
                )
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    match &config.sources.taxonomy {
        Some(path) => warnings.extend(validate_source("taxonomy", path)),
        None => warnings.push(ConfigWarning::NoTaxonomySource),
    }
    if let Some(path) = &config.sources.aggregation {
        warnings.extend(validate_source("aggregation", path));
    }

    if config.display.language.parse::<Language>().is_err() {
        warnings.push(ConfigWarning::UnknownLanguage {
            language: config.display.language.clone(),
        });
    }

    let required = [
        ("tree.root_path", &config.tree.root_path),
        ("commentary.key", &config.commentary.key),
        ("commentary.tag", &config.commentary.tag),
        ("filters.param", &config.filters.param),
    ];
    for (setting, value) in required {
        if value.is_empty() {
            warnings.push(ConfigWarning::EmptySetting { setting });
        }
    }

    let param = &config.filters.param;
    if param.contains(['=', '&', '?']) {
        warnings.push(ConfigWarning::InvalidParamName {
            param: param.clone(),
        });
    }

    for path in &config.filters.default {
        if path.contains(FILTER_SEPARATOR) {
            warnings.push(ConfigWarning::DefaultFilterHasSeparator { path: path.clone() });
        }
    }

    warnings
}

/// Checks that a source path names an existing file.
fn validate_source(source: &'static str, path: &Path) -> Option<ConfigWarning> {
    let display = path.display().to_string();
    if !path.exists() {
        return Some(ConfigWarning::SourceMissing {
            source,
            path: display,
        });
    }
    if !path.is_file() {
        return Some(ConfigWarning::SourceNotFile {
            source,
            path: display,
        });
    }
    None
}

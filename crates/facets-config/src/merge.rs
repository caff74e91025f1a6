//! Folding discovered files into one [`Config`].
//!
//! Settings are applied from the lowest-precedence file to the highest, so the
//! file nearest the working directory has the last word.

use std::path::{Path, PathBuf};

use crate::{
    CommentarySettings, Config, ConfigError, DisplaySettings, FilterSettings, Sources,
    TreeSettings,
    parse::{RawCommentarySettings, RawConfig, RawDisplaySettings, RawFilterSettings},
    resolve::resolve_source_path,
};

/// A config file and what it declares.
pub struct ParsedConfig {
    /// Where the file lives; relative sources resolve against its directory.
    pub path: PathBuf,
    /// The file's settings.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Returns the directory containing the config file.
    fn dir(&self) -> Result<&Path, ConfigError> {
        self.path
            .parent()
            .ok_or_else(|| ConfigError::NoConfigDirectory {
                path: self.path.clone(),
            })
    }
}

/// Merges config files given nearest first, `~/.facets.toml` last.
///
/// - Scalar settings: the nearest file that sets a value wins
/// - Default filters: the first list defined wins as a whole
/// - Sources: first definition of each path wins, resolved against its own config file
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(first) = configs.first() else {
        return Ok(Config::default());
    };

    Ok(Config {
        tree: merge_tree_settings(configs),
        commentary: merge_commentary_settings(configs),
        display: merge_display_settings(configs),
        filters: merge_filter_settings(configs),
        sources: merge_sources(configs)?,
        config_root: Some(first.dir()?.to_path_buf()),
    })
}

/// Merges tree settings, taking first defined value for each field.
fn merge_tree_settings(configs: &[ParsedConfig]) -> TreeSettings {
    let mut result = TreeSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref tree) = parsed.config.tree
            && let Some(ref v) = tree.root_path
        {
            result.root_path.clone_from(v);
        }
    }

    result
}

/// Merges commentary settings.
fn merge_commentary_settings(configs: &[ParsedConfig]) -> CommentarySettings {
    let mut result = CommentarySettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref commentary) = parsed.config.commentary {
            apply_raw_commentary(&mut result, commentary);
        }
    }

    result
}

/// Applies raw commentary settings to result, overwriting any present values.
fn apply_raw_commentary(result: &mut CommentarySettings, raw: &RawCommentarySettings) {
    if let Some(ref v) = raw.key {
        result.key.clone_from(v);
    }
    if let Some(ref v) = raw.tag {
        result.tag.clone_from(v);
    }
    if let Some(ref v) = raw.title {
        result.title.clone_from(v);
    }
    if let Some(ref v) = raw.he_title {
        result.he_title.clone_from(v);
    }
}

/// Merges display settings.
fn merge_display_settings(configs: &[ParsedConfig]) -> DisplaySettings {
    let mut result = DisplaySettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref display) = parsed.config.display {
            apply_raw_display(&mut result, display);
        }
    }

    result
}

/// Applies raw display settings to result.
fn apply_raw_display(result: &mut DisplaySettings, raw: &RawDisplaySettings) {
    if let Some(ref v) = raw.language {
        result.language.clone_from(v);
    }
    if let Some(v) = raw.show_counts {
        result.show_counts = v;
    }
}

/// Merges filter settings.
fn merge_filter_settings(configs: &[ParsedConfig]) -> FilterSettings {
    let mut result = FilterSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref filters) = parsed.config.filters {
            apply_raw_filters(&mut result, filters);
        }
    }

    result
}

/// Applies raw filter settings to result.
fn apply_raw_filters(result: &mut FilterSettings, raw: &RawFilterSettings) {
    if let Some(ref v) = raw.param {
        result.param.clone_from(v);
    }
    if let Some(ref v) = raw.default {
        result.default.clone_from(v);
    }
}

/// Merges source paths, resolving each against the directory of its defining file.
fn merge_sources(configs: &[ParsedConfig]) -> Result<Sources, ConfigError> {
    let mut result = Sources::default();

    // nearest first; a path set once is never overwritten
    for parsed in configs {
        let Some(ref sources) = parsed.config.sources else {
            continue;
        };
        let config_dir = parsed.dir()?;

        if result.taxonomy.is_none()
            && let Some(ref path) = sources.taxonomy
        {
            result.taxonomy = Some(resolve_source_path(path, config_dir)?);
        }
        if result.aggregation.is_none()
            && let Some(ref path) = sources.aggregation
        {
            result.aggregation = Some(resolve_source_path(path, config_dir)?);
        }
    }

    Ok(result)
}

//! Locating `.facets.toml` files.
//!
//! Every ancestor of the working directory may hold a config file. The walk
//! upward ends at a file declaring `root = true`; otherwise the home directory
//! file is consulted last.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".facets.toml";

/// Lists the config files that apply to `cwd`, highest precedence first.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for candidate in cwd.ancestors().map(|dir| dir.join(CONFIG_FILENAME)) {
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        configs.push(candidate);
        if stop {
            return configs;
        }
    }

    if let Some(global) = global_config_path().filter(|path| path.is_file())
        && !configs.contains(&global)
    {
        configs.push(global);
    }
    configs
}

/// Returns `~/.facets.toml`, or `None` without a home directory.
pub fn global_config_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(CONFIG_FILENAME))
}

/// Returns true if `path` is `~/.facets.toml`.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| global == path)
}

/// Returns the user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

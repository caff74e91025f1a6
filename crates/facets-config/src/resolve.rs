//! Resolution of `[sources]` paths.

use std::path::{Path, PathBuf};

use crate::{ConfigError, discovery::home_dir};

/// Resolves a source path from the config file in `config_dir`.
///
/// `~` and `~/...` expand to the home directory, other relative paths are
/// joined to `config_dir`. The result is not canonicalized and need not
/// exist; validation reports missing files.
pub fn resolve_source_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let rest = match path.strip_prefix('~') {
        Some("") => Some(""),
        Some(rest) => rest.strip_prefix('/'),
        None => None,
    };

    match rest {
        Some(rest) => {
            let home = home_dir().ok_or(ConfigError::NoHomeDirectory)?;
            Ok(if rest.is_empty() { home } else { home.join(rest) })
        }
        None => Ok(config_dir.join(path)),
    }
}

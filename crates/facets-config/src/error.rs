//! Configuration errors.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::{de, ser};

/// Errors from loading, merging, or printing `.facets.toml` settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// The unreadable file.
        path: PathBuf,
        /// I/O failure.
        source: io::Error,
    },

    /// A config file is not valid TOML or does not match the schema.
    #[error("invalid config {path}: {source}")]
    ParseToml {
        /// The offending file.
        path: PathBuf,
        /// Decoder failure, with line and column.
        source: de::Error,
    },

    /// The effective settings could not be rendered as TOML.
    #[error("failed to serialize settings: {0}")]
    SerializeToml(#[from] ser::Error),

    /// A `~` source path was given but there is no home directory.
    #[error("cannot expand `~`: no home directory")]
    NoHomeDirectory,

    /// A config file path has no parent directory to resolve sources against.
    #[error("config file has no parent directory: {path}")]
    NoConfigDirectory {
        /// The config file path.
        path: PathBuf,
    },
}

//! Error types for loading filter tree inputs.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when reading a taxonomy or an aggregation response.
///
/// Building and mutating a tree never fails; only decoding its inputs can.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read an input file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The taxonomy JSON did not match the expected shape.
    #[error("failed to parse taxonomy: {0}")]
    Taxonomy(#[source] serde_json::Error),

    /// The aggregation JSON did not match the expected shape.
    #[error("failed to parse aggregation buckets: {0}")]
    Aggregation(#[source] serde_json::Error),
}

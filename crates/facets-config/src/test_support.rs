//! Scratch directory fixture for facets-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree, removed on drop.
pub struct TestDir(TempDir);

impl TestDir {
    /// Creates an empty scratch directory.
    pub fn new() -> Self {
        Self(tempfile::tempdir().unwrap())
    }

    /// Returns the scratch root.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Creates `rel` (and its parents) below the root.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let dir = self.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes `body` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, body: &str) -> PathBuf {
        let file = self.path().join(rel);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, body).unwrap();
        file
    }

    /// Writes a `.facets.toml` into directory `rel`; `""` is the root.
    pub fn config(&self, rel: &str, body: &str) -> PathBuf {
        self.write(&Path::new(rel).join(CONFIG_FILENAME).to_string_lossy(), body)
    }
}

//! Integration tests for facets-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> resolve -> merge.

// Integration tests live outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use facets_config::{Config, ConfigError, ConfigWarning, local_template};
use facets_tree::Language;

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_no_config_returns_default() {
    let env = TestEnv::new();
    env.create_file(".facets.toml", "root = true\n");
    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.tree.root_path, "_root");
    assert_eq!(config.commentary.he_title, "מפרשים");
    assert!(config.sources.taxonomy.is_none());
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
}

#[test]
fn test_load_nested_configs_merging() {
    let env = TestEnv::new();
    let subdir = env.create_dir("site/search");

    env.create_file(
        ".facets.toml",
        r#"
root = true

[sources]
taxonomy = "data/toc.json"

[display]
language = "he"
show_counts = false
"#,
    );
    env.create_file(
        "site/.facets.toml",
        r#"
[display]
show_counts = true

[filters]
default = ["Tanakh", "Talmud/Bavli"]
"#,
    );

    let config = Config::load(&subdir).unwrap();

    assert_eq!(config.display.language, "he");
    assert_eq!(config.language(), Some(Language::Hebrew));
    assert!(config.display.show_counts);
    assert_eq!(config.filters.default, vec!["Tanakh", "Talmud/Bavli"]);
    assert_eq!(
        config.sources.taxonomy,
        Some(env.path().join("data/toc.json"))
    );
    assert_eq!(config.config_root, Some(env.path().join("site")));
}

#[test]
fn test_build_options_follow_config() {
    let env = TestEnv::new();
    env.create_file(
        ".facets.toml",
        r#"
root = true

[tree]
root_path = "all"

[commentary]
key = "Mefarshim"
"#,
    );

    let options = Config::load(env.path()).unwrap().build_options();

    assert_eq!(options.root_path, "all");
    assert_eq!(options.commentary_key, "Mefarshim");
    assert_eq!(options.commentary_tag, "Commentary");
}

#[test]
fn test_load_invalid_toml_is_error() {
    let env = TestEnv::new();
    env.create_file(".facets.toml", "root = true\n[display\n");

    let err = Config::load(env.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { .. }));
}

#[test]
fn test_validate_reports_missing_sources() {
    let env = TestEnv::new();
    env.create_file(
        ".facets.toml",
        r#"
root = true

[sources]
taxonomy = "missing.json"
"#,
    );

    let warnings = Config::load(env.path()).unwrap().validate();
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        warnings[0],
        ConfigWarning::SourceMissing {
            source: "taxonomy",
            ..
        }
    ));
}

#[test]
fn test_written_template_loads_as_defaults() {
    let env = TestEnv::new();
    let body = format!("root = true\n{}", local_template());
    env.create_file(".facets.toml", &body);

    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.build_options(), facets_tree::BuildOptions::default());
    assert!(config.sources.taxonomy.is_none());
}

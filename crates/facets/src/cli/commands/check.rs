//! Implementation of `facets check`.

use std::{path::Path, process::ExitCode};

use facets_config::{ConfigWarning, discover_config_files};
use facets_tree::{InputError, Taxonomy, load_buckets};

use crate::cli::context::CommandContext;

/// Validates configuration and input files.
///
/// Exits successfully only when there are no warnings and both inputs parse.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    let config = &ctx.config;

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found.");
    } else {
        println!("Config files:");
        for path in &config_files {
            println!("  {}", path.display());
        }
    }
    println!();

    let mut healthy = true;

    println!("Sources:");
    if let Some(path) = &config.sources.taxonomy {
        let status = Taxonomy::load(path).map(|taxonomy| {
            format!("{} top-level categories", taxonomy.roots().len())
        });
        healthy &= print_source("taxonomy", path, status);
    }
    if let Some(path) = &config.sources.aggregation {
        let status = load_buckets(path).map(|buckets| format!("{} buckets", buckets.len()));
        healthy &= print_source("aggregation", path, status);
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        if healthy {
            println!("No issues found.");
            return ExitCode::SUCCESS;
        }
        return ExitCode::FAILURE;
    }

    println!("Warnings ({}):", warnings.len());
    for warning in &warnings {
        println!("  - {warning}");
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints the outcome of loading one source; returns false if it failed to parse.
///
/// Missing files are left to configuration warnings.
fn print_source(name: &str, path: &Path, status: Result<String, InputError>) -> bool {
    match status {
        Ok(summary) => {
            println!("  {name} [ok] {} ({summary})", path.display());
            true
        }
        Err(InputError::ReadFile { .. }) => {
            println!("  {name} [missing] {}", path.display());
            true
        }
        Err(e) => {
            println!("  {name} [invalid] {}", path.display());
            println!("    {e}");
            false
        }
    }
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints = Vec::new();

    for warning in warnings {
        let hint = match warning {
            ConfigWarning::NoTaxonomySource => {
                "Set sources.taxonomy in .facets.toml, or pass --taxonomy to each command."
            }
            ConfigWarning::SourceMissing { .. } | ConfigWarning::SourceNotFile { .. } => {
                "Source paths are relative to the config file that defines them."
            }
            ConfigWarning::UnknownLanguage { .. } => "Use \"en\" or \"he\" for display.language.",
            ConfigWarning::EmptySetting { .. } => "Remove empty settings to fall back to defaults.",
            ConfigWarning::InvalidParamName { .. } => {
                "Choose a filters.param name without query string punctuation."
            }
            ConfigWarning::DefaultFilterHasSeparator { .. } => {
                "List default filters as separate array entries."
            }
        };
        hints.push(hint);
    }

    hints.sort_unstable();
    hints.dedup();

    if !hints.is_empty() {
        println!("Hints:");
        for hint in hints {
            println!("  - {hint}");
        }
    }
}

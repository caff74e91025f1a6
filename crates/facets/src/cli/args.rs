//! Clap argument definitions for the `facets` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use facets_tree::Language;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "facets")]
#[command(about = "Hierarchical search facets - build, select, and encode filter trees")]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace); RUST_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Input file overrides shared by tree-building commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Taxonomy JSON file [default: sources.taxonomy from config]
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,

    /// Aggregation buckets JSON file [default: sources.aggregation from config]
    #[arg(long)]
    pub aggregation: Option<PathBuf>,
}

/// Initial selection shared by tree-building commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Applied filters as a pipe-joined list, e.g. "Tanakh|Mishnah/Seder Moed"
    #[arg(short = 'f', long)]
    pub filters: Option<String>,

    /// Query string to read the filter parameter from, percent-encoded or not, e.g. "?filters=Tanakh"
    #[arg(long, conflicts_with = "filters")]
    pub query: Option<String>,
}

/// Output flags shared by tree-building commands.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Title language: en or he [default: display.language from config]
    #[arg(long)]
    pub lang: Option<Language>,

    /// Hide document counts
    #[arg(long)]
    pub no_counts: bool,
}

/// Arguments for `facets build`.
#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
    #[command(flatten)]
    /// Input file overrides.
    pub sources: SourceArgs,

    #[command(flatten)]
    /// Initial selection.
    pub selection: SelectionArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,

    /// List only selected and partially selected nodes
    #[arg(long)]
    pub selected: bool,
}

/// Arguments for `facets select`.
#[derive(Args, Debug, Clone)]
pub struct SelectCommand {
    /// Filter paths (or node ids) to toggle, in order
    #[arg(required = true)]
    pub paths: Vec<String>,

    #[command(flatten)]
    /// Input file overrides.
    pub sources: SourceArgs,

    #[command(flatten)]
    /// Selection to start from.
    pub selection: SelectionArgs,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,

    /// Clear the starting selection before toggling
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for `facets init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.facets.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `facets` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Build the filter tree and show it with the applied selection
    #[command(after_help = "\
EXAMPLES:
  facets build --taxonomy toc.json --aggregation buckets.json
  facets build -f 'Tanakh|Mishnah/Seder Moed'
  facets build --query '?q=light&filters=Tanakh' --lang he
  facets build --selected --json")]
    Build(BuildCommand),

    /// Toggle filters and print the resulting query parameter
    #[command(after_help = "\
Toggling a selected node unselects it with its subtree; toggling an
unselected or partially selected node selects its whole subtree.

EXAMPLES:
  facets select Tanakh/Torah
  facets select -f 'Tanakh' Tanakh/Torah/Genesis
  facets select --clear Talmud Mishnah")]
    Select(SelectCommand),

    /// Initialize facets configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and input files
    Check,
}

impl Commands {
    /// Returns true if the command needs the merged configuration.
    ///
    /// `init` must work even when an existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}

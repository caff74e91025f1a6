//! Command implementations and dispatch.

pub mod build;
pub mod check;
pub mod config;
pub mod init;
pub mod select;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Build(cmd) => build::run(ctx, &cmd),
        Commands::Select(cmd) => select::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
    }
}

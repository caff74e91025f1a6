//! Implementation of `facets init`.

use std::{fs, path::PathBuf, process::ExitCode};

use facets_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Writes a commented starter `.facets.toml`.
///
/// Running in the home directory, or with `--global`, writes `~/.facets.toml`
/// from the global template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let global = global_config_path();
    let in_home = global
        .as_deref()
        .and_then(|path| path.parent())
        .is_some_and(|home| home == ctx.cwd);

    let (target, template): (PathBuf, String) = if cmd.global || in_home {
        let Some(path) = global else {
            eprintln!("error: could not determine home directory");
            return ExitCode::FAILURE;
        };
        (path, global_template())
    } else {
        (ctx.cwd.join(CONFIG_FILENAME), local_template())
    };

    if target.exists() && !cmd.force {
        eprintln!("error: configuration file already exists: {}", target.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    match fs::write(&target, template) {
        Ok(()) => {
            println!("Created {}", target.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write {}: {e}", target.display());
            ExitCode::FAILURE
        }
    }
}

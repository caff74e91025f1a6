//! Implementation of `facets build`.

use std::process::ExitCode;

use crate::cli::{
    args::BuildCommand,
    context::CommandContext,
    output::{listed_nodes, print_json, print_selection, tree_table},
};

/// Builds the filter tree and prints it with the applied selection.
pub fn run(ctx: &CommandContext, cmd: &BuildCommand) -> ExitCode {
    let session = match ctx.session(&cmd.sources, &cmd.selection) {
        Ok(session) => session,
        Err(code) => return code,
    };
    let tree = session.tree();
    let language = ctx.language(&cmd.output);
    let param = &ctx.config.filters.param;
    let ids = listed_nodes(tree, cmd.selected);

    if cmd.output.json {
        return print_json(tree, &ids, param, language);
    }

    if ids.is_empty() {
        println!("No facets.");
    } else {
        println!(
            "{}",
            tree_table(tree, &ids, language, ctx.show_counts(&cmd.output))
        );
    }
    println!();
    print_selection(tree, param, language);

    ExitCode::SUCCESS
}

//! Implementation of `facets select`.

use std::process::ExitCode;

use facets_tree::SelectionState;
use tracing::debug;

use crate::cli::{
    args::SelectCommand,
    context::CommandContext,
    output::{listed_nodes, print_json, print_selection, selection_mark},
};

/// Toggles filters on the built tree and prints the resulting selection.
///
/// Unknown paths are reported but do not stop the remaining toggles; the command then
/// exits with failure.
pub fn run(ctx: &CommandContext, cmd: &SelectCommand) -> ExitCode {
    let mut session = match ctx.session(&cmd.sources, &cmd.selection) {
        Ok(session) => session,
        Err(code) => return code,
    };
    let language = ctx.language(&cmd.output);
    let param = &ctx.config.filters.param;

    let tree = session.tree_mut();
    if cmd.clear {
        tree.clear_filters();
    }

    let mut unknown = Vec::new();
    let mut toggled = Vec::new();
    for path in &cmd.paths {
        match tree.toggle(path) {
            Some(state) => {
                debug!(path, %state, "toggled filter");
                toggled.push((path.as_str(), state));
            }
            None => unknown.push(path.as_str()),
        }
    }

    for path in &unknown {
        eprintln!("error: no such facet: {path}");
    }

    let tree = session.tree();
    if cmd.output.json {
        let code = print_json(tree, &listed_nodes(tree, true), param, language);
        return if unknown.is_empty() { code } else { ExitCode::FAILURE };
    }

    for (path, state) in &toggled {
        let title = tree.get(path).map_or(*path, |node| node.title_in(language));
        let verb = match state {
            SelectionState::Unselected => "removed",
            SelectionState::Selected | SelectionState::Partial => "added",
        };
        println!("{} {verb} {title}", selection_mark(*state));
    }
    println!();
    print_selection(tree, param, language);

    if unknown.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

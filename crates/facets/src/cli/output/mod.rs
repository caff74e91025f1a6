//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use facets_tree::{FilterNode, FilterTree, Language, NodeId, SelectionState, filters_to_query};
use serde::Serialize;

/// One node in JSON output.
#[derive(Serialize)]
struct JsonNode<'a> {
    /// Depth below the root; top-level facets are at 0.
    depth: usize,
    /// Node-id key.
    id: String,
    /// The node itself.
    #[serde(flatten)]
    node: &'a FilterNode,
}

/// JSON output for tree-building commands.
#[derive(Serialize)]
struct JsonTreeOutput<'a> {
    /// Applied filter paths, orphans included.
    applied_filters: Vec<String>,
    /// Applied paths with no node in the tree.
    orphan_filters: &'a [String],
    /// `name=value` query parameter reproducing the selection.
    query: String,
    /// Human-readable selection summary.
    summary: String,
    /// Total hits across the corpus.
    doc_count: u64,
    /// Listed nodes in pre-order.
    nodes: Vec<JsonNode<'a>>,
}

/// Returns the checkbox-style marker for a selection state.
pub fn selection_mark(state: SelectionState) -> &'static str {
    match state {
        SelectionState::Selected => "[x]",
        SelectionState::Partial => "[-]",
        SelectionState::Unselected => "[ ]",
    }
}

/// Returns the number of ancestors of a node, not counting the root.
pub fn depth(tree: &FilterTree, id: NodeId) -> usize {
    let mut depth = 0;
    let mut current = tree.node(id).parent();
    while let Some(parent) = current {
        current = tree.node(parent).parent();
        if current.is_some() {
            depth += 1;
        }
    }
    depth
}

/// Selects the nodes to list, in pre-order.
///
/// With `selected_only`, unselected nodes are skipped.
pub fn listed_nodes(tree: &FilterTree, selected_only: bool) -> Vec<NodeId> {
    tree.iter()
        .filter(|(_, node)| !selected_only || node.state() != SelectionState::Unselected)
        .map(|(id, _)| id)
        .collect()
}

/// Renders nodes as an indented table.
pub fn tree_table(tree: &FilterTree, ids: &[NodeId], language: Language, show_counts: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec!["", "Facet", "Path"];
    if show_counts {
        header.push("Count");
    }
    table.set_header(header);

    for &id in ids {
        let node = tree.node(id);
        let indent = "  ".repeat(depth(tree, id));
        let mut row = vec![
            Cell::new(selection_mark(node.state())),
            Cell::new(format!("{indent}{}", node.title_in(language))),
            Cell::new(&node.path),
        ];
        if show_counts {
            row.push(Cell::new(node.doc_count).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }

    table
}

/// Prints the selection summary, orphans, and the query parameter.
pub fn print_selection(tree: &FilterTree, param: &str, language: Language) {
    let summary = tree.selection_summary(language);
    if summary.is_empty() {
        println!("Selected: (none)");
    } else {
        println!("Selected: {summary}");
    }

    if !tree.orphan_filters().is_empty() {
        println!("Orphans:  {}", tree.orphan_filters().join(", "));
    }

    let query = filters_to_query(param, &tree.applied_filters());
    if !query.is_empty() {
        println!("Query:    {query}");
    }
}

/// Prints the tree and selection as JSON.
pub fn print_json(tree: &FilterTree, ids: &[NodeId], param: &str, language: Language) -> ExitCode {
    let applied_filters = tree.applied_filters();
    let output = JsonTreeOutput {
        query: filters_to_query(param, &applied_filters),
        applied_filters,
        orphan_filters: tree.orphan_filters(),
        summary: tree.selection_summary(language),
        doc_count: tree.root().doc_count,
        nodes: ids
            .iter()
            .map(|&id| {
                let node = tree.node(id);
                JsonNode {
                    depth: depth(tree, id),
                    id: node.id(),
                    node,
                }
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use facets_tree::{Bucket, Taxonomy, TaxonomyNode};

    use super::*;

    fn tree() -> FilterTree {
        let taxonomy = Taxonomy::new(vec![TaxonomyNode::category(
            "Tanakh",
            "תנ״ך",
            vec![TaxonomyNode::category(
                "Torah",
                "תורה",
                vec![TaxonomyNode::work("Genesis", "בראשית")],
            )],
        )]);
        FilterTree::build(&taxonomy, &[Bucket::new("Tanakh/Torah/Genesis", 3)], &[] as &[&str])
    }

    #[test]
    fn depth_counts_from_top_level() {
        let tree = tree();
        assert_eq!(depth(&tree, tree.lookup("Tanakh").unwrap()), 0);
        assert_eq!(depth(&tree, tree.lookup("Tanakh/Torah/Genesis").unwrap()), 2);
    }

    #[test]
    fn selected_only_skips_unselected() {
        let mut tree = tree();
        assert!(listed_nodes(&tree, true).is_empty());

        tree.select("Tanakh/Torah");
        assert_eq!(listed_nodes(&tree, true).len(), 3);
        assert_eq!(listed_nodes(&tree, false).len(), 3);
    }

    #[test]
    fn table_indents_titles() {
        let tree = tree();
        let ids = listed_nodes(&tree, false);
        let rendered = tree_table(&tree, &ids, Language::Hebrew, true).to_string();

        assert!(rendered.contains("    בראשית"));
        assert!(rendered.contains("Count"));
        assert!(!tree_table(&tree, &ids, Language::English, false)
            .to_string()
            .contains("Count"));
    }

    #[test]
    fn marks_match_states() {
        assert_eq!(selection_mark(SelectionState::Selected), "[x]");
        assert_eq!(selection_mark(SelectionState::Partial), "[-]");
        assert_eq!(selection_mark(SelectionState::Unselected), "[ ]");
    }
}

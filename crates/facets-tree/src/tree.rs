//! The filter tree: registry, selection serialization, and orphan filters.
//!
//! A [`FilterTree`] is rebuilt from scratch for every aggregation response.
//! Selection state does not survive as object identity; it survives as the
//! list of applied filter paths, captured with [`FilterTree::applied_filters`]
//! and restored with [`FilterTree::set_applied_filters`]. Paths that the new
//! tree does not contain are kept as orphan filters, seeded into the next
//! build, and never silently dropped.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    aggregate::{Bucket, ingest},
    arena::NodeArena,
    build::{BuildOptions, Built, TreeBuilder},
    node::{FilterNode, Language, NodeId, SelectionState},
    taxonomy::Taxonomy,
};

/// A hierarchical facet tree built from a taxonomy and search counts.
#[derive(Debug, Clone)]
pub struct FilterTree {
    /// Owning storage for every node, root included.
    arena: NodeArena,
    /// The root node.
    root: NodeId,
    /// Path and node-id keys of every non-root node.
    registry: HashMap<String, NodeId>,
    /// Applied paths with no node in this tree.
    orphan_filters: Vec<String>,
}

impl Default for FilterTree {
    /// An empty tree: a lone root with no facets.
    fn default() -> Self {
        let mut arena = NodeArena::new();
        let root = arena.insert(FilterNode::new(BuildOptions::default().root_path, "", "", 0));
        Self {
            arena,
            root,
            registry: HashMap::new(),
            orphan_filters: Vec::new(),
        }
    }
}

impl FilterTree {
    /// Builds a tree with default options.
    ///
    /// `orphans` are the orphan filters of the previous tree; they are seeded
    /// into the count tree with zero hits so that they can reappear as nodes.
    pub fn build<S: AsRef<str>>(taxonomy: &Taxonomy, buckets: &[Bucket], orphans: &[S]) -> Self {
        Self::build_with(taxonomy, buckets, orphans, &BuildOptions::default())
    }

    /// Builds a tree with explicit options.
    pub fn build_with<S: AsRef<str>>(
        taxonomy: &Taxonomy,
        buckets: &[Bucket],
        orphans: &[S],
        options: &BuildOptions,
    ) -> Self {
        let raw = ingest(buckets, orphans);
        let Built {
            arena,
            root,
            registry,
        } = TreeBuilder::new(taxonomy, &raw, options).build();

        Self {
            arena,
            root,
            registry,
            orphan_filters: Vec::new(),
        }
    }

    /// Builds the successor of this tree for a new aggregation response.
    ///
    /// This tree's orphans are seeded into the build and its applied filters
    /// are re-applied to the result.
    pub fn rebuild(&self, taxonomy: &Taxonomy, buckets: &[Bucket], options: &BuildOptions) -> Self {
        let applied = self.applied_filters();
        let mut next = Self::build_with(taxonomy, buckets, &self.orphan_filters, options);
        next.set_applied_filters(&applied);
        next
    }

    /// Returns the root id.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Returns the root node.
    pub fn root(&self) -> &FilterNode {
        &self.arena[self.root]
    }

    /// Returns a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different tree.
    pub fn node(&self, id: NodeId) -> &FilterNode {
        &self.arena[id]
    }

    /// Looks up a node id by path or node-id key.
    pub fn lookup(&self, key: &str) -> Option<NodeId> {
        self.registry.get(key).copied()
    }

    /// Looks up a node by path or node-id key.
    pub fn get(&self, key: &str) -> Option<&FilterNode> {
        self.lookup(key).map(|id| &self.arena[id])
    }

    /// Returns the flat key index over all non-root nodes.
    pub fn registry(&self) -> &HashMap<String, NodeId> {
        &self.registry
    }

    /// Iterates over all non-root nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &FilterNode)> {
        self.arena.iter_preorder(self.root).skip(1)
    }

    /// Returns the number of non-root nodes.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    /// Returns true if the tree has no facets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the orphan filters.
    pub fn orphan_filters(&self) -> &[String] {
        &self.orphan_filters
    }

    /// Selects the node at `key` with its subtree, re-deriving ancestors.
    ///
    /// Returns false if no such node exists.
    pub fn select(&mut self, key: &str) -> bool {
        let Some(id) = self.lookup(key) else {
            return false;
        };
        self.arena.set_selected(id, true, true);
        true
    }

    /// Unselects the node at `key` with its subtree, re-deriving ancestors.
    ///
    /// Returns false if no such node exists.
    pub fn deselect(&mut self, key: &str) -> bool {
        let Some(id) = self.lookup(key) else {
            return false;
        };
        self.arena.set_unselected(id, true, true);
        true
    }

    /// Flips the selection of the node at `key` and returns its new state.
    ///
    /// A selected node becomes unselected; a partial or unselected one becomes
    /// selected. Toggling an orphan path removes the orphan. Returns `None` for
    /// unknown paths.
    pub fn toggle(&mut self, key: &str) -> Option<SelectionState> {
        if let Some(id) = self.lookup(key) {
            if self.arena[id].is_selected() {
                self.arena.set_unselected(id, true, true);
            } else {
                self.arena.set_selected(id, true, true);
            }
            return Some(self.arena[id].state());
        }

        let position = self.orphan_filters.iter().position(|p| p == key)?;
        self.orphan_filters.remove(position);
        Some(SelectionState::Unselected)
    }

    /// Unselects every node and drops all orphan filters.
    pub fn clear_filters(&mut self) {
        self.arena.reset();
        self.orphan_filters.clear();
    }

    /// Returns true if any node is selected or any orphan filter is held.
    pub fn has_applied_filters(&self) -> bool {
        !self.orphan_filters.is_empty() || self.root().state() != SelectionState::Unselected
    }

    /// Returns the applied filter paths.
    ///
    /// A selected node contributes its own path and hides its subtree; a
    /// partial node is descended into; an unselected node is skipped. Orphan
    /// filters are appended verbatim.
    pub fn applied_filters(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .topmost_selected()
            .into_iter()
            .map(|id| self.arena[id].path.clone())
            .collect();
        paths.extend(self.orphan_filters.iter().cloned());
        paths
    }

    /// Replaces the selection with the given filter paths.
    ///
    /// Every node is reset first. Each known path is selected together with
    /// its subtree and its ancestors re-derive their state; unknown paths
    /// become orphan filters.
    pub fn set_applied_filters<S: AsRef<str>>(&mut self, paths: &[S]) {
        self.arena.reset();
        self.orphan_filters.clear();

        for path in paths {
            let path = path.as_ref();
            if path.is_empty() {
                continue;
            }
            match self.lookup(path) {
                Some(id) => self.arena.set_selected(id, true, true),
                None => {
                    if !self.orphan_filters.iter().any(|p| p == path) {
                        debug!(path, "applied filter not in tree, keeping as orphan");
                        self.orphan_filters.push(path.to_string());
                    }
                }
            }
        }
    }

    /// Returns the display titles of the topmost selected nodes.
    pub fn selected_titles(&self, language: Language) -> Vec<&str> {
        self.topmost_selected()
            .into_iter()
            .map(|id| self.arena[id].title_in(language))
            .collect()
    }

    /// Renders the selected titles as a human-readable list.
    ///
    /// English joins as `A, B and C`; Hebrew as `A, B וC`.
    pub fn selection_summary(&self, language: Language) -> String {
        let titles = self.selected_titles(language);
        let Some((last, rest)) = titles.split_last() else {
            return String::new();
        };
        if rest.is_empty() {
            return (*last).to_string();
        }
        let conjunction = match language {
            Language::English => " and ",
            Language::Hebrew => " ו",
        };
        format!("{}{conjunction}{last}", rest.join(", "))
    }

    /// Collects the selected nodes that have no selected ancestor.
    fn topmost_selected(&self) -> Vec<NodeId> {
        let mut selected = Vec::new();
        let mut stack: Vec<NodeId> = self.arena[self.root].children().iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            match node.state() {
                SelectionState::Selected => selected.push(id),
                SelectionState::Partial => stack.extend(node.children().iter().rev()),
                SelectionState::Unselected => {}
            }
        }

        selected
    }
}

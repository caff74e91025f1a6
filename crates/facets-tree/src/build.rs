//! Construction of a filter tree from the taxonomy and a count tree.
//!
//! The walker visits the taxonomy depth-first in declaration order, keeping a
//! stack of path segments. Every branch with an entry in the count tree
//! becomes a [`FilterNode`]; a branch without one is dropped together with its
//! subtree, so the facet list only shows paths that have hits or carry an
//! orphan selection.
//!
//! # Commentary
//!
//! Commentaries are catalogued per base text (`Torah Commentary/Genesis/Rashi`)
//! but searched under one flat key (`Commentary/Rashi`). Before the regular
//! walk, a synthetic commentary node is created from the count tree entry at
//! the commentary key, and every branch tagged as commentary is walked with
//! its path rooted at that key instead of its nominal ancestors. A commentary
//! that appears under several base texts resolves to the same path and is
//! merged into a single node.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    aggregate::RawNode,
    arena::NodeArena,
    node::{FilterNode, NodeId},
    path::join_path,
    taxonomy::{Taxonomy, TaxonomyNode},
};

/// Conventional path of the root node.
pub const ROOT_PATH: &str = "_root";

/// Default count-tree key and dependence tag for commentary.
pub const COMMENTARY: &str = "Commentary";

/// Default Hebrew title of the synthetic commentary node.
pub const COMMENTARY_HE_TITLE: &str = "מפרשים";

/// Options controlling tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Path given to the root node.
    pub root_path: String,
    /// Top-level key under which commentary counts are aggregated.
    pub commentary_key: String,
    /// Dependence tag identifying commentary branches in the taxonomy.
    pub commentary_tag: String,
    /// English title of the synthetic commentary node.
    pub commentary_title: String,
    /// Hebrew title of the synthetic commentary node.
    pub commentary_he_title: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            root_path: ROOT_PATH.to_string(),
            commentary_key: COMMENTARY.to_string(),
            commentary_tag: COMMENTARY.to_string(),
            commentary_title: COMMENTARY.to_string(),
            commentary_he_title: COMMENTARY_HE_TITLE.to_string(),
        }
    }
}

/// The output of a build: the node arena, its root, and the registry.
pub struct Built {
    /// All constructed nodes.
    pub arena: NodeArena,
    /// The root node.
    pub root: NodeId,
    /// Path and node-id keys of every non-root node.
    pub registry: HashMap<String, NodeId>,
}

/// Walks a taxonomy against a count tree.
pub struct TreeBuilder<'a> {
    /// Taxonomy being walked.
    taxonomy: &'a Taxonomy,
    /// Count tree produced by the aggregation merger.
    raw: &'a RawNode,
    /// Build options.
    options: &'a BuildOptions,
    /// Nodes constructed so far.
    arena: NodeArena,
    /// Path and node-id keys of constructed nodes.
    registry: HashMap<String, NodeId>,
    /// Segments of the branch currently being visited.
    path: Vec<String>,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder.
    pub fn new(taxonomy: &'a Taxonomy, raw: &'a RawNode, options: &'a BuildOptions) -> Self {
        Self {
            taxonomy,
            raw,
            options,
            arena: NodeArena::new(),
            registry: HashMap::new(),
            path: Vec::new(),
        }
    }

    /// Builds the tree.
    pub fn build(mut self) -> Built {
        let root = self.arena.insert(FilterNode::new(
            self.options.root_path.clone(),
            "",
            "",
            self.raw.doc_count(),
        ));

        let commentary = self.build_commentary();
        let mut commentary_placed = false;

        let taxonomy = self.taxonomy;
        for branch in taxonomy.roots() {
            if self.is_commentary_root(branch) {
                if let Some(node) = commentary
                    && !commentary_placed
                {
                    self.arena.attach(root, node);
                    commentary_placed = true;
                }
                continue;
            }
            if let Some(node) = self.walk(branch) {
                self.arena.attach(root, node);
            }
        }

        if let Some(node) = commentary
            && !commentary_placed
        {
            self.arena.attach(root, node);
        }

        trace!(
            nodes = self.arena.len(),
            registry = self.registry.len(),
            "built filter tree"
        );

        Built {
            arena: self.arena,
            root,
            registry: self.registry,
        }
    }

    /// Returns true for a top-level category named after the commentary key.
    fn is_commentary_root(&self, branch: &TaxonomyNode) -> bool {
        branch.is_category() && branch.name() == self.options.commentary_key
    }

    /// Returns true for a branch tagged as commentary on some work.
    fn is_commentary(&self, branch: &TaxonomyNode) -> bool {
        branch.is_tagged(&self.options.commentary_tag)
    }

    /// Creates the synthetic commentary node and gathers commentary branches.
    ///
    /// Returns `None` when the count tree has nothing under the commentary key.
    fn build_commentary(&mut self) -> Option<NodeId> {
        let key = self.options.commentary_key.clone();
        let raw = self.raw.child(&key)?;

        let node = self.arena.insert(FilterNode::new(
            key.clone(),
            self.options.commentary_title.clone(),
            self.options.commentary_he_title.clone(),
            raw.doc_count(),
        ));
        self.register(node);

        let taxonomy = self.taxonomy;
        let mut branches = Vec::new();
        for branch in taxonomy.roots() {
            if self.is_commentary_root(branch) {
                branches.extend(branch.contents());
            } else {
                self.collect_commentary(branch, &mut branches);
            }
        }

        self.path = vec![key];
        for branch in branches {
            self.walk_commentary(branch, node);
        }
        self.path.clear();

        Some(node)
    }

    /// Collects the topmost commentary-tagged branches below `branch`.
    fn collect_commentary(&self, branch: &'a TaxonomyNode, out: &mut Vec<&'a TaxonomyNode>) {
        if self.is_commentary(branch) {
            out.push(branch);
            return;
        }
        for child in branch.contents() {
            self.collect_commentary(child, out);
        }
    }

    /// Walks a commentary branch and attaches it below `parent`.
    ///
    /// If a node already exists at the branch's path, new descendants are
    /// grafted onto it instead of creating a duplicate.
    fn walk_commentary(&mut self, branch: &TaxonomyNode, parent: NodeId) {
        self.path.push(branch.name().to_string());
        let path = join_path(&self.path);

        let existing = self
            .registry
            .get(&path)
            .copied()
            .filter(|id| self.arena[*id].path == path);

        if let Some(existing) = existing {
            for child in branch.contents() {
                self.walk_commentary(child, existing);
            }
        } else if let Some(node) = self.walk_here(branch) {
            self.arena.attach(parent, node);
        }

        self.path.pop();
    }

    /// Walks a regular branch, skipping commentary-tagged subtrees.
    fn walk(&mut self, branch: &TaxonomyNode) -> Option<NodeId> {
        if self.is_commentary(branch) {
            return None;
        }
        self.path.push(branch.name().to_string());
        let node = self.walk_here(branch);
        self.path.pop();
        node
    }

    /// Builds the node for `branch` at the current path, with its subtree.
    ///
    /// Expects the branch's own segment to be on the path stack already.
    fn walk_here(&mut self, branch: &TaxonomyNode) -> Option<NodeId> {
        let path = join_path(&self.path);
        let Some(raw) = self.raw.lookup(&self.path) else {
            debug!(%path, "pruning taxonomy branch without results");
            return None;
        };
        let doc_count = raw.doc_count();

        let node = self.arena.insert(FilterNode::new(
            path,
            branch.name(),
            branch.he_name(),
            doc_count,
        ));
        self.register(node);

        for child in branch.contents() {
            let built = if self.in_commentary() {
                self.path.push(child.name().to_string());
                let built = self.walk_here(child);
                self.path.pop();
                built
            } else {
                self.walk(child)
            };
            if let Some(built) = built {
                self.arena.attach(node, built);
            }
        }

        Some(node)
    }

    /// Returns true while walking below the synthetic commentary node.
    fn in_commentary(&self) -> bool {
        self.path.first() == Some(&self.options.commentary_key)
    }

    /// Adds a node to the registry under its path and its node-id key.
    fn register(&mut self, id: NodeId) {
        let node = &self.arena[id];
        let path = node.path.clone();
        let node_id = node.id();
        self.registry.insert(path, id);
        self.registry.entry(node_id).or_insert(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Bucket, ingest};

    const NO_ORPHANS: &[&str] = &[];

    fn commentary(title: &str) -> TaxonomyNode {
        TaxonomyNode::work(title, "").with_dependence(COMMENTARY)
    }

    fn build(taxonomy: &Taxonomy, buckets: &[(&str, u64)]) -> Built {
        let buckets: Vec<Bucket> = buckets.iter().map(|(k, c)| Bucket::new(*k, *c)).collect();
        let raw = ingest(&buckets, NO_ORPHANS);
        TreeBuilder::new(taxonomy, &raw, &BuildOptions::default()).build()
    }

    fn top_level(built: &Built) -> Vec<&str> {
        built.arena[built.root]
            .children()
            .iter()
            .map(|id| built.arena[*id].path.as_str())
            .collect()
    }

    fn count(built: &Built, path: &str) -> u64 {
        built.arena[built.registry[path]].doc_count
    }

    /// A taxonomy with commentaries catalogued per base text.
    fn torah_commentary() -> Taxonomy {
        Taxonomy::new(vec![
            TaxonomyNode::category(
                "Tanakh",
                "תנ״ך",
                vec![TaxonomyNode::work("Genesis", "בראשית")],
            ),
            TaxonomyNode::category(
                "Torah Commentary",
                "",
                vec![
                    TaxonomyNode::category("Genesis", "", vec![commentary("Rashi")]),
                    TaxonomyNode::category("Exodus", "", vec![commentary("Ibn Ezra")]),
                ],
            ),
        ])
    }

    #[test]
    fn commentary_is_flattened_under_synthetic_node() {
        let built = build(
            &torah_commentary(),
            &[("Commentary/Rashi", 5), ("Commentary/Ibn Ezra", 3)],
        );

        assert_eq!(top_level(&built), vec!["Commentary"]);
        assert_eq!(count(&built, "Commentary"), 8);
        assert_eq!(count(&built, "Commentary/Rashi"), 5);
        assert_eq!(count(&built, "Commentary/Ibn Ezra"), 3);
        assert!(!built.registry.contains_key("Torah Commentary"));

        let commentary = &built.arena[built.registry["Commentary"]];
        assert_eq!(commentary.title, "Commentary");
        assert_eq!(commentary.he_title, COMMENTARY_HE_TITLE);
        assert_eq!(commentary.children().len(), 2);
    }

    #[test]
    fn no_commentary_counts_means_no_commentary_node() {
        let built = build(&torah_commentary(), &[("Tanakh/Genesis", 2)]);

        assert_eq!(top_level(&built), vec!["Tanakh"]);
        assert!(!built.registry.contains_key("Commentary"));
        assert!(!built.registry.contains_key("Commentary/Rashi"));
    }

    #[test]
    fn commentary_appended_after_regular_branches() {
        let built = build(
            &torah_commentary(),
            &[("Commentary/Rashi", 1), ("Tanakh/Genesis", 2)],
        );

        assert_eq!(top_level(&built), vec!["Tanakh", "Commentary"]);
        assert_eq!(built.arena[built.root].doc_count, 3);
    }

    #[test]
    fn commentary_takes_position_of_declared_category() {
        let taxonomy = Taxonomy::new(vec![
            TaxonomyNode::category("Tanakh", "", vec![TaxonomyNode::work("Genesis", "")]),
            TaxonomyNode::category("Commentary", "", vec![TaxonomyNode::work("Tosafot", "")]),
            TaxonomyNode::category("Talmud", "", vec![TaxonomyNode::work("Berakhot", "")]),
        ]);
        let built = build(
            &taxonomy,
            &[
                ("Tanakh/Genesis", 1),
                ("Commentary/Tosafot", 4),
                ("Talmud/Berakhot", 2),
            ],
        );

        assert_eq!(top_level(&built), vec!["Tanakh", "Commentary", "Talmud"]);
        assert_eq!(count(&built, "Commentary/Tosafot"), 4);
    }

    #[test]
    fn commentary_under_several_texts_is_merged() {
        let rashi_on = |book: &str| {
            TaxonomyNode::category(
                "Rashi",
                "",
                vec![TaxonomyNode::work(format!("Rashi on {book}"), "")],
            )
            .with_dependence(COMMENTARY)
        };
        let taxonomy = Taxonomy::new(vec![TaxonomyNode::category(
            "Torah Commentary",
            "",
            vec![
                TaxonomyNode::category("Genesis", "", vec![rashi_on("Genesis")]),
                TaxonomyNode::category("Exodus", "", vec![rashi_on("Exodus")]),
            ],
        )]);

        let built = build(
            &taxonomy,
            &[
                ("Commentary/Rashi/Rashi on Genesis", 2),
                ("Commentary/Rashi/Rashi on Exodus", 1),
            ],
        );

        let commentary = &built.arena[built.registry["Commentary"]];
        assert_eq!(commentary.children().len(), 1);

        let rashi = &built.arena[built.registry["Commentary/Rashi"]];
        let works: Vec<&str> = rashi
            .children()
            .iter()
            .map(|id| built.arena[*id].name())
            .collect();
        assert_eq!(works, vec!["Rashi on Genesis", "Rashi on Exodus"]);
        assert_eq!(rashi.doc_count, 3);
    }

    #[test]
    fn registry_holds_path_and_id_but_not_root() {
        let taxonomy = Taxonomy::new(vec![TaxonomyNode::category(
            "Mishnah",
            "",
            vec![TaxonomyNode::work("Seder Moed", "")],
        )]);
        let built = build(&taxonomy, &[("Mishnah/Seder Moed", 1)]);

        assert_eq!(built.registry.len(), 3);
        assert_eq!(
            built.registry["Mishnah-Seder_Moed"],
            built.registry["Mishnah/Seder Moed"]
        );
        assert!(!built.registry.contains_key(ROOT_PATH));
        assert_eq!(built.arena[built.root].path, ROOT_PATH);
    }

    #[test]
    fn parent_links_follow_tree_shape() {
        let built = build(&torah_commentary(), &[("Tanakh/Genesis", 2)]);
        let genesis = &built.arena[built.registry["Tanakh/Genesis"]];

        assert_eq!(genesis.parent(), Some(built.registry["Tanakh"]));
        assert_eq!(built.arena[built.registry["Tanakh"]].parent(), Some(built.root));
        assert!(built.arena[built.root].parent().is_none());
    }
}

//! Filter nodes and their selection state.
//!
//! A [`FilterNode`] is one facet of the tree: a taxonomy path, its display
//! titles in both languages, the number of search hits under it, and its
//! tri-state selection. Nodes live in a [`NodeArena`](crate::NodeArena) and
//! refer to each other by [`NodeId`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::path::{leaf_segment, node_id_for};

/// Index of a node within one tree instance.
///
/// Ids are only meaningful for the tree that issued them; a rebuild produces
/// a fresh arena with fresh ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Tri-state selection of a filter node.
///
/// A leaf is only ever `Selected` or `Unselected`. An inner node is
/// `Selected` when every child is, `Unselected` when no child is selected or
/// partial, and `Partial` otherwise.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// Neither this node nor any descendant is selected.
    #[default]
    Unselected,
    /// This node and its whole subtree are selected.
    Selected,
    /// Some, but not all, descendants are selected.
    Partial,
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unselected => "unselected",
            Self::Selected => "selected",
            Self::Partial => "partial",
        };
        f.write_str(name)
    }
}

/// Display language for node titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    /// English titles.
    #[default]
    #[serde(rename = "en")]
    English,
    /// Hebrew titles.
    #[serde(rename = "he")]
    Hebrew,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "he" | "hebrew" => Ok(Self::Hebrew),
            other => Err(format!("unknown language: {other} (expected en or he)")),
        }
    }
}

/// A single node of the filter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterNode {
    /// Full `/`-joined taxonomy path; the canonical key of the node.
    pub path: String,
    /// English display title.
    pub title: String,
    /// Hebrew display title.
    pub he_title: String,
    /// Search hits within this node's subtree.
    pub doc_count: u64,
    /// Parent node, or `None` for the root.
    #[serde(skip)]
    pub(crate) parent: Option<NodeId>,
    /// Children in taxonomy declaration order.
    #[serde(skip)]
    pub(crate) children: Vec<NodeId>,
    /// Current selection state.
    #[serde(rename = "selection")]
    pub(crate) state: SelectionState,
}

impl FilterNode {
    /// Creates a detached, unselected node.
    pub fn new(
        path: impl Into<String>,
        title: impl Into<String>,
        he_title: impl Into<String>,
        doc_count: u64,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            he_title: he_title.into(),
            doc_count,
            parent: None,
            children: Vec::new(),
            state: SelectionState::Unselected,
        }
    }

    /// Returns the node-id key (the path with identifier-unsafe characters replaced).
    pub fn id(&self) -> String {
        node_id_for(&self.path)
    }

    /// Returns the last segment of the path.
    pub fn name(&self) -> &str {
        leaf_segment(&self.path)
    }

    /// Returns the title for the given language.
    ///
    /// Falls back to the English title when no Hebrew title is known.
    pub fn title_in(&self, language: Language) -> &str {
        match language {
            Language::Hebrew if !self.he_title.is_empty() => &self.he_title,
            _ => &self.title,
        }
    }

    /// Returns the parent node, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the children in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the selection state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Returns true if this node is fully selected.
    pub fn is_selected(&self) -> bool {
        self.state == SelectionState::Selected
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

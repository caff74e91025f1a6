//! Node storage and tri-state selection propagation.
//!
//! The arena owns every node of one tree. Parent links are plain indices, so
//! ownership flows strictly from the arena to its nodes and a node never keeps
//! another alive.
//!
//! # Propagation
//!
//! Selecting or unselecting a node can cascade in two directions:
//!
//! - downward, forcing every descendant into the same state, and
//! - upward, asking the parent to re-derive its state from its children,
//!   which in turn asks its own parent, up to the root.
//!
//! A single toggle therefore costs the size of the toggled subtree plus the
//! depth of the node, never a scan of the whole tree.

use std::ops::Index;

use crate::node::{FilterNode, NodeId, SelectionState};

/// Owning storage for the nodes of a filter tree.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    /// Nodes indexed by `NodeId`.
    nodes: Vec<FilterNode>,
}

impl NodeArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a detached node and returns its id.
    pub fn insert(&mut self, node: FilterNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Appends `child` to the children of `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Returns the node with the given id, if it belongs to this arena.
    pub fn get(&self, id: NodeId) -> Option<&FilterNode> {
        self.nodes.get(id.0)
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over `from` and its descendants in pre-order.
    pub fn iter_preorder(&self, from: NodeId) -> PreorderIter<'_> {
        PreorderIter {
            arena: self,
            stack: vec![from],
        }
    }

    /// Marks a node `Selected`.
    ///
    /// With `propagate_to_children`, every descendant becomes `Selected` too.
    /// With `propagate_to_parent`, ancestors re-derive their state up to the root.
    pub fn set_selected(
        &mut self,
        id: NodeId,
        propagate_to_parent: bool,
        propagate_to_children: bool,
    ) {
        self.set_state(
            id,
            SelectionState::Selected,
            propagate_to_parent,
            propagate_to_children,
        );
    }

    /// Marks a node `Unselected`. The mirror image of [`Self::set_selected`].
    pub fn set_unselected(
        &mut self,
        id: NodeId,
        propagate_to_parent: bool,
        propagate_to_children: bool,
    ) {
        self.set_state(
            id,
            SelectionState::Unselected,
            propagate_to_parent,
            propagate_to_children,
        );
    }

    /// Marks a node `Partial` and re-derives its ancestors.
    ///
    /// Only ever the outcome of a derivation: children are left untouched,
    /// since they are the reason the node is partial.
    pub(crate) fn set_partial(&mut self, id: NodeId) {
        self.nodes[id.0].state = SelectionState::Partial;
        self.derive_parent(id);
    }

    /// Forces every node of the arena to `Unselected` without propagation.
    pub(crate) fn reset(&mut self) {
        for node in &mut self.nodes {
            node.state = SelectionState::Unselected;
        }
    }

    /// Shared body of `set_selected` and `set_unselected`.
    fn set_state(
        &mut self,
        id: NodeId,
        state: SelectionState,
        propagate_to_parent: bool,
        propagate_to_children: bool,
    ) {
        if propagate_to_children {
            let subtree: Vec<NodeId> = self.iter_preorder(id).map(|(id, _)| id).collect();
            for node in subtree {
                self.nodes[node.0].state = state;
            }
        } else {
            self.nodes[id.0].state = state;
        }

        if propagate_to_parent {
            self.derive_parent(id);
        }
    }

    /// Asks the parent of `id`, if any, to re-derive its state.
    fn derive_parent(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent {
            self.derive_state(parent);
        }
    }

    /// Re-derives a node's state from its children and continues upward.
    fn derive_state(&mut self, id: NodeId) {
        match self.derived_state(id) {
            SelectionState::Selected => self.set_selected(id, true, false),
            SelectionState::Unselected => self.set_unselected(id, true, false),
            SelectionState::Partial => self.set_partial(id),
        }
    }

    /// Computes the state implied by a node's children.
    ///
    /// A node without children keeps its own state, except that a leaf can
    /// never be partial.
    fn derived_state(&self, id: NodeId) -> SelectionState {
        let node = &self.nodes[id.0];
        let mut states = node.children.iter().map(|child| self.nodes[child.0].state);

        let Some(first) = states.next() else {
            return match node.state {
                SelectionState::Partial => SelectionState::Unselected,
                state => state,
            };
        };

        if first == SelectionState::Partial || states.any(|state| state != first) {
            SelectionState::Partial
        } else {
            first
        }
    }
}

impl Index<NodeId> for NodeArena {
    type Output = FilterNode;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}

/// Iterator for pre-order traversal of a subtree.
pub struct PreorderIter<'a> {
    /// Arena being traversed.
    arena: &'a NodeArena,
    /// Stack of nodes to visit (rightmost children pushed first).
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = (NodeId, &'a FilterNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.arena[id];
        // Push children in reverse order so leftmost child is processed first
        self.stack.extend(node.children.iter().rev());
        Some((id, node))
    }
}

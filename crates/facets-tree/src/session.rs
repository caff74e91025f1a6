//! Search sessions that discard stale aggregation responses.
//!
//! A caller issues a search, awaits its aggregation response, and rebuilds
//! the tree from it. When a second search is issued before the first
//! resolves, the first response must not be applied, or it would overwrite a
//! tree that already reflects the newer query. [`FilterSession`] enforces
//! this with tickets: only the response for the most recently issued ticket
//! rebuilds the tree.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{
    aggregate::Bucket,
    build::BuildOptions,
    taxonomy::Taxonomy,
    tree::FilterTree,
};

/// Identifies one outstanding search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

/// Outcome of handing a response to [`FilterSession::complete_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// The response was current and the tree was rebuilt.
    Applied,
    /// A newer search was issued; the response was discarded.
    Superseded,
}

/// Owns the tree for one search view and sequences its rebuilds.
#[derive(Debug, Clone)]
pub struct FilterSession {
    /// Shared, read-only taxonomy.
    taxonomy: Arc<Taxonomy>,
    /// Options for every rebuild.
    options: BuildOptions,
    /// The current tree.
    tree: FilterTree,
    /// Most recently issued ticket number.
    latest: u64,
}

impl FilterSession {
    /// Creates a session with an empty tree.
    pub fn new(taxonomy: Arc<Taxonomy>, options: BuildOptions) -> Self {
        Self {
            taxonomy,
            options,
            tree: FilterTree::default(),
            latest: 0,
        }
    }

    /// Creates a session whose selection starts from the given paths.
    ///
    /// No counts are known yet, so every path starts out as an orphan filter
    /// and is seeded into the first build.
    pub fn with_filters<S: AsRef<str>>(
        taxonomy: Arc<Taxonomy>,
        options: BuildOptions,
        paths: &[S],
    ) -> Self {
        let mut session = Self::new(taxonomy, options);
        session.tree.set_applied_filters(paths);
        session
    }

    /// Returns the current tree.
    pub fn tree(&self) -> &FilterTree {
        &self.tree
    }

    /// Returns the current tree for selection changes.
    pub fn tree_mut(&mut self) -> &mut FilterTree {
        &mut self.tree
    }

    /// Returns the taxonomy.
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Issues a ticket for a new search, superseding any outstanding one.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.latest += 1;
        trace!(ticket = self.latest, "search issued");
        SearchTicket(self.latest)
    }

    /// Returns true if `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Rebuilds the tree from a search response if its ticket is current.
    ///
    /// The current selection and orphan filters carry over into the new tree.
    pub fn complete_search(&mut self, ticket: SearchTicket, buckets: &[Bucket]) -> Ingest {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding superseded search response"
            );
            return Ingest::Superseded;
        }
        self.tree = self.tree.rebuild(&self.taxonomy, buckets, &self.options);
        Ingest::Applied
    }
}

//! Hierarchical faceted filter trees for category-based search refinement.
//!
//! A search backend reports hit counts per category path. This crate merges
//! those counts with a fixed taxonomy of categories and works into a
//! [`FilterTree`]: a tree of [`FilterNode`]s carrying counts, bilingual
//! titles, and tri-state selection that propagates up and down the tree.
//!
//! Selection persists across rebuilds as a list of applied filter paths,
//! which round-trips through a single URL parameter (see [`encode_filters`]).
//! Paths that a rebuild cannot place are kept as orphan filters rather than
//! dropped.
//!
//! ```
//! use facets_tree::{Bucket, FilterTree, Taxonomy, TaxonomyNode};
//!
//! let taxonomy = Taxonomy::new(vec![TaxonomyNode::category(
//!     "Tanakh",
//!     "תנ״ך",
//!     vec![TaxonomyNode::work("Genesis", "בראשית")],
//! )]);
//! let buckets = [Bucket::new("Tanakh/Genesis", 3)];
//!
//! let mut tree = FilterTree::build(&taxonomy, &buckets, &["Talmud"]);
//! tree.set_applied_filters(&["Tanakh/Genesis", "Talmud"]);
//!
//! assert_eq!(tree.get("Tanakh").unwrap().doc_count, 3);
//! assert_eq!(tree.applied_filters(), vec!["Tanakh", "Talmud"]);
//! ```

#![warn(missing_docs)]

mod aggregate;
mod arena;
mod build;
mod error;
mod node;
mod param;
mod path;
mod session;
mod taxonomy;
mod tree;

pub use aggregate::{Bucket, RawNode, ingest};
pub use arena::{NodeArena, PreorderIter};
pub use build::{BuildOptions, COMMENTARY, COMMENTARY_HE_TITLE, ROOT_PATH};
pub use error::InputError;
pub use node::{FilterNode, Language, NodeId, SelectionState};
pub use param::{
    DEFAULT_PARAM, FILTER_SEPARATOR, decode_filters, encode_filters, filters_from_query,
    filters_to_query,
};
pub use path::{SEGMENT_SEPARATOR, join_path, node_id_for, split_path};
pub use session::{FilterSession, Ingest, SearchTicket};
pub use taxonomy::{Category, Taxonomy, TaxonomyNode, Work, load_buckets, parse_buckets};
pub use tree::FilterTree;

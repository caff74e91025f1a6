//! Merging of search aggregation buckets into a nested count tree.
//!
//! A faceted search backend reports hits per category path as flat
//! `(path, count)` buckets. [`ingest`] folds those buckets, together with any
//! orphan filters carried over from the previous selection, into a [`RawNode`]
//! tree keyed by path segment, then fills in missing counts bottom-up.
//!
//! # Counting rules
//!
//! 1. Orphan paths are seeded first with an explicit count of zero, so they
//!    survive into the tree even when the current query has no hits for them.
//! 2. Buckets are overlaid on top. A bucket always wins over a seeded orphan,
//!    and a duplicate bucket overwrites the earlier one.
//! 3. A single post-order pass sets every node whose count is missing or zero
//!    to the sum of its children's counts.
//!
//! A node whose own count and whose children's counts are all zero stays at
//! zero; "no hits" and "not reported" are indistinguishable at this layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::path::split_path;

/// One `(path, count)` pair from a search backend's category aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// `/`-separated category path.
    pub key: String,
    /// Number of matching documents under this path.
    pub doc_count: u64,
}

impl Bucket {
    /// Creates a bucket.
    pub fn new(key: impl Into<String>, doc_count: u64) -> Self {
        Self {
            key: key.into(),
            doc_count,
        }
    }
}

/// A node of the intermediate count tree.
///
/// Only lives for the duration of one tree build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawNode {
    /// Explicit count, if a bucket or orphan seeded one.
    count: Option<u64>,
    /// Summed count after [`RawNode::summarize`].
    doc_count: u64,
    /// Child nodes keyed by path segment.
    children: BTreeMap<String, Self>,
}

impl RawNode {
    /// Returns the document count.
    pub fn doc_count(&self) -> u64 {
        self.doc_count
    }

    /// Returns true if a bucket (or orphan seed) supplied this node's count.
    pub fn has_explicit_count(&self) -> bool {
        self.count.is_some()
    }

    /// Returns the child for one path segment.
    pub fn child(&self, segment: &str) -> Option<&Self> {
        self.children.get(segment)
    }

    /// Returns the children keyed by segment.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Follows a sequence of segments from this node.
    ///
    /// Returns `None` as soon as a segment is missing.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Self> {
        segments
            .iter()
            .try_fold(self, |node, segment| node.child(segment.as_ref()))
    }

    /// Sets the explicit count at `path`, creating intermediate nodes.
    ///
    /// Returns false if the path has no segments.
    fn insert(&mut self, path: &str, count: u64) -> bool {
        let mut node = self;
        let mut depth = 0;
        for segment in split_path(path) {
            node = node.children.entry(segment.to_string()).or_default();
            depth += 1;
        }
        if depth == 0 {
            return false;
        }
        node.count = Some(count);
        node.doc_count = count;
        true
    }

    /// Fills in counts bottom-up and returns this node's final count.
    ///
    /// Sums saturate at `u64::MAX`.
    fn summarize(&mut self) -> u64 {
        let child_total = self
            .children
            .values_mut()
            .map(Self::summarize)
            .fold(0, u64::saturating_add);
        self.doc_count = match self.count {
            Some(count) if count > 0 => count,
            _ => child_total,
        };
        self.doc_count
    }
}

/// Builds the nested count tree from aggregation buckets and orphan filters.
///
/// The returned root corresponds to the whole corpus; its count is the total
/// over all top-level paths.
pub fn ingest<S: AsRef<str>>(buckets: &[Bucket], orphans: &[S]) -> RawNode {
    let mut root = RawNode::default();

    for orphan in orphans {
        root.insert(orphan.as_ref(), 0);
    }

    for bucket in buckets {
        if !root.insert(&bucket.key, bucket.doc_count) {
            debug!(key = %bucket.key, "skipping aggregation bucket without path segments");
        }
    }

    let total = root.summarize();
    debug!(
        buckets = buckets.len(),
        orphans = orphans.len(),
        total,
        "merged aggregation buckets"
    );
    root
}

//! The fixed corpus taxonomy and loaders for search inputs.
//!
//! The taxonomy is an ordered forest of categories and works, supplied once per
//! tree build and never mutated:
//!
//! ```json
//! [
//!   { "category": "Tanakh", "heCategory": "תנ״ך", "contents": [
//!       { "title": "Genesis", "heTitle": "בראשית" }
//!   ]},
//!   { "category": "Torah Commentary", "heCategory": "מפרשי תורה", "contents": [
//!       { "title": "Rashi", "heTitle": "רש״י", "dependence": "Commentary" }
//!   ]}
//! ]
//! ```
//!
//! A branch whose `dependence` matches the configured commentary tag is a
//! commentary on some base text; the tree builder presents those under one
//! flat commentary facet.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{InputError, aggregate::Bucket};

/// The ordered forest of top-level taxonomy branches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    /// Top-level branches in declaration order.
    roots: Vec<TaxonomyNode>,
}

impl Taxonomy {
    /// Creates a taxonomy from its top-level branches.
    pub fn new(roots: Vec<TaxonomyNode>) -> Self {
        Self { roots }
    }

    /// Returns the top-level branches.
    pub fn roots(&self) -> &[TaxonomyNode] {
        &self.roots
    }

    /// Parses a taxonomy from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(InputError::Taxonomy)
    }

    /// Reads and parses a taxonomy JSON file.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        Self::from_json_str(&read_file(path)?)
    }
}

/// A taxonomy branch: either a category with nested contents or a work leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaxonomyNode {
    /// A category grouping further categories and works.
    Category(Category),
    /// A single work.
    Work(Work),
}

/// A taxonomy category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// English category name; also the path segment.
    pub category: String,
    /// Hebrew category name.
    #[serde(default)]
    pub he_category: String,
    /// Nested branches in declaration order.
    #[serde(default)]
    pub contents: Vec<TaxonomyNode>,
    /// Dependence tag, e.g. `"Commentary"` for commentary collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependence: Option<String>,
}

/// A taxonomy work (book).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    /// English title; also the path segment.
    pub title: String,
    /// Hebrew title.
    #[serde(default)]
    pub he_title: String,
    /// Dependence tag, e.g. `"Commentary"` for a commentary on a base text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependence: Option<String>,
}

impl TaxonomyNode {
    /// Creates a category branch.
    pub fn category(
        name: impl Into<String>,
        he_name: impl Into<String>,
        contents: Vec<Self>,
    ) -> Self {
        Self::Category(Category {
            category: name.into(),
            he_category: he_name.into(),
            contents,
            dependence: None,
        })
    }

    /// Creates a work leaf.
    pub fn work(title: impl Into<String>, he_title: impl Into<String>) -> Self {
        Self::Work(Work {
            title: title.into(),
            he_title: he_title.into(),
            dependence: None,
        })
    }

    /// Returns this branch with its dependence tag set.
    pub fn with_dependence(mut self, tag: impl Into<String>) -> Self {
        let tag = Some(tag.into());
        match &mut self {
            Self::Category(category) => category.dependence = tag,
            Self::Work(work) => work.dependence = tag,
        }
        self
    }

    /// Returns the English name, which is also the path segment.
    pub fn name(&self) -> &str {
        match self {
            Self::Category(category) => &category.category,
            Self::Work(work) => &work.title,
        }
    }

    /// Returns the Hebrew name.
    pub fn he_name(&self) -> &str {
        match self {
            Self::Category(category) => &category.he_category,
            Self::Work(work) => &work.he_title,
        }
    }

    /// Returns nested branches; empty for works.
    pub fn contents(&self) -> &[Self] {
        match self {
            Self::Category(category) => &category.contents,
            Self::Work(_) => &[],
        }
    }

    /// Returns the dependence tag, if any.
    pub fn dependence(&self) -> Option<&str> {
        match self {
            Self::Category(category) => category.dependence.as_deref(),
            Self::Work(work) => work.dependence.as_deref(),
        }
    }

    /// Returns true if this branch is tagged with the given dependence.
    pub fn is_tagged(&self, tag: &str) -> bool {
        self.dependence() == Some(tag)
    }

    /// Returns true for category branches.
    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category(_))
    }
}

/// Aggregation payloads accepted by [`parse_buckets`].
#[derive(Deserialize)]
#[serde(untagged)]
enum BucketPayload {
    /// A bare bucket array.
    List(Vec<Bucket>),
    /// An aggregation object with a `buckets` field.
    Aggregation {
        /// The bucket array.
        buckets: Vec<Bucket>,
    },
}

/// Parses aggregation buckets from JSON.
///
/// Accepts either a bare array of `{key, doc_count}` objects or an object
/// carrying such an array under `buckets`.
pub fn parse_buckets(json: &str) -> Result<Vec<Bucket>, InputError> {
    let payload: BucketPayload = serde_json::from_str(json).map_err(InputError::Aggregation)?;
    Ok(match payload {
        BucketPayload::List(buckets) | BucketPayload::Aggregation { buckets } => buckets,
    })
}

/// Reads and parses an aggregation JSON file.
pub fn load_buckets(path: &Path) -> Result<Vec<Bucket>, InputError> {
    parse_buckets(&read_file(path)?)
}

/// Reads a file to a string, attaching the path to any error.
fn read_file(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

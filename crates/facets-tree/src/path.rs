//! Filter path utilities.
//!
//! A filter path is a `/`-joined sequence of taxonomy segment names, such as
//! `Mishnah/Seder Moed/Mishnah Shabbat`. The last segment is the node's own
//! name; every proper prefix names an ancestor.

/// Separator between segments of a filter path.
pub const SEGMENT_SEPARATOR: char = '/';

/// Splits a filter path into its segments.
///
/// Empty segments are dropped, so `/Tanakh//Torah/` yields `["Tanakh", "Torah"]`.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEGMENT_SEPARATOR)
        .filter(|segment| !segment.is_empty())
}

/// Joins segments into a filter path.
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut path = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            path.push(SEGMENT_SEPARATOR);
        }
        path.push_str(segment.as_ref());
    }
    path
}

/// Returns the last segment of a filter path.
pub fn leaf_segment(path: &str) -> &str {
    split_path(path).last().unwrap_or("")
}

/// Derives the node-id key for a filter path.
///
/// Separators and punctuation that cannot appear in an element identifier
/// (`/ ' , ( )`) become `-`, and spaces become `_`. The mapping is not
/// injective, so the path remains the canonical key.
pub fn node_id_for(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            '/' | '\'' | ',' | '(' | ')' => '-',
            ' ' => '_',
            other => other,
        })
        .collect()
}

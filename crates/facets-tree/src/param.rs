//! Encoding of applied filters as a single URL query parameter.
//!
//! Selection state survives page loads as one parameter whose value is the
//! applied filter paths joined with `|`, for example
//! `filters=Tanakh|Mishnah/Seder Moed`. Functions here work on the decoded
//! form; percent-encoding is the caller's concern.

/// Separator between filter paths in the parameter value.
pub const FILTER_SEPARATOR: char = '|';

/// Default query parameter name.
pub const DEFAULT_PARAM: &str = "filters";

/// Joins filter paths into a parameter value.
pub fn encode_filters<S: AsRef<str>>(paths: &[S]) -> String {
    let mut value = String::new();
    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            value.push(FILTER_SEPARATOR);
        }
        value.push_str(path.as_ref());
    }
    value
}

/// Splits a parameter value into filter paths, dropping empty entries.
pub fn decode_filters(value: &str) -> Vec<String> {
    value
        .split(FILTER_SEPARATOR)
        .filter(|path| !path.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts the filter paths carried by `name` in a decoded query string.
///
/// Accepts the query with or without a leading `?`. The first matching pair
/// wins; a missing parameter yields no filters.
pub fn filters_from_query(query: &str, name: &str) -> Vec<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == name).then_some(value)
        })
        .map(decode_filters)
        .unwrap_or_default()
}

/// Renders `name=value` for the given filter paths.
///
/// Returns an empty string when there are no filters, so callers can omit
/// the parameter entirely.
pub fn filters_to_query<S: AsRef<str>>(name: &str, paths: &[S]) -> String {
    if paths.is_empty() {
        return String::new();
    }
    format!("{name}={}", encode_filters(paths))
}

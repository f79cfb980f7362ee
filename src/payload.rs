// src/payload.rs

//! Safe path lookup over untyped webhook payloads.
//!
//! GitHub delivers deeply nested JSON bodies where almost every field is
//! optional. All formatters read fields through these helpers so that a
//! missing key, a `null`, or a value of the wrong shape degrades to a
//! placeholder instead of failing the request.

use serde_json::Value;

/// Resolves a dotted key path (e.g. `"repository.html_url"`) against a JSON
/// tree. Returns `None` as soon as a segment is missing or the current node
/// is not an object.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Returns the string at `path`, or `default` when the path is missing,
/// `null`, or not a string.
pub fn str_or(root: &Value, path: &str, default: &str) -> String {
    lookup(root, path)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

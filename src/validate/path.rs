use serde_json::Value;

/// Walks a dot-separated path through objects and arrays.
///
/// Numeric segments index into arrays. An empty path returns `value`.
#[must_use]
pub fn lookup_path<'value>(value: &'value Value, path: &str) -> Option<&'value Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.')
        .try_fold(value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => None,
        })
}

/// Like [`lookup_path`], but a JSON `null` counts as missing.
#[must_use]
pub fn present_path<'value>(value: &'value Value, path: &str) -> Option<&'value Value> {
    lookup_path(value, path).filter(|found| !found.is_null())
}

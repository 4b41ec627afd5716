//! Text encoding of successful tool payloads.

use serde_json::{Map, Value};

/// Recursively drop object properties whose value is `null`.
///
/// Arrays keep their length: a `null` element stays in place as the absent
/// marker rather than being removed, so positions remain meaningful.
pub fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect();
            // Key order must not depend on whether serde_json preserves insertion order.
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect::<Map<String, Value>>())
        }
        scalar => scalar,
    }
}

/// Compact, deterministic text for `value` with null properties removed.
pub fn format_data(value: Value) -> String {
    // Serializing a `Value` cannot fail: keys are always strings.
    serde_json::to_string(&strip_nulls(value)).unwrap_or_default()
}

use serde_json::Value;

/// A value is empty when it is null, a blank string, `[]` or `{}`.
///
/// Empty values never become fields.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Read the value at a dotted path. Missing keys and non-object
/// intermediates yield `None`.
#[must_use]
pub fn value_at_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| current.as_object()?.get(segment))
}

/// The part of a product that goes under review: its `snapshot` object when
/// present, otherwise the product itself.
#[must_use]
pub fn review_record(product: &Value) -> &Value {
    match product.get("snapshot") {
        Some(snapshot @ Value::Object(map)) if !map.is_empty() => snapshot,
        _ => product,
    }
}

//! Lenient field access on loosely-typed backend JSON.
//!
//! The backend makes no promises about element shape, so extraction never
//! fails: a missing or oddly-typed field simply reads as absent.

use serde_json::Value;

/// First field among `keys` that is present and not `null`.
pub fn first_present<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let obj = value.as_object()?;
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// Render a scalar field as text. Strings pass through; numbers and booleans
/// are formatted. Objects, arrays and `null` read as absent.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `scalar_text` of the named field.
pub fn text_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(scalar_text)
}

/// Like `text_field` but an empty string reads as absent.
pub fn non_empty_text_field(value: &Value, key: &str) -> Option<String> {
    text_field(value, key).filter(|s| !s.is_empty())
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

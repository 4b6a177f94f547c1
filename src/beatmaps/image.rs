//! Cover image extraction from the backend's polymorphic `image` field.
//!
//! Accepted shapes, checked in this order:
//! 1. falsy (`null`, `""`, `0`, `false`) -> no image
//! 2. string -> the URL itself
//! 3. non-empty array -> its first element when that is a string
//! 4. object -> its `list`, `urls` or `images` member (string or array as
//!    above); failing that, the first string value (or first element of the
//!    first string-led array) in JavaScript key enumeration order
//!
//! Everything else degrades to "no image".

use serde_json::{Map, Value};

use crate::api::fields::is_truthy;

const NAMED_KEYS: [&str; 3] = ["list", "urls", "images"];

pub fn normalize_image(field: &Value) -> Option<String> {
    if !is_truthy(field) {
        return None;
    }

    let url = match field {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if !items.is_empty() => leading_string(items),
        Value::Array(_) => None,
        Value::Object(obj) => from_object(obj),
        _ => None,
    };

    url.filter(|s| !s.is_empty())
}

fn leading_string(items: &[Value]) -> Option<String> {
    match items.first() {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn from_object(obj: &Map<String, Value>) -> Option<String> {
    let named = NAMED_KEYS
        .iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null());

    match named {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Array(items)) if !items.is_empty() => return leading_string(items),
        _ => {}
    }

    for value in enumeration_order(obj) {
        match value {
            Value::String(s) => return Some(s.clone()),
            Value::Array(items) => {
                if let Some(s) = leading_string(items) {
                    return Some(s);
                }
            }
            _ => {}
        }
    }
    None
}

/// Values in the order a JavaScript `for..in` visits them: array-index keys
/// ascending, then the remaining keys in insertion order.
fn enumeration_order(obj: &Map<String, Value>) -> Vec<&Value> {
    let mut indexed: Vec<(u32, &Value)> = Vec::new();
    let mut named: Vec<&Value> = Vec::new();

    for (k, v) in obj {
        match array_index(k) {
            Some(i) => indexed.push((i, v)),
            None => named.push(v),
        }
    }

    indexed.sort_by_key(|(i, _)| *i);
    indexed.into_iter().map(|(_, v)| v).chain(named).collect()
}

/// Canonical array index (`"0"`, `"17"`, not `"07"` or `"-1"`).
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|i| *i != u32::MAX)
}

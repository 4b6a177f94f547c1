use serde_json::Value;

/// Parse a response body. Invalid JSON is logged and read as `null`.
pub fn parse_payload(text: &str, endpoint: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            log::error!("failed to parse JSON from {endpoint}: {e}");
            Value::Null
        }
    }
}

/// The payload's elements if it is an array; anything else is logged and
/// read as an empty list.
pub fn ensure_array(payload: Value, endpoint: &str) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        other => {
            log::warn!(
                "unexpected {endpoint} response (expected array): {}",
                preview(&other)
            );
            Vec::new()
        }
    }
}

fn preview(value: &Value) -> String {
    let mut text = value.to_string();
    if text.len() > 200 {
        let mut cut = 200;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push('…');
    }
    text
}

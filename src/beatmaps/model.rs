use serde_json::Value;

use crate::api::fields::{first_present, is_truthy, non_empty_text_field, scalar_text, text_field};

use super::image::normalize_image;

/// One rhythm-game map returned by `/osu_beatmaps`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Beatmap {
    pub id: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub creator: Option<String>,
    pub difficulty: Option<String>,
    /// Raw cover field (`image`, else `cover_url`, else `list`); see `cover`.
    pub image: Value,
    pub preview_url: Option<String>,
    pub download_url: Option<String>,
    pub play_count: f64,
    pub url: Option<String>,
    /// `set_id`, else `beatmapset_id`, else `id`, kept only when truthy.
    pub set_id: Option<String>,
}

impl Beatmap {
    /// Build a beatmap from one element of the `/osu_beatmaps` array.
    pub fn from_value(value: &Value) -> Self {
        let difficulty = value
            .get("difficulty")
            .filter(|v| is_truthy(v))
            .and_then(scalar_text);

        let set_id = first_present(value, &["set_id", "beatmapset_id", "id"])
            .filter(|v| is_truthy(v))
            .and_then(scalar_text);

        Self {
            id: text_field(value, "id"),
            title: text_field(value, "title"),
            artist: text_field(value, "artist"),
            creator: text_field(value, "creator"),
            difficulty,
            image: first_present(value, &["image", "cover_url", "list"])
                .cloned()
                .unwrap_or(Value::Null),
            preview_url: non_empty_text_field(value, "preview_url"),
            download_url: non_empty_text_field(value, "download_url"),
            play_count: value
                .get("play_count")
                .map(coerce_play_count)
                .unwrap_or(0.0),
            url: non_empty_text_field(value, "url"),
            set_id,
        }
    }

    /// Resolved cover URL, `None` renders the placeholder.
    pub fn cover(&self) -> Option<String> {
        normalize_image(&self.image)
    }

    pub fn key(&self) -> String {
        if let Some(id) = &self.id {
            return id.clone();
        }
        if let Some(url) = &self.url {
            return url.clone();
        }
        format!(
            "{}-{}",
            self.title.as_deref().unwrap_or(""),
            self.creator.as_deref().unwrap_or("")
        )
    }
}

/// Numeric play count, read the way JavaScript's `Number()` reads a value:
/// numbers as-is, booleans 1/0, `null` 0, numeric strings (decimal, exponent,
/// `0x`/`0o`/`0b`) parsed, and a one-element array read through its element.
/// Anything else, and any non-finite result, counts as 0.
pub fn coerce_play_count(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        other => array_or_text_number(other),
    };

    if n.is_finite() {
        // Fold -0.0 into 0.0 so equal counts compare equal.
        n + 0.0
    } else {
        0.0
    }
}

/// `Number()` of a value that converts through its string form.
fn array_or_text_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => number_from_text(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [only] => array_or_text_number(only),
            _ => f64::NAN,
        },
        // `[true]` stringifies to "true"; objects to "[object Object]".
        Value::Bool(_) | Value::Object(_) => f64::NAN,
    }
}

fn number_from_text(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = t.strip_prefix(prefix) {
            return u128::from_str_radix(digits, radix)
                .ok()
                .filter(|_| !digits.starts_with('+'))
                .map_or(f64::NAN, |v| v as f64);
        }
    }

    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust also accepts "inf", "nan" and friends; JavaScript does not.
    if t.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

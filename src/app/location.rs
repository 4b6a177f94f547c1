//! Screen locations.
//!
//! Navigation between screens is expressed as a path plus query string, the
//! same shape a browser URL would have. The query string is the only state
//! that crosses from one screen to the next.

use std::borrow::Cow;
use std::fmt;

pub const SEARCH_PATH: &str = "/";
pub const BEATMAPS_PATH: &str = "/osu_beatmaps";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Location {
    pub fn search() -> Self {
        Self {
            path: SEARCH_PATH.to_string(),
            params: Vec::new(),
        }
    }

    /// Location of the beatmap screen for a chosen track. Values are passed
    /// through as-is, including empty strings.
    pub fn beatmaps(title: &str, artist: &str) -> Self {
        Self {
            path: BEATMAPS_PATH.to_string(),
            params: vec![
                ("title".to_string(), title.to_string()),
                ("artist".to_string(), artist.to_string()),
            ],
        }
    }

    /// Parse `path?key=value&...`. Malformed pairs degrade to empty values.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (path, query) = match input.split_once('?') {
            Some((p, q)) => (p, q),
            None => (input, ""),
        };
        let path = if path.is_empty() { SEARCH_PATH } else { path };

        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(k), decode_component(v))
            })
            .collect();

        Self {
            path: path.to_string(),
            params,
        }
    }

    /// First value for `key`, like `URLSearchParams.get`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_beatmaps(&self) -> bool {
        self.path.trim_end_matches('/') == BEATMAPS_PATH
    }

    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query_string())
        }
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => spaced,
    }
}

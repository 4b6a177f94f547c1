use serde_json::Value;

use crate::api::fields::{non_empty_text_field, text_field};

/// A song candidate returned by `/search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub artist: Option<String>,
    pub image: Option<String>,
    pub preview: Option<String>,
    pub spotify_url: Option<String>,
}

impl Track {
    /// Build a track from one element of the `/search` array.
    ///
    /// Element shape is not validated: a non-object element becomes an empty track.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: text_field(value, "id"),
            name: text_field(value, "name").unwrap_or_default(),
            artist: text_field(value, "artist"),
            image: non_empty_text_field(value, "image"),
            preview: non_empty_text_field(value, "preview"),
            spotify_url: non_empty_text_field(value, "spotifyUrl"),
        }
    }

    /// Stable list key: `id`, or `name-artist` when the backend sent none.
    pub fn key(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("{}-{}", self.name, self.artist.as_deref().unwrap_or("")),
        }
    }

    pub fn artist_or_unknown(&self) -> &str {
        self.artist.as_deref().unwrap_or("Unknown artist")
    }

    pub fn display(&self) -> String {
        format!("{} - {}", self.name, self.artist_or_unknown())
    }
}

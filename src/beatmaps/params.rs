use crate::app::Location;

/// Title/artist read from the beatmap screen's location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeatmapParams {
    pub title: Option<String>,
    pub artist: Option<String>,
}

/// A complete request for `/osu_beatmaps`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatmapQuery {
    pub title: String,
    pub artist: String,
}

impl BeatmapParams {
    /// `title` falls back to `track` then `trackTitle`; `artist` to
    /// `trackArtist`. Empty values count as missing.
    pub fn from_location(location: &Location) -> Self {
        let pick = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| location.get(k))
                .find(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            title: pick(&["title", "track", "trackTitle"]),
            artist: pick(&["artist", "trackArtist"]),
        }
    }

    /// The fetch runs only when both title and artist are known.
    pub fn query(&self) -> Option<BeatmapQuery> {
        match (&self.title, &self.artist) {
            (Some(title), Some(artist)) => Some(BeatmapQuery {
                title: title.clone(),
                artist: artist.clone(),
            }),
            _ => None,
        }
    }
}

//! Beatmap results screen: fetch by title/artist, rank by play count,
//! and make sense of the loosely-typed cover field.

mod image;
mod model;
mod params;
mod rank;
mod screen;

pub use model::Beatmap;
pub use params::BeatmapQuery;
pub use screen::{BeatmapOutcome, BeatmapScreen};

//! Search screen: text query against `/search` and the candidate track list.

mod model;
mod screen;

pub use model::Track;
pub use screen::{SearchOutcome, SearchScreen};

#[cfg(test)]
mod tests;

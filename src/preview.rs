//! Preview playback: one audible preview at a time, driven by an audio thread.

mod player;
mod slot;
mod thread;
mod types;

pub use player::PreviewPlayer;
pub use types::PreviewInfo;

#[cfg(test)]
mod tests;

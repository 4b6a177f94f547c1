//! Preview playback commands and the shared state the UI reads.

use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub enum PreviewCmd {
    /// Stop whatever is playing, then fetch and play `url` under `id`.
    Play { id: String, url: String },
    /// Stop playback immediately and drop any download in flight.
    Stop,
    /// Stop and shut the preview thread down.
    Quit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Runtime preview information shared with the UI.
pub struct PreviewInfo {
    /// Id of the item whose preview is audible, if any.
    pub playing_id: Option<String>,
    /// Id whose preview is being downloaded.
    pub loading_id: Option<String>,
    /// Why the last play request produced no sound.
    pub last_error: Option<String>,
}

impl PreviewInfo {
    /// True while `id` is audible or still downloading.
    pub fn is_busy_with(&self, id: &str) -> bool {
        self.playing_id.as_deref() == Some(id) || self.loading_id.as_deref() == Some(id)
    }
}

pub type PreviewHandle = Arc<Mutex<PreviewInfo>>;

//! The single preview voice.
//!
//! `PreviewSlot` owns at most one playing voice. Starting a new one always
//! stops the previous voice first, so two previews are never audible at once.
//! Downloads are tracked with a `RequestSlot`: a voice is only installed for
//! the most recent load that was neither superseded nor stopped.

use crate::request::{RequestSlot, Ticket};

/// Something that can be heard and stopped.
pub trait Voice {
    fn stop(&mut self);
    /// True once playback ran out on its own.
    fn is_finished(&self) -> bool;
}

impl Voice for rodio::Sink {
    fn stop(&mut self) {
        rodio::Sink::stop(self);
    }

    fn is_finished(&self) -> bool {
        self.empty()
    }
}

/// What became of a finished download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Started,
    Failed(String),
    /// Superseded or stopped while downloading; nothing was built.
    Stale,
}

pub struct PreviewSlot<V: Voice> {
    current: Option<(String, V)>,
    loading: RequestSlot,
}

impl<V: Voice> Default for PreviewSlot<V> {
    fn default() -> Self {
        Self {
            current: None,
            loading: RequestSlot::new(),
        }
    }
}

impl<V: Voice> PreviewSlot<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the current voice (if any), then install `voice` under `id`.
    pub fn start(&mut self, id: String, voice: V) {
        self.stop();
        self.current = Some((id, voice));
    }

    /// Stop the current voice and reserve the slot for a new download.
    pub fn begin_load(&mut self) -> Ticket {
        self.stop();
        self.loading.begin()
    }

    /// Install the voice for a finished download if `ticket` is still the
    /// live load. `build` runs only in that case.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        id: String,
        build: impl FnOnce() -> Result<V, String>,
    ) -> LoadOutcome {
        if !self.loading.finish(ticket) {
            return LoadOutcome::Stale;
        }
        match build() {
            Ok(voice) => {
                self.start(id, voice);
                LoadOutcome::Started
            }
            Err(msg) => LoadOutcome::Failed(msg),
        }
    }

    /// Silence the current voice and abandon any download in flight.
    pub fn stop(&mut self) {
        self.loading.cancel();
        if let Some((id, mut voice)) = self.current.take() {
            voice.stop();
            log::debug!("preview {id} stopped");
        }
    }

    pub fn playing_id(&self) -> Option<&str> {
        self.current.as_ref().map(|(id, _)| id.as_str())
    }

    /// Drop a voice that finished by itself and return its id.
    pub fn reap(&mut self) -> Option<String> {
        let finished = self
            .current
            .as_ref()
            .is_some_and(|(_, voice)| voice.is_finished());
        if finished {
            self.current.take().map(|(id, _)| id)
        } else {
            None
        }
    }
}

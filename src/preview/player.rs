use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::api::ApiClient;
use crate::config::AudioSettings;

use super::thread::spawn_preview_thread;
use super::types::{PreviewCmd, PreviewHandle, PreviewInfo};

pub struct PreviewPlayer {
    tx: Sender<PreviewCmd>,
    info: PreviewHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl PreviewPlayer {
    pub fn new(client: ApiClient, audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<PreviewCmd>();
        let info: PreviewHandle = Arc::new(Mutex::new(PreviewInfo::default()));

        let handle = spawn_preview_thread(client, rx, info.clone(), audio_settings);

        Self {
            tx,
            info,
            join: Mutex::new(Some(handle)),
        }
    }

    pub fn handle(&self) -> PreviewHandle {
        self.info.clone()
    }

    pub fn play(&self, id: String, url: String) {
        let _ = self.tx.send(PreviewCmd::Play { id, url });
    }

    pub fn stop(&self) {
        let _ = self.tx.send(PreviewCmd::Stop);
    }

    /// Play `id` unless it is already playing or loading, in which case stop it.
    pub fn toggle(&self, id: &str, url: &str) {
        let busy_with_id = self
            .info
            .lock()
            .ok()
            .is_some_and(|i| i.is_busy_with(id));

        if busy_with_id {
            self.stop();
        } else {
            self.play(id.to_string(), url.to_string());
        }
    }

    pub fn quit(&self) {
        let _ = self.tx.send(PreviewCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

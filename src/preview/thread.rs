use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::api::ApiClient;
use crate::config::AudioSettings;
use crate::request::Ticket;

use super::slot::{LoadOutcome, PreviewSlot};
use super::types::{PreviewCmd, PreviewHandle, PreviewInfo};

const POLL: Duration = Duration::from_millis(50);

/// A preview download handed back by its worker.
struct Download {
    ticket: Ticket,
    id: String,
    bytes: Result<Vec<u8>, String>,
}

pub(super) fn spawn_preview_thread(
    client: ApiClient,
    rx: Receiver<PreviewCmd>,
    info: PreviewHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when OutputStream is dropped, which would
                // scribble over the TUI.
                s.log_on_drop(false);
                Some(s)
            }
            Err(e) => {
                log::error!("no audio output device, previews disabled: {e}");
                None
            }
        };

        let mut slot: PreviewSlot<Sink> = PreviewSlot::new();
        let (done_tx, done_rx) = mpsc::channel::<Download>();

        loop {
            while let Ok(done) = done_rx.try_recv() {
                let Download { ticket, id, bytes } = done;
                let outcome = slot.finish_load(ticket, id.clone(), || {
                    let stream = stream.as_ref().ok_or("no audio output device")?;
                    build_sink(stream, bytes?, audio_settings.volume)
                });
                match outcome {
                    LoadOutcome::Started => {
                        log::info!("previewing {id}");
                        publish(&info, |i| {
                            i.playing_id = Some(id.clone());
                            i.loading_id = None;
                        });
                    }
                    LoadOutcome::Failed(msg) => {
                        log::warn!("preview {id} unavailable: {msg}");
                        publish(&info, |i| {
                            i.loading_id = None;
                            i.last_error = Some(msg);
                        });
                    }
                    LoadOutcome::Stale => {
                        log::debug!("discarding download for preview {id}");
                    }
                }
            }

            match rx.recv_timeout(POLL) {
                Ok(cmd) => match cmd {
                    PreviewCmd::Play { id, url } => {
                        if let Some(prev) = slot.playing_id() {
                            log::debug!("preview {prev} replaced by {id}");
                        }
                        if stream.is_none() {
                            slot.stop();
                            publish(&info, |i| {
                                i.playing_id = None;
                                i.loading_id = None;
                                i.last_error = Some("no audio output device".to_string());
                            });
                            continue;
                        }

                        let ticket = slot.begin_load();
                        publish(&info, |i| {
                            i.playing_id = None;
                            i.loading_id = Some(id.clone());
                            i.last_error = None;
                        });
                        spawn_download(client.clone(), ticket, id, url, done_tx.clone());
                    }

                    PreviewCmd::Stop => {
                        slot.stop();
                        publish(&info, |i| {
                            i.playing_id = None;
                            i.loading_id = None;
                        });
                    }

                    PreviewCmd::Quit => {
                        slot.stop();
                        publish(&info, |i| *i = PreviewInfo::default());
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Natural end of a preview resets the playing id.
                    if let Some(id) = slot.reap() {
                        log::debug!("preview {id} finished");
                        publish(&info, |i| {
                            if i.playing_id.as_deref() == Some(id.as_str()) {
                                i.playing_id = None;
                            }
                        });
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    slot.stop();
                    break;
                }
            }
        }
    })
}

/// Fetch the preview bytes on a worker; the command loop stays responsive.
fn spawn_download(client: ApiClient, ticket: Ticket, id: String, url: String, tx: Sender<Download>) {
    thread::spawn(move || {
        let bytes = client.fetch_bytes(&url).map_err(|e| e.to_string());
        // The receiver is gone once the preview thread has quit.
        let _ = tx.send(Download { ticket, id, bytes });
    });
}

fn publish(info: &PreviewHandle, update: impl FnOnce(&mut PreviewInfo)) {
    if let Ok(mut guard) = info.lock() {
        update(&mut guard);
    }
}

/// Decode downloaded preview bytes into a playing `Sink`.
fn build_sink(stream: &OutputStream, bytes: Vec<u8>, volume: f32) -> Result<Sink, String> {
    let source =
        Decoder::new(Cursor::new(bytes)).map_err(|e| format!("cannot decode preview: {e}"))?;

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.play();
    Ok(sink)
}

use std::sync::mpsc::Sender;
use std::thread;

use crate::api::ApiClient;
use crate::app::{Dispatch, FetchEvent};

/// Run `dispatch` on a worker thread and post the outcome to `tx`.
///
/// Workers are never interrupted; a cancelled request still completes, and
/// its outcome is discarded by the screen's `RequestSlot`.
pub fn spawn(client: &ApiClient, dispatch: Dispatch, tx: &Sender<FetchEvent>) {
    let client = client.clone();
    let tx = tx.clone();

    thread::spawn(move || {
        let event = match dispatch {
            Dispatch::Search { ticket, query } => FetchEvent::Search {
                ticket,
                outcome: client.fetch_search(&query),
            },
            Dispatch::Beatmaps { ticket, query } => FetchEvent::Beatmaps {
                ticket,
                outcome: client.fetch_beatmaps(&query),
            },
        };
        // The receiver is gone once the app has shut down.
        let _ = tx.send(event);
    });
}

use super::slot::{LoadOutcome, PreviewSlot, Voice};
use super::types::PreviewInfo;
use std::cell::Cell;
use std::rc::Rc;

/// Test voice that records whether it was stopped.
struct FakeVoice {
    stopped: Rc<Cell<bool>>,
    finished: Rc<Cell<bool>>,
}

impl FakeVoice {
    fn new() -> (Self, Rc<Cell<bool>>, Rc<Cell<bool>>) {
        let stopped = Rc::new(Cell::new(false));
        let finished = Rc::new(Cell::new(false));
        let voice = FakeVoice {
            stopped: stopped.clone(),
            finished: finished.clone(),
        };
        (voice, stopped, finished)
    }
}

impl Voice for FakeVoice {
    fn stop(&mut self) {
        self.stopped.set(true);
    }

    fn is_finished(&self) -> bool {
        self.finished.get()
    }
}

#[test]
fn starting_a_preview_stops_the_previous_one() {
    let mut slot = PreviewSlot::new();
    let (a, a_stopped, _) = FakeVoice::new();
    let (b, b_stopped, _) = FakeVoice::new();

    slot.start("a".to_string(), a);
    assert_eq!(slot.playing_id(), Some("a"));

    slot.start("b".to_string(), b);
    assert!(a_stopped.get());
    assert!(!b_stopped.get());
    assert_eq!(slot.playing_id(), Some("b"));
}

#[test]
fn stop_silences_and_clears() {
    let mut slot = PreviewSlot::new();
    let (a, a_stopped, _) = FakeVoice::new();
    slot.start("a".to_string(), a);

    slot.stop();
    assert!(a_stopped.get());
    assert_eq!(slot.playing_id(), None);

    // Stopping an empty slot is a no-op.
    slot.stop();
    assert_eq!(slot.playing_id(), None);
}

#[test]
fn reap_only_removes_a_finished_voice() {
    let mut slot = PreviewSlot::new();
    let (a, a_stopped, a_finished) = FakeVoice::new();
    slot.start("a".to_string(), a);

    assert_eq!(slot.reap(), None);
    assert_eq!(slot.playing_id(), Some("a"));

    a_finished.set(true);
    assert_eq!(slot.reap(), Some("a".to_string()));
    assert_eq!(slot.playing_id(), None);
    // Natural end, nothing had to be stopped.
    assert!(!a_stopped.get());
    assert_eq!(slot.reap(), None);
}

#[test]
fn replaying_the_same_id_restarts_with_the_new_voice() {
    let mut slot = PreviewSlot::new();
    let (first, first_stopped, _) = FakeVoice::new();
    let (second, second_stopped, _) = FakeVoice::new();

    slot.start("a".to_string(), first);
    slot.start("a".to_string(), second);
    assert!(first_stopped.get());
    assert!(!second_stopped.get());
    assert_eq!(slot.playing_id(), Some("a"));
}

#[test]
fn stop_while_loading_never_installs_the_voice() {
    let mut slot: PreviewSlot<FakeVoice> = PreviewSlot::new();
    let ticket = slot.begin_load();
    slot.stop();

    let built = Cell::new(false);
    let outcome = slot.finish_load(ticket, "a".to_string(), || {
        built.set(true);
        Ok(FakeVoice::new().0)
    });
    assert_eq!(outcome, LoadOutcome::Stale);
    assert!(!built.get());
    assert_eq!(slot.playing_id(), None);
}

#[test]
fn newer_load_supersedes_an_older_download() {
    let mut slot = PreviewSlot::new();
    let first = slot.begin_load();
    let second = slot.begin_load();

    let (a, _, _) = FakeVoice::new();
    let (b, _, _) = FakeVoice::new();
    assert_eq!(
        slot.finish_load(first, "a".to_string(), || Ok(a)),
        LoadOutcome::Stale
    );
    assert_eq!(
        slot.finish_load(second, "b".to_string(), || Ok(b)),
        LoadOutcome::Started
    );
    assert_eq!(slot.playing_id(), Some("b"));
}

#[test]
fn loading_stops_the_voice_that_was_playing() {
    let mut slot = PreviewSlot::new();
    let (a, a_stopped, _) = FakeVoice::new();
    slot.start("a".to_string(), a);

    let ticket = slot.begin_load();
    assert!(a_stopped.get());
    assert_eq!(slot.playing_id(), None);

    let outcome: LoadOutcome = slot.finish_load(ticket, "b".to_string(), || {
        Err("cannot decode preview".to_string())
    });
    assert_eq!(outcome, LoadOutcome::Failed("cannot decode preview".to_string()));
    assert_eq!(slot.playing_id(), None);
}

#[test]
fn finished_download_is_consumed_once() {
    let mut slot = PreviewSlot::new();
    let ticket = slot.begin_load();
    let (a, _, _) = FakeVoice::new();
    let (again, _, _) = FakeVoice::new();
    assert_eq!(
        slot.finish_load(ticket, "a".to_string(), || Ok(a)),
        LoadOutcome::Started
    );
    assert_eq!(
        slot.finish_load(ticket, "a".to_string(), || Ok(again)),
        LoadOutcome::Stale
    );
}

#[test]
fn toggle_stops_the_id_that_is_playing_or_loading() {
    let idle = PreviewInfo::default();
    assert!(!idle.is_busy_with("a"));

    let playing = PreviewInfo {
        playing_id: Some("a".into()),
        ..PreviewInfo::default()
    };
    assert!(playing.is_busy_with("a"));
    assert!(!playing.is_busy_with("b"));

    let loading = PreviewInfo {
        loading_id: Some("a".into()),
        ..PreviewInfo::default()
    };
    assert!(loading.is_busy_with("a"));
}

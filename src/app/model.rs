//! Application model types: `App`, `Screen` and the fetch messages exchanged
//! with worker threads.
//!
//! The `App` struct owns exactly one screen at a time. Screens are rebuilt
//! from a `Location` on every navigation, so nothing but the location
//! survives a screen change.

use std::time::{Duration, Instant};

use crate::actions::Notice;
use crate::beatmaps::{BeatmapOutcome, BeatmapQuery, BeatmapScreen};
use crate::request::Ticket;
use crate::search::{SearchOutcome, SearchScreen};

use super::location::Location;

pub enum Screen {
    Search(SearchScreen),
    Beatmaps(BeatmapScreen),
}

/// A request a screen wants issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Search { ticket: Ticket, query: String },
    Beatmaps { ticket: Ticket, query: BeatmapQuery },
}

/// A finished request coming back from a worker.
#[derive(Debug)]
pub enum FetchEvent {
    Search {
        ticket: Ticket,
        outcome: SearchOutcome,
    },
    Beatmaps {
        ticket: Ticket,
        outcome: BeatmapOutcome,
    },
}

/// The main application model.
pub struct App {
    pub screen: Screen,
    pub location: Location,
    /// Blocking message; while set, the next key only dismisses it.
    pub notice: Option<Notice>,
    pub should_quit: bool,
    debounce: Duration,
}

impl App {
    /// Create an `App` on the search screen.
    pub fn new(debounce: Duration) -> Self {
        Self {
            screen: Screen::Search(SearchScreen::new(debounce)),
            location: Location::search(),
            notice: None,
            should_quit: false,
            debounce,
        }
    }

    /// Replace the current screen with the one `location` names. The old
    /// screen's request is cancelled before the new screen starts its own.
    pub fn navigate(&mut self, location: Location) -> Option<Dispatch> {
        self.teardown();
        log::info!("navigating to {location}");

        let dispatch = if location.is_beatmaps() {
            let mut screen = BeatmapScreen::new(&location);
            let started = screen.start();
            self.screen = Screen::Beatmaps(screen);
            started.map(|(ticket, query)| Dispatch::Beatmaps { ticket, query })
        } else {
            self.screen = Screen::Search(SearchScreen::new(self.debounce));
            None
        };

        self.location = location;
        dispatch
    }

    /// Enter on the search screen: go to the beatmaps of the highlighted track.
    pub fn open_selected_track(&mut self) -> Option<Dispatch> {
        let target = match &self.screen {
            Screen::Search(s) => s.navigation_target(),
            Screen::Beatmaps(_) => None,
        }?;
        self.navigate(target)
    }

    /// Back to a fresh search screen.
    pub fn back(&mut self) {
        let _ = self.navigate(Location::search());
    }

    /// Search request whose debounce window has elapsed.
    pub fn due_dispatch(&mut self, now: Instant) -> Option<Dispatch> {
        match &mut self.screen {
            Screen::Search(s) => s
                .due_dispatch(now)
                .map(|(ticket, query)| Dispatch::Search { ticket, query }),
            Screen::Beatmaps(_) => None,
        }
    }

    /// How long the event loop may block before a dispatch falls due.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        match &self.screen {
            Screen::Search(s) => s.next_deadline(now),
            Screen::Beatmaps(_) => None,
        }
    }

    /// Route a worker outcome to the current screen. Outcomes for a screen that
    /// is gone, or for a superseded request, are dropped.
    pub fn apply(&mut self, event: FetchEvent) -> bool {
        match (&mut self.screen, event) {
            (Screen::Search(s), FetchEvent::Search { ticket, outcome }) => {
                s.apply_outcome(ticket, outcome)
            }
            (Screen::Beatmaps(b), FetchEvent::Beatmaps { ticket, outcome }) => {
                b.apply_outcome(ticket, outcome)
            }
            (_, event) => {
                log::debug!("dropping outcome for a screen that is gone: {event:?}");
                false
            }
        }
    }

    pub fn show_notice(&mut self, notice: Notice) {
        log::info!("notice: {}", notice.message);
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn quit(&mut self) {
        self.teardown();
        self.should_quit = true;
    }

    fn teardown(&mut self) {
        match &mut self.screen {
            Screen::Search(s) => s.teardown(),
            Screen::Beatmaps(b) => b.teardown(),
        }
    }
}

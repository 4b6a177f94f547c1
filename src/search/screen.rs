//! Search screen state: the query effect, its in-flight request and results.

use std::time::{Duration, Instant};

use crate::api::ApiError;
use crate::app::Location;
use crate::request::{RequestSlot, Ticket};

use super::model::Track;

/// Outcome of one `/search` call as delivered by a worker thread.
pub type SearchOutcome = Result<Vec<Track>, ApiError>;

#[derive(Debug, Clone)]
struct PendingDispatch {
    ticket: Ticket,
    query: String,
    due: Instant,
}

pub struct SearchScreen {
    pub query: String,
    pub results: Vec<Track>,
    pub loading: bool,
    pub selected: usize,

    slot: RequestSlot,
    debounce: Duration,
    pending: Option<PendingDispatch>,
    /// Trimmed query the effect last ran for.
    effect_query: String,
    /// Trimmed query the current `results` were fetched for.
    results_query: String,
}

impl SearchScreen {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            loading: false,
            selected: 0,
            slot: RequestSlot::new(),
            debounce,
            pending: None,
            effect_query: String::new(),
            results_query: String::new(),
        }
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        self.query.push(c);
        self.query_changed(now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        self.query.pop();
        self.query_changed(now);
    }

    pub fn clear_query(&mut self, now: Instant) {
        self.query.clear();
        self.query_changed(now);
    }

    /// Run the query effect if the trimmed query differs from the last run.
    ///
    /// Empty queries clear results synchronously and issue nothing. Anything
    /// else cancels the request in flight, marks loading and schedules a new
    /// request once the debounce window has passed.
    pub fn query_changed(&mut self, now: Instant) {
        let trimmed = self.query.trim();
        if trimmed == self.effect_query {
            return;
        }
        self.effect_query = trimmed.to_string();

        if trimmed.is_empty() {
            self.slot.cancel();
            self.pending = None;
            self.results.clear();
            self.results_query.clear();
            self.selected = 0;
            self.loading = false;
            return;
        }

        let ticket = self.slot.begin();
        self.loading = true;
        self.pending = Some(PendingDispatch {
            ticket,
            query: self.effect_query.clone(),
            due: now + self.debounce,
        });
    }

    /// Ticket and query to send once the debounce deadline has passed.
    pub fn due_dispatch(&mut self, now: Instant) -> Option<(Ticket, String)> {
        let p = self.pending.as_ref()?;
        if !self.slot.accepts(p.ticket) {
            self.pending = None;
            return None;
        }
        if p.due > now {
            return None;
        }
        let p = self.pending.take()?;
        log::debug!("dispatching search #{} for {:?}", p.ticket.id(), p.query);
        Some((p.ticket, p.query))
    }

    /// Time left until the pending dispatch fires, used to bound the input poll.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }

    /// Apply a worker outcome. Stale tickets are dropped and leave state untouched.
    pub fn apply_outcome(&mut self, ticket: Ticket, outcome: SearchOutcome) -> bool {
        if !self.slot.finish(ticket) {
            return false;
        }
        match outcome {
            Ok(tracks) => {
                log::info!("search {:?}: {} result(s)", self.effect_query, tracks.len());
                self.results = tracks;
                self.results_query = self.effect_query.clone();
            }
            Err(e) => {
                log::error!("search {:?} failed: {e}", self.effect_query);
                self.results.clear();
                self.results_query.clear();
            }
        }
        self.selected = 0;
        self.loading = false;
        true
    }

    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1).min(self.results.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.results.get(self.selected)
    }

    /// Where choosing the highlighted track leads: the query that produced
    /// the results as `title`, the track's artist (or empty) as `artist`.
    pub fn navigation_target(&self) -> Option<Location> {
        self.selected_track().map(|t| {
            Location::beatmaps(&self.results_query, t.artist.as_deref().unwrap_or(""))
        })
    }

    /// Cancel whatever is in flight; called when the screen goes away.
    pub fn teardown(&mut self) {
        self.slot.cancel();
        self.pending = None;
    }
}

//! Beatmap results screen state.

use crate::api::ApiError;
use crate::app::Location;
use crate::request::{RequestSlot, Ticket};

use super::model::Beatmap;
use super::params::{BeatmapParams, BeatmapQuery};
use super::rank::rank;

/// Outcome of one `/osu_beatmaps` call as delivered by a worker thread.
pub type BeatmapOutcome = Result<Vec<Beatmap>, ApiError>;

pub struct BeatmapScreen {
    pub params: BeatmapParams,
    pub beatmaps: Vec<Beatmap>,
    pub loading: bool,
    /// Message of the last failed fetch, shown above the (empty) list.
    pub error: Option<String>,
    pub selected: usize,
    slot: RequestSlot,
}

impl BeatmapScreen {
    pub fn new(location: &Location) -> Self {
        Self {
            params: BeatmapParams::from_location(location),
            beatmaps: Vec::new(),
            loading: false,
            error: None,
            selected: 0,
            slot: RequestSlot::new(),
        }
    }

    /// Begin the fetch for this screen's params. Returns `None` (and an empty
    /// list) when title or artist is missing.
    pub fn start(&mut self) -> Option<(Ticket, BeatmapQuery)> {
        let Some(query) = self.params.query() else {
            log::info!("beatmap screen opened without title and artist; not fetching");
            self.slot.cancel();
            self.beatmaps.clear();
            self.loading = false;
            return None;
        };

        let ticket = self.slot.begin();
        self.loading = true;
        self.error = None;
        Some((ticket, query))
    }

    pub fn apply_outcome(&mut self, ticket: Ticket, outcome: BeatmapOutcome) -> bool {
        if !self.slot.finish(ticket) {
            return false;
        }
        match outcome {
            Ok(mut beatmaps) => {
                rank(&mut beatmaps);
                log::info!("loaded {} beatmap(s)", beatmaps.len());
                self.beatmaps = beatmaps;
                self.error = None;
            }
            Err(e) => {
                log::error!("beatmap fetch failed: {e}");
                self.beatmaps.clear();
                self.error = Some(e.to_string());
            }
        }
        self.selected = 0;
        self.loading = false;
        true
    }

    /// Nothing to show and nothing pending.
    pub fn is_empty_state(&self) -> bool {
        !self.loading && self.error.is_none() && self.beatmaps.is_empty()
    }

    pub fn select_next(&mut self) {
        if !self.beatmaps.is_empty() {
            self.selected = (self.selected + 1).min(self.beatmaps.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.beatmaps.len().saturating_sub(1);
    }

    pub fn selected_beatmap(&self) -> Option<&Beatmap> {
        self.beatmaps.get(self.selected)
    }

    pub fn teardown(&mut self) {
        self.slot.cancel();
    }
}

use std::time::Duration;

use serde_json::Value;

use crate::beatmaps::{Beatmap, BeatmapQuery};
use crate::config::{BackendSettings, BeatmapQueryStyle};
use crate::search::Track;

use super::error::ApiError;
use super::payload::{ensure_array, parse_payload};

pub const SEARCH_ENDPOINT: &str = "/search";
pub const BEATMAPS_ENDPOINT: &str = "/osu_beatmaps";

/// Blocking client for the search/beatmap backend. Cheap to clone; worker
/// threads each take their own copy.
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    query_style: BeatmapQueryStyle,
}

impl ApiClient {
    pub fn new(settings: &BackendSettings) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_millis(settings.timeout_ms)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url.trim().trim_end_matches('/').to_string(),
            query_style: settings.beatmap_query,
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}{}?q={}",
            self.base_url,
            SEARCH_ENDPOINT,
            urlencoding::encode(query)
        )
    }

    pub fn beatmaps_url(&self, query: &BeatmapQuery) -> String {
        let title = urlencoding::encode(&query.title);
        let artist = urlencoding::encode(&query.artist);
        let qs = match self.query_style {
            BeatmapQueryStyle::TitleArtist => format!("title={title}&artist={artist}"),
            BeatmapQueryStyle::TrackArtist => format!("track={title}&artist={artist}"),
            BeatmapQueryStyle::Q => format!(
                "q={}",
                urlencoding::encode(&format!("{} {}", query.title, query.artist))
            ),
        };
        format!("{}{}?{}", self.base_url, BEATMAPS_ENDPOINT, qs)
    }

    pub fn fetch_search(&self, query: &str) -> Result<Vec<Track>, ApiError> {
        let payload = self.get_json(&self.search_url(query), SEARCH_ENDPOINT)?;
        Ok(ensure_array(payload, SEARCH_ENDPOINT)
            .iter()
            .map(Track::from_value)
            .collect())
    }

    pub fn fetch_beatmaps(&self, query: &BeatmapQuery) -> Result<Vec<Beatmap>, ApiError> {
        let payload = self.get_json(&self.beatmaps_url(query), BEATMAPS_ENDPOINT)?;
        Ok(ensure_array(payload, BEATMAPS_ENDPOINT)
            .iter()
            .map(Beatmap::from_value)
            .collect())
    }

    /// Download raw bytes (preview audio).
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let resp = self
            .agent
            .get(url)
            .call()
            .map_err(|e| ApiError::transport(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut body = resp.into_body();
        body.read_to_vec().map_err(|e| ApiError::body(url, e))
    }

    fn get_json(&self, url: &str, endpoint: &str) -> Result<Value, ApiError> {
        log::debug!("GET {url}");
        let resp = self
            .agent
            .get(url)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| ApiError::transport(endpoint, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let mut body = resp.into_body();
        let text = body
            .read_to_string()
            .map_err(|e| ApiError::body(endpoint, e))?;
        Ok(parse_payload(&text, endpoint))
    }
}

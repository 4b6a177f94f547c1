//! Backend HTTP client for `/search` and `/osu_beatmaps`.
//!
//! Calls are blocking (`ureq`) and meant to run on worker threads; see
//! `runtime::fetch` for how their outcomes get back to the screens.

mod client;
mod error;
pub mod fields;
mod payload;

pub use client::ApiClient;
pub use error::ApiError;

use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/beatfind/config.toml` or `~/.config/beatfind/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BEATFIND__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub search: SearchSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub links: LinkSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Base URL of the backend serving `/search` and `/osu_beatmaps`.
    pub base_url: String,
    /// Global timeout for a single request (milliseconds).
    pub timeout_ms: u64,
    /// How the beatmap screen encodes its title/artist when querying `/osu_beatmaps`.
    pub beatmap_query: BeatmapQueryStyle,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 10_000,
            beatmap_query: BeatmapQueryStyle::TitleArtist,
        }
    }
}

/// Query parameter layouts understood by the various backend revisions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeatmapQueryStyle {
    /// `?title=..&artist=..`
    #[serde(alias = "title_artist")]
    TitleArtist,
    /// `?track=..&artist=..`
    #[serde(alias = "track_artist")]
    TrackArtist,
    /// `?q=<title> <artist>`
    #[serde(alias = "query")]
    Q,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Quiet period after the last keystroke before `/search` is called.
    /// Set to 0 to fire on every edit.
    pub debounce_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { debounce_ms: 150 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Preview volume in `0.0..=1.0`.
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { volume: 0.8 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ find a song, get the maps ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Template used when a beatmap has an id but no direct URL. `{id}` is substituted.
    pub beatmapset_url_template: String,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            beatmapset_url_template: "https://osu.ppy.sh/beatmapsets/{id}".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: LogLevelSetting,
    /// Log file. The terminal belongs to the UI, so logs never go to stderr.
    /// Defaults to `beatfind.log` in the system temp directory.
    pub file: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevelSetting::Info,
            file: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevelSetting {
    #[serde(alias = "none")]
    Off,
    Error,
    #[serde(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelSetting {
    pub fn as_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Off => log::LevelFilter::Off,
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

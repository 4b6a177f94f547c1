use crate::beatmaps::Beatmap;
use crate::search::Track;

use super::desktop::Desktop;

/// A message the user must acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Link for a beatmap: its direct `url`, else `template` filled with the set id.
pub fn resolve_link(beatmap: &Beatmap, template: &str) -> Option<String> {
    if let Some(url) = &beatmap.url {
        return Some(url.clone());
    }
    beatmap
        .set_id
        .as_deref()
        .map(|id| template.replace("{id}", id))
}

/// "Open beatmap". Opening silently succeeds; anything else becomes a notice.
pub fn open_beatmap(desktop: &mut dyn Desktop, beatmap: &Beatmap, template: &str) -> Option<Notice> {
    let Some(url) = resolve_link(beatmap, template) else {
        return Some(Notice::error("Beatmap link unavailable"));
    };
    open(desktop, &url)
}

/// "Copy link". Always reports back to the user.
pub fn copy_link(desktop: &mut dyn Desktop, beatmap: &Beatmap, template: &str) -> Notice {
    let Some(url) = resolve_link(beatmap, template) else {
        return Notice::error("No link to copy");
    };
    match desktop.copy_text(&url) {
        Ok(()) => {
            log::info!("copied {url}");
            Notice::info("Link copied to clipboard")
        }
        Err(e) => {
            log::warn!("copy failed: {e}");
            Notice::error("Failed to copy link")
        }
    }
}

/// "Download": hand the download URL to the browser.
pub fn download(desktop: &mut dyn Desktop, beatmap: &Beatmap) -> Option<Notice> {
    match beatmap.download_url.as_deref() {
        Some(url) => open(desktop, url),
        None => Some(Notice::error("No download available")),
    }
}

/// Open a search result on Spotify.
pub fn open_track(desktop: &mut dyn Desktop, track: &Track) -> Option<Notice> {
    match track.spotify_url.as_deref() {
        Some(url) => open(desktop, url),
        None => Some(Notice::error("No Spotify link for this track")),
    }
}

fn open(desktop: &mut dyn Desktop, url: &str) -> Option<Notice> {
    match desktop.open_url(url) {
        Ok(()) => {
            log::info!("opened {url}");
            None
        }
        Err(e) => {
            log::warn!("{e}");
            Some(Notice::error(e.to_string()))
        }
    }
}

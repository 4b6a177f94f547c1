//! Card actions: open, copy link, download. Fire-and-forget, no retries.

mod buttons;
mod desktop;

pub use buttons::{Notice, NoticeKind, copy_link, download, open_beatmap, open_track};
pub use desktop::{Desktop, SystemDesktop};

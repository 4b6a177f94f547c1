//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. Each
//! screen draws its own body; the header, controls footer and notice popup
//! are shared.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::actions::{Notice, NoticeKind};
use crate::app::{App, Screen};
use crate::config::UiSettings;
use crate::preview::PreviewInfo;

mod beatmaps;
mod search;


const SEARCH_CONTROLS: [(&str, &str); 6] = [
    ("type", "search"),
    ("up/down", "select"),
    ("enter", "find beatmaps"),
    ("ctrl-p", "preview"),
    ("ctrl-o", "open on Spotify"),
    ("esc", "quit"),
];

const BEATMAP_CONTROLS: [(&str, &str); 8] = [
    ("j/k", "up/down"),
    ("g/G", "top/bottom"),
    ("space/p", "play/stop preview"),
    ("o", "open beatmap"),
    ("y", "copy link"),
    ("d", "download"),
    ("esc/b", "back to search"),
    ("q", "quit"),
];

/// Render the controls help text for a screen.
fn controls_text(controls: &[(&str, &str)]) -> String {
    controls
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Compact play count: `1234 -> "1k"`, `2_500_000 -> "3M"`.
pub fn format_count(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{}M", (n / 1_000_000.0).round())
    } else if n >= 1_000.0 {
        format!("{}k", (n / 1_000.0).round())
    } else {
        format!("{}", n)
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, preview: &PreviewInfo, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" beatfind ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let controls = match &app.screen {
        Screen::Search(s) => {
            search::draw(frame, chunks[1], s, preview);
            controls_text(&SEARCH_CONTROLS)
        }
        Screen::Beatmaps(b) => {
            beatmaps::draw(frame, chunks[1], b, preview);
            controls_text(&BEATMAP_CONTROLS)
        }
    };

    let footer = Paragraph::new(controls)
        .block(left_padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);

    if let Some(notice) = &app.notice {
        draw_notice(frame, chunks[1], notice);
    }
}

fn draw_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let width = (notice.message.chars().count() as u16).saturating_add(6).max(30);
    let popup_area = centered_rect_sized(width, 5, area);
    frame.render_widget(Clear, popup_area);

    let (title, style) = match notice.kind {
        NoticeKind::Info => (" notice (any key closes) ", Style::default()),
        NoticeKind::Error => (
            " error (any key closes) ",
            Style::default().fg(Color::LightRed),
        ),
    };

    let body = Paragraph::new(notice.message.as_str())
        .style(style)
        .alignment(Alignment::Center)
        .block(left_padded(title).bold())
        .wrap(Wrap { trim: true });
    frame.render_widget(body, popup_area);
}

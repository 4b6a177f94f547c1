use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};

use crate::beatmaps::{Beatmap, BeatmapScreen};
use crate::preview::PreviewInfo;

use super::search::visible_window;
use super::{format_count, left_padded};

/// Rows per card in the list.
const CARD_HEIGHT: usize = 4;

pub(super) fn draw(frame: &mut Frame, area: Rect, screen: &BeatmapScreen, preview: &PreviewInfo) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    frame.render_widget(
        Paragraph::new(subtitle(screen, preview)).block(left_padded(" beatmap results ")),
        chunks[0],
    );

    if let Some(message) = body_message(screen) {
        let style = if screen.error.is_some() {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let body = Paragraph::new(message)
            .style(style)
            .block(left_padded(" maps "))
            .wrap(Wrap { trim: true });
        frame.render_widget(body, chunks[1]);
        return;
    }

    let total = screen.beatmaps.len();
    let rows = (chunks[1].height.saturating_sub(2) as usize) / CARD_HEIGHT;
    let (start, end, selected_in_view) = visible_window(total, rows.max(1), screen.selected);

    let items: Vec<ListItem> = screen.beatmaps[start..end]
        .iter()
        .map(|b| card(b, preview))
        .collect();

    let title = format!(" maps ({}) ", total);
    let list = List::new(items)
        .block(left_padded(&title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_in_view));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn subtitle<'a>(screen: &'a BeatmapScreen, preview: &'a PreviewInfo) -> Line<'a> {
    let mut spans = vec![
        Span::raw("Maps matching: "),
        Span::raw(screen.params.title.as_deref().unwrap_or("-")).bold(),
    ];
    if let Some(artist) = screen.params.artist.as_deref() {
        spans.push(Span::raw(" • "));
        spans.push(Span::raw(artist).italic());
    }
    if let Some(err) = preview.last_error.as_deref() {
        spans.push(Span::raw(format!("   (preview: {err})")).dim());
    }
    Line::from(spans)
}

/// Text shown instead of the list, if any.
fn body_message(screen: &BeatmapScreen) -> Option<String> {
    if screen.loading {
        return Some("Loading beatmaps…".to_string());
    }
    if let Some(err) = &screen.error {
        return Some(format!("Error: {err}"));
    }
    if screen.is_empty_state() {
        return Some("No beatmaps found for the given parameters.".to_string());
    }
    None
}

fn card<'a>(b: &'a Beatmap, preview: &PreviewInfo) -> ListItem<'a> {
    let key = b.key();
    let voice = if preview.playing_id.as_deref() == Some(key.as_str()) {
        "♪ playing"
    } else if preview.loading_id.as_deref() == Some(key.as_str()) {
        "… loading preview"
    } else if b.preview_url.is_some() {
        "preview"
    } else {
        ""
    };

    let mut meta = vec![
        Span::raw("Artist: "),
        Span::raw(b.artist.as_deref().unwrap_or("-")),
        Span::raw("  Mapper: "),
        Span::raw(b.creator.as_deref().unwrap_or("-")),
    ];
    if let Some(d) = b.difficulty.as_deref() {
        meta.push(Span::raw("  Difficulty: "));
        meta.push(Span::raw(d));
    }

    let cover = match b.cover() {
        Some(url) => Span::raw(format!("Cover: {url}")).dim(),
        None => Span::raw("Cover: no image").dim(),
    };

    let mut links = Vec::new();
    if b.url.is_some() || b.set_id.is_some() {
        links.push("[o] open");
        links.push("[y] copy link");
    }
    if b.download_url.is_some() {
        links.push("[d] download");
    }

    ListItem::new(vec![
        Line::from(vec![
            Span::raw(b.title.as_deref().unwrap_or("-")).bold(),
            Span::raw(format!("  {} plays", format_count(b.play_count))).dim(),
            Span::raw(format!("  {voice}")).fg(Color::LightGreen),
        ]),
        Line::from(meta),
        Line::from(cover),
        Line::from(Span::raw(links.join("  ")).dim()),
    ])
}

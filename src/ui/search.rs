use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::preview::PreviewInfo;
use crate::search::SearchScreen;

use super::left_padded;

pub(super) fn draw(frame: &mut Frame, area: Rect, screen: &SearchScreen, preview: &PreviewInfo) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let input_title = if screen.loading {
        " search (searching...) "
    } else {
        " search "
    };
    let input = if screen.query.is_empty() {
        Paragraph::new(Line::from(vec![
            Span::raw("Type a song name...").dim(),
            Span::raw("_").slow_blink(),
        ]))
    } else {
        Paragraph::new(Line::from(vec![
            Span::raw(screen.query.as_str()),
            Span::raw("_").slow_blink(),
        ]))
    };
    frame.render_widget(input.block(left_padded(input_title)), chunks[0]);

    // Only the visible window is turned into list items.
    let total = screen.results.len();
    let list_height = chunks[1].height.saturating_sub(2) as usize;
    let (start, end, selected_in_view) = visible_window(total, list_height, screen.selected);

    let items: Vec<ListItem> = screen.results[start..end]
        .iter()
        .map(|track| {
            let key = track.key();
            let marker = if preview.playing_id.as_deref() == Some(key.as_str()) {
                "♪ "
            } else if preview.loading_id.as_deref() == Some(key.as_str()) {
                "… "
            } else {
                ""
            };
            let mut spans = vec![
                Span::raw(marker),
                Span::raw(track.name.as_str()).bold(),
                Span::raw("  "),
                Span::raw(track.artist_or_unknown()).italic(),
            ];
            if track.preview.is_some() {
                spans.push(Span::raw("  [preview]").dim());
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(" results ({}) ", total);
    let list = List::new(items)
        .block(left_padded(&title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_in_view));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    if let Some(track) = screen.selected_track() {
        let mut spans = vec![Span::raw(format!(" {}", track.display()))];
        if let Some(image) = track.image.as_deref() {
            spans.push(Span::raw(format!("  cover: {image}")).dim());
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[2]);
    }
}

/// Window `[start, end)` of `total` rows that keeps `selected` roughly centered.
pub(super) fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    let selected = selected.min(total.saturating_sub(1));
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

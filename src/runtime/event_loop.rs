use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::actions::{self, Desktop, Notice};
use crate::api::ApiClient;
use crate::beatmaps::Beatmap;
use crate::app::{App, FetchEvent, Screen};
use crate::config;
use crate::preview::{PreviewInfo, PreviewPlayer};
use crate::runtime::fetch;
use crate::search::Track;
use crate::ui;

const IDLE_POLL: Duration = Duration::from_millis(50);

/// Everything the key handlers need besides the app model.
pub struct Context<'a> {
    pub settings: &'a config::Settings,
    pub client: &'a ApiClient,
    pub preview: &'a PreviewPlayer,
    pub desktop: &'a mut dyn Desktop,
    pub fetch_tx: &'a mpsc::Sender<FetchEvent>,
}

/// Main terminal event loop: applies fetch outcomes, fires due searches,
/// draws, and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    ctx: &mut Context<'_>,
    fetch_rx: &mpsc::Receiver<FetchEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(outcome) = fetch_rx.try_recv() {
            app.apply(outcome);
        }

        if let Some(dispatch) = app.due_dispatch(Instant::now()) {
            fetch::spawn(ctx.client, dispatch, ctx.fetch_tx);
        }

        let preview_info: PreviewInfo = ctx
            .preview
            .handle()
            .lock()
            .map(|i| i.clone())
            .unwrap_or_default();
        terminal.draw(|f| ui::draw(f, app, &preview_info, &ctx.settings.ui))?;

        let poll = app
            .next_deadline(Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));

        if event::poll(poll)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key_event(key, app, ctx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key_event(key: KeyEvent, app: &mut App, ctx: &mut Context<'_>) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        ctx.preview.stop();
        app.quit();
        return;
    }

    // A notice blocks until acknowledged.
    if app.notice.is_some() {
        app.dismiss_notice();
        return;
    }

    if matches!(app.screen, Screen::Search(_)) {
        handle_search_key(key, ctrl, app, ctx);
    } else {
        handle_beatmaps_key(key, app, ctx);
    }
}

fn handle_search_key(key: KeyEvent, ctrl: bool, app: &mut App, ctx: &mut Context<'_>) {
    let now = Instant::now();

    if ctrl {
        match key.code {
            KeyCode::Char('u') => {
                if let Screen::Search(s) = &mut app.screen {
                    s.clear_query(now);
                }
            }
            KeyCode::Char('o') => {
                if let Some(track) = selected_track(app) {
                    if let Some(notice) = actions::open_track(ctx.desktop, &track) {
                        app.show_notice(notice);
                    }
                }
            }
            KeyCode::Char('p') => {
                if let Some(track) = selected_track(app) {
                    match track.preview.as_deref() {
                        Some(url) => ctx.preview.toggle(&track.key(), url),
                        None => app.show_notice(Notice::error("No preview for this track")),
                    }
                }
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            ctx.preview.stop();
            app.quit();
        }
        KeyCode::Enter => {
            if selected_track(app).is_some() {
                ctx.preview.stop();
                if let Some(dispatch) = app.open_selected_track() {
                    fetch::spawn(ctx.client, dispatch, ctx.fetch_tx);
                }
            }
        }
        KeyCode::Up => {
            if let Screen::Search(s) = &mut app.screen {
                s.select_prev();
            }
        }
        KeyCode::Down => {
            if let Screen::Search(s) = &mut app.screen {
                s.select_next();
            }
        }
        KeyCode::Backspace => {
            if let Screen::Search(s) = &mut app.screen {
                s.pop_char(now);
            }
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                if let Screen::Search(s) = &mut app.screen {
                    s.push_char(c, now);
                }
            }
        }
        _ => {}
    }
}

fn handle_beatmaps_key(key: KeyEvent, app: &mut App, ctx: &mut Context<'_>) {
    let settings = ctx.settings;
    let template = settings.links.beatmapset_url_template.as_str();

    match key.code {
        KeyCode::Char('q') => {
            ctx.preview.stop();
            app.quit();
        }
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
            ctx.preview.stop();
            app.back();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if let Screen::Beatmaps(b) = &mut app.screen {
                b.select_next();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if let Screen::Beatmaps(b) = &mut app.screen {
                b.select_prev();
            }
        }
        KeyCode::Char('g') | KeyCode::Home => {
            if let Screen::Beatmaps(b) = &mut app.screen {
                b.select_first();
            }
        }
        KeyCode::Char('G') | KeyCode::End => {
            if let Screen::Beatmaps(b) = &mut app.screen {
                b.select_last();
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            if let Some(beatmap) = selected_beatmap(app) {
                match beatmap.preview_url.as_deref() {
                    Some(url) => ctx.preview.toggle(&beatmap.key(), url),
                    None => app.show_notice(Notice::error("No preview for this beatmap")),
                }
            }
        }
        KeyCode::Char('o') | KeyCode::Enter => {
            if let Some(beatmap) = selected_beatmap(app) {
                if let Some(notice) = actions::open_beatmap(ctx.desktop, &beatmap, template) {
                    app.show_notice(notice);
                }
            }
        }
        KeyCode::Char('y') => {
            if let Some(beatmap) = selected_beatmap(app) {
                let notice = actions::copy_link(ctx.desktop, &beatmap, template);
                app.show_notice(notice);
            }
        }
        KeyCode::Char('d') => {
            if let Some(beatmap) = selected_beatmap(app) {
                if let Some(notice) = actions::download(ctx.desktop, &beatmap) {
                    app.show_notice(notice);
                }
            }
        }
        _ => {}
    }
}

fn selected_track(app: &App) -> Option<Track> {
    match &app.screen {
        Screen::Search(s) => s.selected_track().cloned(),
        Screen::Beatmaps(_) => None,
    }
}

fn selected_beatmap(app: &App) -> Option<Beatmap> {
    match &app.screen {
        Screen::Beatmaps(b) => b.selected_beatmap().cloned(),
        Screen::Search(_) => None,
    }
}

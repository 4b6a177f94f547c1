use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::actions::SystemDesktop;
use crate::api::ApiClient;
use crate::app::{App, FetchEvent, Location};
use crate::preview::PreviewPlayer;

mod event_loop;
mod fetch;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (settings, config_fallback) = settings::load_settings();

    if args.iter().any(|a| a == "--print-config") {
        print!("{}", toml::to_string_pretty(&settings)?);
        return Ok(());
    }

    logging::init(&settings);
    if let Some(reason) = &config_fallback {
        log::warn!("{reason}");
    }

    // Optional start location, e.g. `/osu_beatmaps?title=Imagine&artist=John%20Lennon`.
    let start = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map(|a| Location::parse(a))
        .unwrap_or_else(Location::search);

    let client = ApiClient::new(&settings.backend);
    let preview = PreviewPlayer::new(client.clone(), settings.audio.clone());
    let mut desktop = SystemDesktop::new();

    let (fetch_tx, fetch_rx) = mpsc::channel::<FetchEvent>();
    let mut app = App::new(Duration::from_millis(settings.search.debounce_ms));
    if let Some(dispatch) = app.navigate(start) {
        fetch::spawn(&client, dispatch, &fetch_tx);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut ctx = event_loop::Context {
            settings: &settings,
            client: &client,
            preview: &preview,
            desktop: &mut desktop,
            fetch_tx: &fetch_tx,
        };
        event_loop::run(&mut terminal, &mut app, &mut ctx, &fetch_rx)
    })();

    preview.quit();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &run_result {
        log::error!("event loop failed: {e}");
    }
    log::info!("beatfind exiting");
    run_result
}

use std::fs::OpenOptions;

use log::LevelFilter;

use crate::config::Settings;

/// Install `env_logger`, writing to the configured log file.
///
/// The terminal is owned by the UI, so nothing is ever logged to stderr. If
/// the file cannot be opened the app runs without logging.
pub fn init(settings: &Settings) {
    let level = settings.log.level.as_level_filter();
    if level == LevelFilter::Off {
        return;
    }

    let path = settings.log_path();
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("beatfind: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .filter_module("ureq", LevelFilter::Warn)
        .filter_module("ureq_proto", LevelFilter::Warn)
        .filter_module("rustls", LevelFilter::Warn)
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();

    log::info!(
        "beatfind {} starting, backend {}",
        env!("CARGO_PKG_VERSION"),
        settings.backend.base_url
    );
}

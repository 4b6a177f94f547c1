use crate::config;

/// Load settings, falling back to defaults when the config is unreadable or
/// invalid. The second value says why defaults were used, so it can be logged
/// once logging is up.
pub fn load_settings() -> (config::Settings, Option<String>) {
    let (settings, fallback) = settle(config::Settings::load());
    if let Some(reason) = &fallback {
        // Printed before the alternate screen, so it is still visible on exit.
        eprintln!("beatfind: {reason}");
    }
    (settings, fallback)
}

fn settle(
    loaded: Result<config::Settings, ::config::ConfigError>,
) -> (config::Settings, Option<String>) {
    match loaded {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config, using defaults: {msg}")),
            ),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config, using defaults: {e}")),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_settings_are_kept() {
        let mut s = config::Settings::default();
        s.search.debounce_ms = 7;
        let (kept, fallback) = settle(Ok(s));
        assert_eq!(kept.search.debounce_ms, 7);
        assert_eq!(fallback, None);
    }

    #[test]
    fn invalid_settings_fall_back_with_a_reason() {
        let mut s = config::Settings::default();
        s.audio.volume = 3.0;
        let (used, fallback) = settle(Ok(s));
        assert!((used.audio.volume - 0.8).abs() < f32::EPSILON);
        assert_eq!(
            fallback.as_deref(),
            Some("invalid config, using defaults: audio.volume must be within 0.0..=1.0")
        );
    }

    #[test]
    fn load_errors_fall_back_with_a_reason() {
        let err = ::config::ConfigError::Message("bad toml".to_string());
        let (used, fallback) = settle(Err(err));
        assert_eq!(used.backend.base_url, "http://localhost:8000");
        assert!(fallback.is_some_and(|r| r.starts_with("failed to load config")));
    }
}

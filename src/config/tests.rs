use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_beatfind_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("BEATFIND_CONFIG_PATH", "/tmp/beatfind-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/beatfind-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("beatfind")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("beatfind")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[backend]
base_url = "http://maps.local:9000"
timeout_ms = 2500
beatmap_query = "track_artist"

[search]
debounce_ms = 0

[audio]
volume = 0.5

[ui]
header_text = "hello"

[links]
beatmapset_url_template = "https://mirror.example/s/{id}"

[log]
level = "warning"
file = "/tmp/beatfind-test.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BEATFIND_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("BEATFIND__SEARCH__DEBOUNCE_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.backend.base_url, "http://maps.local:9000");
    assert_eq!(s.backend.timeout_ms, 2500);
    assert_eq!(s.backend.beatmap_query, BeatmapQueryStyle::TrackArtist);
    assert_eq!(s.search.debounce_ms, 0);
    assert!((s.audio.volume - 0.5).abs() < f32::EPSILON);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(
        s.links.beatmapset_url_template,
        "https://mirror.example/s/{id}"
    );
    assert_eq!(s.log.level, LogLevelSetting::Warn);
    assert_eq!(
        s.log_path(),
        std::path::PathBuf::from("/tmp/beatfind-test.log")
    );
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[search]
debounce_ms = 400
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("BEATFIND_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("BEATFIND__SEARCH__DEBOUNCE_MS", "25");

    let s = Settings::load().unwrap();
    assert_eq!(s.search.debounce_ms, 25);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("does-not-exist.toml");
    let _g1 = EnvGuard::set("BEATFIND_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("BEATFIND__SEARCH__DEBOUNCE_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.backend.base_url, "http://localhost:8000");
    assert_eq!(s.backend.beatmap_query, BeatmapQueryStyle::TitleArtist);
    assert_eq!(s.search.debounce_ms, 150);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_bad_values() {
    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.backend.base_url = "  ".into();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.backend.timeout_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.links.beatmapset_url_template = "https://osu.ppy.sh/beatmapsets/".into();
    assert!(s.validate().is_err());
}

#[test]
fn default_settings_render_as_toml() {
    let text = toml::to_string_pretty(&Settings::default()).unwrap();
    assert!(text.contains("[backend]"));
    assert!(text.contains("beatmap_query = \"title-artist\""));
}

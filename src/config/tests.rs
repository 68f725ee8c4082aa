use super::load::{data_dir, default_config_path, resolve_config_path, state_dir};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
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
fn resolve_config_path_prefers_explicit_env_var() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TANGERINE_CONFIG_PATH", "/tmp/tangerine-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tangerine-test-config.toml")
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
            .join("tangerine")
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
            .join("tangerine")
            .join("config.toml")
    );
}

#[test]
fn data_and_state_dirs_follow_xdg_fallbacks() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_DATA_HOME");
    let _g2 = EnvGuard::set("XDG_STATE_HOME", "/tmp/xdg-state");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        data_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/share/tangerine")
    );
    assert_eq!(
        state_dir().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-state/tangerine")
    );
}

#[test]
fn playlist_path_prefers_configured_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");

    let mut s = Settings::default();
    assert_eq!(
        s.playlist_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-data/tangerine/playlist.txt")
    );

    s.playlist.path = Some("/tmp/custom.m3u".into());
    assert_eq!(
        s.playlist_path().unwrap(),
        std::path::PathBuf::from("/tmp/custom.m3u")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_loop_mode_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r##"
[playback]
loop_mode = "repeat-one"

[audio]
initial_volume = 40
volume_step = 10

[controls]
seek_seconds = 9

[ui]
header_text = "hello"
now_playing_track_fields = ["artist", "title"]
now_playing_track_separator = " • "
now_playing_time_fields = ["elapsed", "remaining"]
now_playing_time_separator = " | "

[theme]
accent = "lightred"

[library]
extensions = ["mp3"]
recursive = true
include_hidden = true
follow_links = false
scan_batch_size = 8
display_fields = ["filename"]
display_separator = "::"

[playlist]
persist = true
path = "/tmp/my-playlist.txt"
"##,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TANGERINE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TANGERINE__AUDIO__INITIAL_VOLUME");

    let s = Settings::load().unwrap();
    assert!(matches!(s.playback.loop_mode, LoopModeSetting::One));
    assert_eq!(s.audio.initial_volume, 40);
    assert_eq!(s.audio.volume_step, 10);
    assert_eq!(s.controls.seek_seconds, 9);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.now_playing_track_fields.len(), 2);
    assert!(matches!(s.ui.now_playing_track_fields[0], TrackDisplayField::Artist));
    assert!(matches!(s.ui.now_playing_track_fields[1], TrackDisplayField::Title));
    assert_eq!(s.ui.now_playing_track_separator, " • ");
    assert!(matches!(s.ui.now_playing_time_fields[1], TimeField::Remaining));
    assert_eq!(s.ui.now_playing_time_separator, " | ");
    assert_eq!(s.theme.accent, "lightred");
    assert_eq!(s.theme.highlight, ThemeSettings::default().highlight);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.scan_batch_size, 8);
    assert_eq!(s.library.display_separator, "::");
    assert!(matches!(s.library.display_fields[0], TrackDisplayField::Filename));
    assert!(s.playlist.persist);
    assert_eq!(
        s.playlist.path.as_deref(),
        Some(std::path::Path::new("/tmp/my-playlist.txt"))
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
[audio]
initial_volume = 80
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TANGERINE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TANGERINE__AUDIO__INITIAL_VOLUME", "25");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 25);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let _g1 = EnvGuard::set(
        "TANGERINE_CONFIG_PATH",
        dir.path().join("nope.toml").to_str().unwrap(),
    );

    let s = Settings::load().unwrap();
    assert!(matches!(s.playback.loop_mode, LoopModeSetting::Off));
    assert_eq!(s.audio.initial_volume, 100);
    assert!(!s.playlist.persist);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.audio.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.scan_batch_size = 0;
    assert!(s.validate().is_err());
}

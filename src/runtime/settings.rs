use tracing::warn;

use crate::config;

/// Load settings, falling back to defaults. The second value describes what
/// went wrong so the UI can show it once it is up.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => {
                warn!("invalid config, using defaults: {msg}");
                (
                    config::Settings::default(),
                    Some(format!("Invalid config, using defaults: {msg}")),
                )
            }
        },
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            warn!("failed to load config, using defaults: {e}");
            (
                config::Settings::default(),
                Some(format!("Config not loaded, using defaults: {e}")),
            )
        }
    }
}

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "TANGERINE_LOG";

/// Send `tracing` output to the log file under the XDG state directory.
///
/// The terminal belongs to the UI, so nothing is ever written to stderr. Any
/// failure leaves the program running without logs.
pub fn init() -> Option<PathBuf> {
    let dir = config::state_dir()?;
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join("tangerine.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

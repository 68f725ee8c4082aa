//! tangerine: a terminal audio player.
//!
//! Usage: `tangerine [PATH...]`. Files are queued, folders are scanned in the
//! background. Configuration lives in `~/.config/tangerine/config.toml`.

mod app;
mod audio;
mod config;
mod error;
mod library;
mod player;
mod runtime;
mod ui;

fn main() {
    if let Err(e) = runtime::run() {
        eprintln!("tangerine: {e}");
        std::process::exit(1);
    }
}

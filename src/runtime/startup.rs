use std::path::Path;
use std::sync::mpsc::Sender;

use tracing::{info, warn};

use crate::config::{self, LibrarySettings};
use crate::library::{ScanEvent, read_playlist, spawn_scan, write_playlist};
use crate::player::{Controller, MediaBackend, Notice};

pub fn apply_playback_defaults<B: MediaBackend>(
    controller: &mut Controller<B>,
    settings: &config::Settings,
) {
    controller.set_volume(i32::from(settings.audio.initial_volume));
    controller.set_loop_mode(settings.playback.loop_mode.into());
}

/// Add a file, or start a background scan when `path` is a folder.
pub fn open_path<B: MediaBackend>(
    path: &Path,
    controller: &mut Controller<B>,
    library: &LibrarySettings,
    scan_tx: &Sender<ScanEvent>,
) {
    if path.is_dir() {
        info!(dir = %path.display(), "scanning folder");
        spawn_scan(path.to_path_buf(), library.clone(), scan_tx.clone());
        controller.notify(Notice::info(format!("Scanning {}", path.display())));
    } else {
        controller.add_tracks([path]);
    }
}

/// Seed the playlist from the saved list when persistence is on.
pub fn restore_playlist<B: MediaBackend>(
    controller: &mut Controller<B>,
    settings: &config::Settings,
) {
    if !settings.playlist.persist {
        return;
    }
    let Some(path) = settings.playlist_path() else {
        warn!("no data directory; playlist not restored");
        return;
    };
    match read_playlist(&path) {
        Ok(paths) if paths.is_empty() => {}
        Ok(paths) => {
            let added = controller.add_tracks(&paths);
            info!(file = %path.display(), added, "restored playlist");
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "cannot read saved playlist");
            controller.notify(Notice::warning(format!("Saved playlist not loaded: {e}")));
        }
    }
}

/// Write the playlist back when persistence is on.
pub fn save_playlist<B: MediaBackend>(
    controller: &Controller<B>,
    settings: &config::Settings,
) -> std::io::Result<()> {
    if !settings.playlist.persist {
        return Ok(());
    }
    let Some(path) = settings.playlist_path() else {
        warn!("no data directory; playlist not saved");
        return Ok(());
    };
    write_playlist(&path, controller.playlist().tracks())?;
    info!(file = %path.display(), tracks = controller.playlist().len(), "saved playlist");
    Ok(())
}

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::PlayerError;

use super::model::Track;
use super::inspect::{is_audio_file, is_hidden, read_tags};

/// Progress of a background folder scan, delivered to the UI loop.
#[derive(Debug)]
pub enum ScanEvent {
    /// A chunk of tracks, in path order.
    Batch(Vec<Track>),
    /// The scan of `dir` completed after producing `count` tracks.
    Finished { dir: PathBuf, count: usize },
    /// The directory could not be read at all.
    Failed(PlayerError),
}

/// List audio files under `dir` according to `settings`, sorted by path.
pub fn audio_paths(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut paths: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_audio_file(p, settings))
        .collect();

    paths.sort();
    paths
}

/// Scan `dir` on a worker thread, streaming tracks to `tx` in batches of
/// `settings.scan_batch_size` so a large folder never stalls the UI.
pub fn spawn_scan(
    dir: PathBuf,
    settings: LibrarySettings,
    tx: Sender<ScanEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        if let Err(e) = std::fs::read_dir(&dir) {
            warn!(dir = %dir.display(), error = %e, "cannot scan folder");
            let _ = tx.send(ScanEvent::Failed(PlayerError::from_io(&dir, e)));
            return;
        }

        let paths = audio_paths(&dir, &settings);
        debug!(dir = %dir.display(), files = paths.len(), "scan found audio files");

        let batch_size = settings.scan_batch_size.max(1);
        let mut count = 0;
        for chunk in paths.chunks(batch_size) {
            let batch: Vec<Track> = chunk.iter().map(|p| read_tags(p, &settings)).collect();
            count += batch.len();
            if tx.send(ScanEvent::Batch(batch)).is_err() {
                // UI went away; nobody wants the rest.
                return;
            }
        }

        info!(dir = %dir.display(), count, "folder scan finished");
        let _ = tx.send(ScanEvent::Finished { dir, count });
    })
}

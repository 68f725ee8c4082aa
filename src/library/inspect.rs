//! Validation and tag reading for a single file.

use std::fs::{self, File};
use std::path::Path;

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use tracing::debug;

use crate::config::LibrarySettings;
use crate::error::PlayerError;

use super::display::display_from_fields;
use super::model::Track;

pub(super) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

pub(super) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Check that `path` is a readable audio file and build a `Track` for it.
///
/// Tags are read eagerly. A file whose tags cannot be parsed is still
/// accepted (the backend may decode it fine); its title falls back to the
/// file stem.
pub fn load_track(path: &Path, settings: &LibrarySettings) -> Result<Track, PlayerError> {
    let meta = fs::metadata(path).map_err(|e| PlayerError::from_io(path, e))?;
    if !meta.is_file() {
        return Err(PlayerError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }
    if !is_audio_file(path, settings) {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        return Err(PlayerError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: if ext.is_empty() {
                "no file extension".to_string()
            } else {
                format!("extension `{ext}` is not an audio type")
            },
        });
    }
    File::open(path).map_err(|e| PlayerError::from_io(path, e))?;

    Ok(read_tags(path, settings))
}

/// Read tags from an existing audio file. Never fails.
pub(super) fn read_tags(path: &Path, settings: &LibrarySettings) -> Track {
    let mut track = Track::untagged(path);

    match Probe::open(path).and_then(|p| p.read()) {
        Ok(tagged) => {
            let d = tagged.properties().duration();
            if !d.is_zero() {
                track.duration = Some(d);
            }

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title().filter(|v| !v.trim().is_empty()) {
                    track.title = v.trim().to_string();
                }
                track.artist = tag
                    .artist()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                track.album = tag
                    .album()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                track.year = tag.year();
                track.track_number = tag.track();
            }
        }
        Err(e) => debug!(path = %path.display(), error = %e, "no readable tags"),
    }

    track.display = display_from_fields(
        path,
        &track.title,
        track.artist.as_deref(),
        track.album.as_deref(),
        &settings.display_fields,
        &settings.display_separator,
    );
    track
}

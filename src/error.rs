//! Error types shared by the library, the audio backend and the controller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while adding or playing a track.
///
/// All variants are recovered by the playback controller except
/// `BackendUnavailable`, which is fatal when it happens at startup.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unsupported format: {} ({reason})", .path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("audio backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("audio device error: {0}")]
    Device(String),
}

impl PlayerError {
    /// Map an I/O failure on `path` to the matching variant.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Unreadable { path, source: err }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_io_maps_not_found() {
        let err = PlayerError::from_io("/tmp/missing.mp3", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, PlayerError::NotFound(_)));
        assert_eq!(err.to_string(), "file not found: /tmp/missing.mp3");
    }

    #[test]
    fn from_io_maps_other_kinds_to_unreadable() {
        let err = PlayerError::from_io(
            "/tmp/locked.flac",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, PlayerError::Unreadable { .. }));
        assert!(err.to_string().starts_with("cannot read /tmp/locked.flac"));
    }

    #[test]
    fn unsupported_format_mentions_reason() {
        let err = PlayerError::UnsupportedFormat {
            path: PathBuf::from("/tmp/notes.txt"),
            reason: "extension `txt` is not an audio type".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported format: /tmp/notes.txt (extension `txt` is not an audio type)"
        );
    }
}

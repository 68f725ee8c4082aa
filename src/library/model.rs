use std::path::{Path, PathBuf};
use std::time::Duration;

/// A playable file plus the metadata read when it was added.
///
/// Identity is the path; two tracks with the same path are the same song even
/// when the playlist holds both.
#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<u32>,
    pub track_number: Option<u32>,
    pub duration: Option<Duration>,
    pub display: String,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Track {}

impl Track {
    /// A track with no tags: title and display fall back to the file stem.
    pub fn untagged(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = file_stem(&path);
        Self {
            display: title.clone(),
            title,
            path,
            artist: None,
            album: None,
            year: None,
            track_number: None,
            duration: None,
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

//! The saved playlist: one absolute path per line.
//!
//! Lines hold the raw path bytes, so names that are not valid UTF-8 or that
//! start or end with spaces come back unchanged. Only a trailing `\r` is
//! stripped. Blank lines and lines starting with `#` are ignored when
//! reading, so a hand-edited file or a simple `.m3u` works too.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use super::model::Track;

/// Read the saved playlist. A missing file is an empty playlist.
pub fn read_playlist(path: &Path) -> io::Result<Vec<PathBuf>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    Ok(bytes
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty() && !line.starts_with(b"#"))
        .filter_map(path_from_bytes)
        .collect())
}

/// Write `tracks` to `path`, creating the parent directory if needed.
///
/// The file is written next to the target and renamed into place so a crash
/// mid-write never leaves a truncated playlist. Paths that cannot be stored
/// on one line are skipped with a warning.
pub fn write_playlist(path: &Path, tracks: &[Track]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("tmp");
    {
        let mut f = io::BufWriter::new(fs::File::create(&tmp)?);
        for t in tracks {
            let bytes = path_bytes(&t.path).filter(|b| {
                !b.is_empty() && !b.contains(&b'\n') && !b.ends_with(b"\r") && !b.starts_with(b"#")
            });
            let Some(bytes) = bytes else {
                warn!(path = %t.path.display(), "path not representable in playlist file");
                continue;
            };
            f.write_all(bytes)?;
            f.write_all(b"\n")?;
        }
        f.flush()?;
    }
    fs::rename(&tmp, path)
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Option<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Some(path.as_os_str().as_bytes())
}

#[cfg(unix)]
fn path_from_bytes(line: &[u8]) -> Option<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    Some(PathBuf::from(OsStr::from_bytes(line)))
}

// Elsewhere paths round-trip only when they are valid Unicode.
#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Option<&[u8]> {
    path.to_str().map(str::as_bytes)
}

#[cfg(not(unix))]
fn path_from_bytes(line: &[u8]) -> Option<PathBuf> {
    match std::str::from_utf8(line) {
        Ok(s) => Some(PathBuf::from(s)),
        Err(_) => {
            warn!("skipping playlist line that is not valid UTF-8");
            None
        }
    }
}

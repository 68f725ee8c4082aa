//! Utilities for creating `rodio` sinks from files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::PlayerError;

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Returns the sink and the decoder's idea of the total length, when it
/// knows one.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), PlayerError> {
    let file = File::open(path).map_err(|e| PlayerError::from_io(path, e))?;

    let source =
        Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let total = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is the fallback seeking primitive; even Duration::ZERO is fine.
    sink.append(source.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}

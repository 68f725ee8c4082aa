use std::path::Path;
use std::time::Duration;

use crate::error::PlayerError;

/// Commands the playback controller issues to whatever actually plays audio.
///
/// Implementations must not block for long: anything slow (decoding, device
/// I/O) happens elsewhere and is reported back as a
/// [`BackendMessage`](super::BackendMessage).
pub trait MediaBackend {
    /// Replace the loaded media with `path`. Does not start playback.
    ///
    /// Every event produced for this media carries `generation`.
    fn load(&mut self, path: &Path, generation: u64) -> Result<(), PlayerError>;
    fn play(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    /// Stop and unload.
    fn stop(&mut self) -> Result<(), PlayerError>;
    /// Jump to an absolute position in the loaded media.
    fn seek(&mut self, position: Duration) -> Result<(), PlayerError>;
    /// Volume in percent, already clamped to `0..=MAX_VOLUME`.
    fn set_volume(&mut self, percent: u8) -> Result<(), PlayerError>;
}

//! Commands understood by the audio thread.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
pub enum AudioCmd {
    /// Decode `path` into a fresh paused sink, replacing the current one.
    /// Events for it are stamped with the generation.
    Load(PathBuf, u64),
    /// Start or resume the loaded sink.
    Play,
    /// Pause the loaded sink.
    Pause,
    /// Stop and drop the loaded sink.
    Stop,
    /// Jump to an absolute position in the loaded sink.
    Seek(Duration),
    /// Linear gain, `0.0..=1.0`.
    SetVolume(f32),
    /// Stop playback and end the audio thread.
    Quit,
}

/// Convert a percentage to the linear gain rodio expects.
pub(super) fn gain(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

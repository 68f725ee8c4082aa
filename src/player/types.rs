//! Small state types shared by the controller and the UI.

use std::fmt;
use std::time::Duration;

use crate::config::LoopModeSetting;
use crate::error::PlayerError;

/// Highest volume the controller forwards to a backend, in percent.
pub const MAX_VOLUME: u8 = 100;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LoopMode {
    /// Stop after the last track.
    #[default]
    Off,
    /// Wrap around to the first track.
    All,
    /// Repeat the current track when it ends.
    One,
}

impl LoopMode {
    /// `Off -> All -> One -> Off`.
    pub fn cycled(self) -> Self {
        match self {
            LoopMode::Off => LoopMode::All,
            LoopMode::All => LoopMode::One,
            LoopMode::One => LoopMode::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoopMode::Off => "Off",
            LoopMode::All => "All",
            LoopMode::One => "One",
        }
    }
}

impl From<LoopModeSetting> for LoopMode {
    fn from(s: LoopModeSetting) -> Self {
        match s {
            LoopModeSetting::Off => LoopMode::Off,
            LoopModeSetting::All => LoopMode::All,
            LoopModeSetting::One => LoopMode::One,
        }
    }
}

/// Notifications a media backend posts back to the UI loop.
#[derive(Debug)]
pub enum BackendEvent {
    /// Periodic progress of the loaded track.
    Position {
        elapsed: Duration,
        duration: Option<Duration>,
    },
    /// The loaded track played to its end.
    EndOfTrack,
    /// The backend failed asynchronously (decode error, device lost).
    Error(PlayerError),
}

/// A [`BackendEvent`] stamped with the load that produced it.
///
/// `generation` is the value passed to
/// [`MediaBackend::load`](super::MediaBackend::load); events from an earlier
/// load are dropped by the controller.
#[derive(Debug)]
pub struct BackendMessage {
    pub generation: u64,
    pub event: BackendEvent,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A human-readable message for the status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

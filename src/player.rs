//! Playback controller and the types it shares with the UI and the audio
//! backend.
//!
//! The controller is a plain owned value: the runtime holds one, feeds it user
//! intent and drained [`BackendMessage`]s, and the UI reads it to draw.

mod backend;
mod controller;
mod playlist;
mod types;

pub use backend::MediaBackend;
pub use controller::Controller;
pub use types::*;

#[cfg(test)]
pub(crate) mod fake;

//! The rodio media backend.
//!
//! A dedicated thread owns the output stream and the current `Sink`. The UI
//! thread talks to it through `AudioCmd`s and hears back through
//! `BackendMessage`s, so no audio state is shared between threads.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioBackend;

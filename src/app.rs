//! Application module: exposes the view model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the list cursor, the path
//! prompt and popup flags. The playlist and playback state are owned by the
//! `player::Controller`.

mod model;

pub use model::*;

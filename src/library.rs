//! Track model, metadata reading, folder scanning and the saved playlist.

mod display;
mod inspect;
mod model;
mod persist;
mod scan;

pub use display::track_text;
pub use inspect::load_track;
pub use model::Track;
pub use persist::{read_playlist, write_playlist};
pub use scan::{ScanEvent, spawn_scan};

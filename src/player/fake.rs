//! A recording `MediaBackend` for tests across the crate.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::PlayerError;

use super::backend::MediaBackend;

#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    Seek(Duration),
    Volume(u8),
}

/// Records every command; optionally fails `load` for one path.
#[derive(Default)]
pub struct FakeBackend {
    pub log: Vec<Cmd>,
    pub fail_load: Option<PathBuf>,
    /// Generation of the most recent `load`.
    pub generation: u64,
}

impl FakeBackend {
    pub fn failing_on(path: &str) -> Self {
        Self {
            fail_load: Some(PathBuf::from(path)),
            ..Self::default()
        }
    }
}

impl MediaBackend for FakeBackend {
    fn load(&mut self, path: &Path, generation: u64) -> Result<(), PlayerError> {
        self.log.push(Cmd::Load(path.to_path_buf()));
        self.generation = generation;
        if self.fail_load.as_deref() == Some(path) {
            return Err(PlayerError::UnsupportedFormat {
                path: path.to_path_buf(),
                reason: "cannot decode".to_string(),
            });
        }
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.log.push(Cmd::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.log.push(Cmd::Pause);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.log.push(Cmd::Stop);
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        self.log.push(Cmd::Seek(position));
        Ok(())
    }

    fn set_volume(&mut self, percent: u8) -> Result<(), PlayerError> {
        self.log.push(Cmd::Volume(percent));
        Ok(())
    }
}

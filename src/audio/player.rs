use std::fs;
use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::error::PlayerError;
use crate::player::{BackendMessage, MediaBackend};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, gain};

/// How long startup waits for the audio thread to open the output device.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(5);

/// `MediaBackend` backed by a rodio sink on a dedicated thread.
///
/// Commands are fire-and-forget; decode errors and end-of-track come back
/// through the `BackendMessage` channel handed to [`RodioBackend::spawn`].
pub struct RodioBackend {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
}

impl RodioBackend {
    /// Start the audio thread and wait until the output device is open.
    ///
    /// Fails with `BackendUnavailable` when there is no usable device.
    pub fn spawn(events: Sender<BackendMessage>) -> Result<Self, PlayerError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (ready_tx, ready_rx) = mpsc::channel();

        let join = spawn_audio_thread(rx, events, ready_tx);

        match ready_rx.recv_timeout(STARTUP_TIMEOUT) {
            Ok(Ok(())) => Ok(Self {
                tx,
                join: Some(join),
            }),
            Ok(Err(e)) => {
                let _ = join.join();
                Err(e)
            }
            Err(_) => Err(PlayerError::BackendUnavailable(
                "audio thread did not start".to_string(),
            )),
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), PlayerError> {
        self.tx
            .send(cmd)
            .map_err(|_| PlayerError::Device("audio thread has exited".to_string()))
    }
}

impl MediaBackend for RodioBackend {
    fn load(&mut self, path: &Path, generation: u64) -> Result<(), PlayerError> {
        // Cheap check here so a vanished file fails synchronously; decoding
        // problems arrive later as BackendEvent::Error.
        fs::metadata(path).map_err(|e| PlayerError::from_io(path, e))?;
        self.send(AudioCmd::Load(path.to_path_buf(), generation))
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.send(AudioCmd::Pause)
    }

    fn stop(&mut self) -> Result<(), PlayerError> {
        self.send(AudioCmd::Stop)
    }

    fn seek(&mut self, position: Duration) -> Result<(), PlayerError> {
        self.send(AudioCmd::Seek(position))
    }

    fn set_volume(&mut self, percent: u8) -> Result<(), PlayerError> {
        self.send(AudioCmd::SetVolume(gain(percent)))
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        let _ = self.tx.send(AudioCmd::Quit);
        if let Some(h) = self.join.take() {
            let _ = h.join();
            debug!("audio thread joined");
        }
    }
}

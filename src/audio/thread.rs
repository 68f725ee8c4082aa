use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, info, warn};

use crate::error::PlayerError;
use crate::player::{BackendEvent, BackendMessage};

use super::sink::create_sink_at;
use super::types::AudioCmd;

/// How often the thread reports progress and checks for a finished track.
const TICK: Duration = Duration::from_millis(200);

/// What is currently loaded on the output stream.
struct Deck {
    sink: Sink,
    path: PathBuf,
    generation: u64,
    total: Option<Duration>,
    /// Position the sink started from when it was rebuilt for a seek.
    offset: Duration,
    paused: bool,
}

impl Deck {
    fn elapsed(&self) -> Duration {
        self.offset + self.sink.get_pos()
    }

    fn message(&self, event: BackendEvent) -> BackendMessage {
        BackendMessage {
            generation: self.generation,
            event,
        }
    }
}

/// Spawn the audio thread.
///
/// The thread opens the default output device first and reports the result
/// on `ready`; when that fails it exits immediately. Afterwards it serves
/// `AudioCmd`s and posts stamped `BackendEvent`s on `events`.
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<BackendMessage>,
    ready: Sender<Result<(), PlayerError>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(PlayerError::BackendUnavailable(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));
        info!("audio output opened");

        let mut deck: Option<Deck> = None;
        let mut volume: f32 = 1.0;

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load(path, generation) => {
                        if let Some(old) = deck.take() {
                            old.sink.stop();
                        }
                        match create_sink_at(&stream, &path, Duration::ZERO) {
                            Ok((sink, total)) => {
                                sink.set_volume(volume);
                                debug!(path = %path.display(), ?total, "loaded");
                                deck = Some(Deck {
                                    sink,
                                    path,
                                    generation,
                                    total,
                                    offset: Duration::ZERO,
                                    paused: true,
                                });
                            }
                            Err(e) => {
                                warn!(error = %e, "load failed");
                                let _ = events.send(BackendMessage {
                                    generation,
                                    event: BackendEvent::Error(e),
                                });
                            }
                        }
                    }

                    AudioCmd::Play => {
                        if let Some(d) = deck.as_mut() {
                            d.sink.play();
                            d.paused = false;
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(d) = deck.as_mut() {
                            d.sink.pause();
                            d.paused = true;
                        }
                    }

                    AudioCmd::Stop => {
                        if let Some(d) = deck.take() {
                            d.sink.stop();
                        }
                    }

                    AudioCmd::Seek(pos) => {
                        if let Some(d) = deck.as_mut() {
                            if let Err(e) = seek_deck(&stream, d, pos, volume) {
                                let _ = events.send(d.message(BackendEvent::Error(e)));
                                deck = None;
                            }
                        }
                    }

                    AudioCmd::SetVolume(v) => {
                        volume = v;
                        if let Some(d) = deck.as_ref() {
                            d.sink.set_volume(volume);
                        }
                    }

                    AudioCmd::Quit => {
                        if let Some(d) = deck.take() {
                            d.sink.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic progress report and end-of-track check.
                    let Some(d) = deck.as_ref() else {
                        continue;
                    };
                    if d.paused {
                        continue;
                    }
                    let message = if d.sink.empty() {
                        let message = d.message(BackendEvent::EndOfTrack);
                        deck = None;
                        message
                    } else {
                        d.message(BackendEvent::Position {
                            elapsed: d.elapsed(),
                            duration: d.total,
                        })
                    };
                    if events.send(message).is_err() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("audio thread exiting");
    })
}

/// Seek in place when the decoder supports it, otherwise rebuild the sink
/// starting at `pos`.
fn seek_deck(
    stream: &OutputStream,
    deck: &mut Deck,
    pos: Duration,
    volume: f32,
) -> Result<(), PlayerError> {
    let pos = deck.total.map_or(pos, |t| pos.min(t));
    // try_seek works on the position the sink has consumed, which excludes
    // any offset from an earlier rebuild.
    if deck.offset.is_zero() {
        match deck.sink.try_seek(pos) {
            Ok(()) => return Ok(()),
            Err(e) => debug!(error = %e, "in-place seek failed; rebuilding sink"),
        }
    }

    deck.sink.stop();
    let (sink, _) = create_sink_at(stream, &deck.path, pos)?;
    sink.set_volume(volume);
    if !deck.paused {
        sink.play();
    }
    deck.sink = sink;
    deck.offset = pos;
    Ok(())
}

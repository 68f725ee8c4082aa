//! The playback controller: owns the playlist and playback state and turns
//! user intent and backend notifications into backend commands.
//!
//! Every backend failure is absorbed here. The controller logs it, leaves the
//! state at `Stopped` and records a [`Notice`] for the UI; nothing bubbles up
//! to the event loop.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::LibrarySettings;
use crate::error::PlayerError;
use crate::library::{ScanEvent, Track, load_track};

use super::backend::MediaBackend;
use super::playlist::{Playlist, index_after_move};
use super::types::{BackendEvent, BackendMessage, LoopMode, MAX_VOLUME, Notice, PlaybackState};

pub struct Controller<B: MediaBackend> {
    backend: B,
    playlist: Playlist,
    state: PlaybackState,
    current: Option<usize>,
    volume: u8,
    loop_mode: LoopMode,
    elapsed: Duration,
    duration: Option<Duration>,
    notice: Option<Notice>,
    library: LibrarySettings,
    /// Bumped on every load; backend events stamped otherwise are stale.
    generation: u64,
}

impl<B: MediaBackend> Controller<B> {
    /// A stopped controller with an empty playlist.
    ///
    /// `library` decides which files `add_tracks` accepts and how their
    /// display names are built.
    pub fn new(backend: B, library: LibrarySettings) -> Self {
        Self {
            backend,
            playlist: Playlist::default(),
            state: PlaybackState::Stopped,
            current: None,
            volume: MAX_VOLUME,
            loop_mode: LoopMode::Off,
            elapsed: Duration::ZERO,
            duration: None,
            notice: None,
            library,
            generation: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.playlist.get(i))
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Length of the current track, from the backend if it reported one,
    /// else from the tags.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ---- playlist edits ----

    /// Validate and append `paths`. Bad paths are skipped with a warning.
    ///
    /// Returns how many tracks were added.
    pub fn add_tracks<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut added = 0;
        let mut skipped: Vec<PlayerError> = Vec::new();

        for p in paths {
            match load_track(p.as_ref(), &self.library) {
                Ok(track) => {
                    debug!(path = %track.path.display(), "track added");
                    self.playlist.push(track);
                    added += 1;
                }
                Err(e) => {
                    warn!(error = %e, "skipping file");
                    skipped.push(e);
                }
            }
        }

        self.notice = match skipped.as_slice() {
            [] if added == 0 => self.notice.take(),
            [] => Some(Notice::info(format!("Added {}", tracks_word(added)))),
            [only] => Some(Notice::warning(format!("Skipped {only}"))),
            [first, ..] => Some(Notice::warning(format!(
                "Skipped {} files (first: {first})",
                skipped.len()
            ))),
        };
        added
    }

    /// Append tracks that were already validated, e.g. by a folder scan.
    pub fn extend(&mut self, tracks: Vec<Track>) -> usize {
        let n = tracks.len();
        self.playlist.extend(tracks);
        n
    }

    /// Remove the track at `index`. Removing the current track stops
    /// playback and clears the current index.
    pub fn remove_track(&mut self, index: usize) {
        let Some(removed) = self.playlist.remove(index) else {
            self.notice = Some(Notice::warning(format!("No track at position {}", index + 1)));
            return;
        };

        match self.current {
            Some(c) if c == index => {
                self.halt();
                self.current = None;
            }
            Some(c) if c > index => self.current = Some(c - 1),
            _ => {}
        }

        info!(path = %removed.path.display(), "track removed");
        self.notice = Some(Notice::info(format!("Removed {}", removed.display)));
    }

    /// Reorder: the track at `from` moves to `to`. The current index follows
    /// the track it pointed at.
    pub fn move_track(&mut self, from: usize, to: usize) -> bool {
        if !self.playlist.move_track(from, to) {
            return false;
        }
        self.current = self.current.map(|c| index_after_move(c, from, to));
        true
    }

    /// Randomly reorder the playlist. The current track stays current.
    pub fn shuffle(&mut self) {
        if self.playlist.len() < 2 {
            return;
        }
        self.current = self.playlist.shuffle(self.current);
        self.notice = Some(Notice::info("Playlist shuffled"));
    }

    /// Empty the playlist and stop.
    pub fn clear(&mut self) {
        self.halt();
        self.current = None;
        self.playlist.clear();
        self.notice = Some(Notice::info("Playlist cleared"));
    }

    // ---- transport ----

    /// Play the track at `index`, or resume / start when `index` is `None`.
    ///
    /// From `Stopped` without an index, playback starts at the current index
    /// if one is set, otherwise at the first track.
    pub fn play(&mut self, index: Option<usize>) {
        if self.playlist.is_empty() {
            debug!("play requested on an empty playlist");
            self.notice = Some(Notice::warning("Playlist is empty"));
            return;
        }

        match index {
            Some(i) if i >= self.playlist.len() => {
                self.notice = Some(Notice::warning(format!("No track at position {}", i + 1)));
            }
            Some(i) => self.start(i),
            None => match self.state {
                PlaybackState::Playing => {}
                PlaybackState::Paused => match self.backend.play() {
                    Ok(()) => self.state = PlaybackState::Playing,
                    Err(e) => self.fail(e),
                },
                PlaybackState::Stopped => self.start(self.current.unwrap_or(0)),
            },
        }
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        match self.backend.pause() {
            Ok(()) => self.state = PlaybackState::Paused,
            Err(e) => self.fail(e),
        }
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(None),
        }
    }

    /// Stop playback. The current index is kept so `play(None)` restarts it.
    pub fn stop(&mut self) {
        self.halt();
    }

    /// Go to the next track, wrapping from the last to the first.
    pub fn next(&mut self) {
        self.step(true);
    }

    /// Go to the previous track, wrapping from the first to the last.
    pub fn previous(&mut self) {
        self.step(false);
    }

    /// Jump to `position` in the loaded track.
    pub fn seek(&mut self, position: Duration) {
        if self.state == PlaybackState::Stopped {
            self.notice = Some(Notice::warning("Nothing is loaded"));
            return;
        }
        let position = match self.duration {
            Some(d) => position.min(d),
            None => position,
        };
        match self.backend.seek(position) {
            Ok(()) => self.elapsed = position,
            Err(e) => self.fail(e),
        }
    }

    /// Seek relative to the last reported position.
    pub fn seek_by(&mut self, seconds: i64) {
        let delta = Duration::from_secs(seconds.unsigned_abs());
        let target = if seconds < 0 {
            self.elapsed.saturating_sub(delta)
        } else {
            self.elapsed.saturating_add(delta)
        };
        self.seek(target);
    }

    /// Set the volume in percent, clamped to `0..=MAX_VOLUME`.
    pub fn set_volume(&mut self, level: i32) {
        let clamped = level.clamp(0, i32::from(MAX_VOLUME)) as u8;
        self.volume = clamped;
        if let Err(e) = self.backend.set_volume(clamped) {
            self.fail(e);
        }
    }

    pub fn change_volume(&mut self, delta: i32) {
        self.set_volume(i32::from(self.volume) + delta);
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
    }

    pub fn cycle_loop_mode(&mut self) {
        self.loop_mode = self.loop_mode.cycled();
        self.notice = Some(Notice::info(format!("Loop: {}", self.loop_mode.label())));
    }

    // ---- backend notifications ----

    /// Apply a backend notification. Messages from an earlier load are
    /// dropped.
    pub fn handle_event(&mut self, message: BackendMessage) {
        if message.generation != self.generation {
            debug!(
                stale = message.generation,
                current = self.generation,
                "dropping backend event from an earlier load"
            );
            return;
        }
        match message.event {
            BackendEvent::Position { elapsed, duration } => {
                // Late ticks from a track we already stopped.
                if self.state == PlaybackState::Stopped {
                    return;
                }
                self.elapsed = elapsed;
                if duration.is_some() {
                    self.duration = duration;
                }
            }
            BackendEvent::EndOfTrack => self.on_end_of_track(),
            BackendEvent::Error(e) => self.fail(e),
        }
    }

    /// Fold a background folder scan's progress into the playlist.
    pub fn handle_scan(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::Batch(tracks) => {
                self.extend(tracks);
            }
            ScanEvent::Finished { dir, count } => {
                self.notice = Some(Notice::info(format!(
                    "Added {} from {}",
                    tracks_word(count),
                    dir.display()
                )));
            }
            ScanEvent::Failed(e) => {
                warn!(error = %e, "folder scan failed");
                self.notice = Some(Notice::warning(e.to_string()));
            }
        }
    }

    /// Show `notice` in the status area.
    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    fn on_end_of_track(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let Some(cur) = self.current else {
            self.halt();
            return;
        };

        match self.loop_mode {
            LoopMode::One => self.start(cur),
            LoopMode::All => self.start((cur + 1) % self.playlist.len()),
            LoopMode::Off if cur + 1 < self.playlist.len() => self.start(cur + 1),
            LoopMode::Off => {
                info!("reached end of playlist");
                self.halt();
                self.current = None;
                self.notice = Some(Notice::info("End of playlist"));
            }
        }
    }

    // ---- internals ----

    fn step(&mut self, forward: bool) {
        let len = self.playlist.len();
        if len == 0 {
            self.notice = Some(Notice::warning("Playlist is empty"));
            return;
        }

        let target = match (self.current, forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };

        match self.state {
            PlaybackState::Playing => self.start(target),
            PlaybackState::Paused => {
                self.halt();
                self.current = Some(target);
            }
            PlaybackState::Stopped => self.current = Some(target),
        }
    }

    /// Load and play `index`, which must be in range.
    fn start(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index) else {
            return;
        };
        let path = track.path.clone();
        let display = track.display.clone();

        self.current = Some(index);
        self.elapsed = Duration::ZERO;
        self.duration = track.duration;
        self.generation = self.generation.wrapping_add(1);

        match self.backend.load(&path, self.generation).and_then(|()| self.backend.play()) {
            Ok(()) => {
                info!(path = %path.display(), index, "playing");
                self.state = PlaybackState::Playing;
                self.notice = Some(Notice::info(format!("Now playing: {display}")));
            }
            Err(e) => self.fail(e),
        }
    }

    /// Stop the backend and go to `Stopped`, keeping the current index.
    fn halt(&mut self) {
        if let Err(e) = self.backend.stop() {
            warn!(error = %e, "backend stop failed");
        }
        self.state = PlaybackState::Stopped;
        self.elapsed = Duration::ZERO;
    }

    fn fail(&mut self, err: PlayerError) {
        error!(error = %err, "playback failed");
        self.halt();
        self.notice = Some(Notice::error(err.to_string()));
    }
}

fn tracks_word(n: usize) -> String {
    if n == 1 {
        "1 track".to_string()
    } else {
        format!("{n} tracks")
    }
}

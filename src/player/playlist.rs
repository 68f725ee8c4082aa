use rand::seq::SliceRandom;

use crate::library::Track;

/// Ordered list of tracks. Duplicates are allowed.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    pub fn remove(&mut self, index: usize) -> Option<Track> {
        (index < self.tracks.len()).then(|| self.tracks.remove(index))
    }

    /// Move the track at `from` so it ends up at `to`. Returns false when
    /// either index is out of range.
    pub fn move_track(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tracks.len() || to >= self.tracks.len() {
            return false;
        }
        let t = self.tracks.remove(from);
        self.tracks.insert(to, t);
        true
    }

    /// Shuffle in place, keeping track of where `follow` ends up.
    ///
    /// Returns the new position of the entry that was at `follow`.
    pub fn shuffle(&mut self, follow: Option<usize>) -> Option<usize> {
        let mut order: Vec<usize> = (0..self.tracks.len()).collect();
        order.shuffle(&mut rand::rng());

        let mut slots: Vec<Option<Track>> = self.tracks.drain(..).map(Some).collect();
        self.tracks = order
            .iter()
            .filter_map(|&old| slots[old].take())
            .collect();

        follow.and_then(|f| order.iter().position(|&old| old == f))
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

/// Where index `current` lands after moving `from` to `to`.
pub(super) fn index_after_move(current: usize, from: usize, to: usize) -> usize {
    if current == from {
        to
    } else if from < current && current <= to {
        current - 1
    } else if to <= current && current < from {
        current + 1
    } else {
        current
    }
}

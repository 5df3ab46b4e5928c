use std::path::PathBuf;

use log::info;

use crate::error::Error;
use crate::media::{MediaBackend, TrackId};

use super::track::Track;

/// Ordered tracks plus the one that is currently selected.
///
/// A registry is never empty, so there is always a selection.
pub struct TrackRegistry {
    tracks: Vec<Track>,
    selected: TrackId,
}

impl TrackRegistry {
    /// Open a player for every source, in order, and select the first track.
    pub fn load(sources: &[PathBuf], backend: &mut dyn MediaBackend) -> Result<Self, Error> {
        if sources.is_empty() {
            return Err(Error::EmptyLibrary);
        }

        let tracks: Vec<Track> = sources
            .iter()
            .enumerate()
            .map(|(id, source)| Track::new(id, source, backend.open(id, source)))
            .collect();
        info!("loaded {} tracks", tracks.len());

        Ok(Self {
            tracks,
            selected: 0,
        })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(id)
    }

    pub fn selected_id(&self) -> TrackId {
        self.selected
    }

    pub fn selected(&self) -> &Track {
        &self.tracks[self.selected]
    }

    pub fn selected_mut(&mut self) -> &mut Track {
        &mut self.tracks[self.selected]
    }

    /// Move the selection. Returns `false` when `id` is out of range or
    /// already selected.
    pub fn select(&mut self, id: TrackId) -> bool {
        if id >= self.tracks.len() || id == self.selected {
            return false;
        }
        self.selected = id;
        true
    }

    /// Id of the track after the selection, wrapping around.
    pub fn next_id(&self) -> TrackId {
        (self.selected + 1) % self.tracks.len()
    }

    /// Id of the track before the selection, wrapping around.
    pub fn prev_id(&self) -> TrackId {
        if self.selected == 0 {
            self.tracks.len() - 1
        } else {
            self.selected - 1
        }
    }

    /// Release every player handle. Idempotent.
    pub fn dispose_all(&mut self) {
        for track in &mut self.tracks {
            track.dispose();
        }
    }
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};

use crate::media::{MediaEvent, MediaPlayer, TrackId};

use super::state::{PlaybackState, PlaybackStatus, volume_percent};

/// One selectable media item with its own player handle.
pub struct Track {
    id: TrackId,
    name: String,
    source: PathBuf,
    player: Box<dyn MediaPlayer>,
    state: PlaybackState,
    disposed: bool,
}

impl Track {
    pub fn new(id: TrackId, source: &Path, player: Box<dyn MediaPlayer>) -> Self {
        let name = source
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| source.display().to_string());

        Self {
            id,
            name,
            source: source.to_path_buf(),
            player,
            state: PlaybackState::default(),
            disposed: false,
        }
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status
    }

    pub fn player(&self) -> &dyn MediaPlayer {
        self.player.as_ref()
    }

    pub(crate) fn player_mut(&mut self) -> &mut dyn MediaPlayer {
        self.player.as_mut()
    }

    /// Record a status the UI thread just commanded, ahead of the player's
    /// confirmation.
    pub(crate) fn record_command(&mut self, status: PlaybackStatus) {
        self.state.status = status;
        self.state.pending = Some(status);
    }

    /// Whether a confirmation for `status` is stale: another command was
    /// issued after the one it answers. A matching confirmation clears the
    /// pending command.
    fn is_stale(&mut self, status: PlaybackStatus) -> bool {
        match self.state.pending {
            Some(pending) if pending != status => {
                debug!(
                    "track {}: ignoring stale {status} while {pending} is pending",
                    self.id
                );
                true
            }
            _ => {
                self.state.pending = None;
                false
            }
        }
    }

    /// Clear the end-of-media flag, returning whether it was set.
    pub(crate) fn take_end_of_media(&mut self) -> bool {
        std::mem::take(&mut self.state.at_end_of_media)
    }

    pub fn current_time(&self) -> Duration {
        self.player.current_time()
    }

    pub fn position_ratio(&self) -> Option<f64> {
        self.state.position_ratio(self.player.current_time())
    }

    pub fn volume_percent(&self) -> f64 {
        volume_percent(self.player.volume())
    }

    /// Apply a player observation.
    pub fn apply(&mut self, event: &MediaEvent) {
        match event {
            MediaEvent::Ready(duration) => self.on_ready(*duration),
            MediaEvent::TimeAdvance => {}
            MediaEvent::Playing => self.on_playing(),
            MediaEvent::Paused => self.on_paused(),
            MediaEvent::EndOfMedia => self.on_end_of_media(),
            MediaEvent::Halted(reason) => self.on_halted(reason),
        }
    }

    /// The duration is fixed for the lifetime of a load.
    pub fn on_ready(&mut self, duration: Option<Duration>) {
        if self.state.status == PlaybackStatus::Halted {
            return;
        }
        if self.state.duration.is_none() {
            self.state.duration = duration;
        }
        if self.state.status == PlaybackStatus::Unknown {
            self.state.status = PlaybackStatus::Ready;
        }
        info!(
            "track {} ({}): ready, duration {:?}",
            self.id, self.name, self.state.duration
        );
    }

    /// Playback actually resumed. A pending stop request takes effect now,
    /// not when it was made, so it cannot race an in-flight play command.
    pub fn on_playing(&mut self) {
        if self.state.status == PlaybackStatus::Halted || self.is_stale(PlaybackStatus::Playing) {
            return;
        }
        self.state.status = PlaybackStatus::Playing;

        if self.state.stop_requested {
            debug!("track {}: applying deferred pause", self.id);
            self.player.pause();
            self.state.stop_requested = false;
            self.state.status = PlaybackStatus::Paused;
            self.state.pending = Some(PlaybackStatus::Paused);
        }
    }

    pub fn on_paused(&mut self) {
        if self.state.status == PlaybackStatus::Halted || self.is_stale(PlaybackStatus::Paused) {
            return;
        }
        self.state.status = PlaybackStatus::Paused;
    }

    /// Informational until the next toggle, which rewinds.
    pub fn on_end_of_media(&mut self) {
        if self.state.status == PlaybackStatus::Halted {
            return;
        }
        self.state.stop_requested = true;
        self.state.at_end_of_media = true;
        self.state.status = PlaybackStatus::Stopped;
        // A drained player confirms nothing further.
        self.state.pending = None;
        debug!("track {}: end of media", self.id);
    }

    pub fn on_halted(&mut self, reason: &str) {
        warn!("track {} ({}): halted: {reason}", self.id, self.name);
        self.state.status = PlaybackStatus::Halted;
        self.state.pending = None;
    }

    /// Release the player handle. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.player.dispose();
        self.disposed = true;
    }
}

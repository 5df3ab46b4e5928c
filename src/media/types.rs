//! Small types shared between player handles and the engine thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Index of a track inside the `TrackRegistry`.
pub type TrackId = usize;

/// Observation raised by a player.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The resource is loaded. `None` when the backend cannot tell its length.
    Ready(Option<Duration>),
    /// The playback position moved.
    TimeAdvance,
    /// Playback actually started or resumed.
    Playing,
    /// Playback actually paused.
    Paused,
    /// The source drained.
    EndOfMedia,
    /// The resource could not be loaded; terminal for this track.
    Halted(String),
}

#[derive(Debug)]
pub(super) enum EngineCmd {
    Load {
        id: TrackId,
        path: PathBuf,
        info: InfoHandle,
    },
    Play(TrackId),
    Pause(TrackId),
    Seek(TrackId, Duration),
    SetVolume(TrackId, f32),
    Dispose(TrackId),
    Shutdown,
}

/// What the engine publishes about one player for synchronous queries.
#[derive(Debug, Clone)]
pub(super) struct PlayerInfo {
    pub position: Duration,
    pub volume: f64,
}

pub(super) type InfoHandle = Arc<Mutex<PlayerInfo>>;

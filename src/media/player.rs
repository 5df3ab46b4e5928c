use std::path::Path;
use std::time::Duration;

use super::types::TrackId;

/// A playable handle for one media resource.
///
/// All methods are called from the UI thread. Commands do not block and do not
/// report failures; a player that cannot do its job reports `Halted` through
/// its event stream instead.
pub trait MediaPlayer {
    /// Current playback position.
    fn current_time(&self) -> Duration;

    /// Position playback restarts from when rewinding.
    fn start_time(&self) -> Duration {
        Duration::ZERO
    }

    /// Output volume in `0.0..=1.0`.
    fn volume(&self) -> f64;

    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f64);

    /// Release the underlying resource. Further commands are ignored.
    fn dispose(&mut self);
}

/// Creates player handles for media sources.
pub trait MediaBackend {
    fn open(&mut self, id: TrackId, source: &Path) -> Box<dyn MediaPlayer>;
}

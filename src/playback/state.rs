use std::fmt;
use std::time::Duration;

/// Transport status of one track.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Not loaded yet.
    #[default]
    Unknown,
    Ready,
    Playing,
    Paused,
    Stopped,
    /// The backend gave up on the resource.
    Halted,
}

impl PlaybackStatus {
    /// Whether the transport button does anything in this status.
    pub fn accepts_toggle(self) -> bool {
        !matches!(self, Self::Unknown | Self::Halted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Ready => "Ready",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
            Self::Halted => "Halted",
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport state of one track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    /// Known once the player reached Ready; `None` also covers media whose
    /// length the backend cannot tell.
    pub duration: Option<Duration>,
    pub at_end_of_media: bool,
    pub stop_requested: bool,
    /// Status of the last play/pause command the player has not confirmed
    /// yet. Confirmations that do not match it are stale and ignored.
    pub pending: Option<PlaybackStatus>,
}

impl PlaybackState {
    /// Position of `current` in percent of the duration.
    ///
    /// `None` while the position is meaningless: status `Unknown`, duration
    /// unknown, or a zero duration.
    pub fn position_ratio(&self, current: Duration) -> Option<f64> {
        if self.status == PlaybackStatus::Unknown {
            return None;
        }
        let duration = self.duration.filter(|d| !d.is_zero())?;
        let ratio = current.as_secs_f64() / duration.as_secs_f64() * 100.0;
        Some(ratio.clamp(0.0, 100.0))
    }
}

/// Player volume (`0.0..=1.0`) as a whole percentage.
pub fn volume_percent(volume: f64) -> f64 {
    (volume * 100.0).round().clamp(0.0, 100.0)
}

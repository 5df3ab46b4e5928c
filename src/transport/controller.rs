use std::fmt;

use log::debug;

use crate::playback::{PlaybackStatus, Track};

/// Text shown on the transport button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ButtonLabel {
    #[default]
    Play,
    Pause,
}

impl ButtonLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Play => "PLAY",
            Self::Pause => "PAUSE",
        }
    }

    fn for_status(status: PlaybackStatus) -> Self {
        if status == PlaybackStatus::Playing {
            Self::Pause
        } else {
            Self::Play
        }
    }
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a toggle did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The status does not accept toggles; nothing happened.
    Ignored(PlaybackStatus),
    /// Playback was started, after rewinding if the track had ended.
    Started { rewound: bool },
    Paused,
}

#[derive(Debug, Default)]
pub struct TransportController {
    label: ButtonLabel,
}

impl TransportController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> ButtonLabel {
        self.label
    }

    /// Play or pause `track` depending on its status.
    ///
    /// The new status is recorded immediately and stays until the player
    /// confirms it, so a second toggle that arrives first acts on the new
    /// status instead of repeating the command.
    pub fn toggle(&mut self, track: &mut Track) -> ToggleOutcome {
        let status = track.status();

        if !status.accepts_toggle() {
            debug!("track {}: toggle ignored while {status}", track.id());
            return ToggleOutcome::Ignored(status);
        }

        if status == PlaybackStatus::Playing {
            track.player_mut().pause();
            track.record_command(PlaybackStatus::Paused);
            self.label = ButtonLabel::Play;
            debug!("track {}: pause", track.id());
            return ToggleOutcome::Paused;
        }

        let rewound = track.take_end_of_media();
        if rewound {
            let start = track.player().start_time();
            track.player_mut().seek(start);
        }
        track.player_mut().play();
        track.record_command(PlaybackStatus::Playing);
        self.label = ButtonLabel::Pause;
        debug!("track {}: play (rewound: {rewound})", track.id());
        ToggleOutcome::Started { rewound }
    }

    /// Re-derive the label from the bound track, after a selection change or
    /// a status change reported by the player.
    pub fn sync_label(&mut self, track: &Track) {
        self.label = ButtonLabel::for_status(track.status());
    }
}

//! `App` and the slider grab mode.

use log::{debug, info, warn};

use crate::config::ControlsSettings;
use crate::dispatch::UiMsg;
use crate::media::{MediaEvent, TrackId};
use crate::playback::{PlaybackStatus, Track, TrackRegistry};
use crate::remote::RemoteCommand;
use crate::sync::{PositionSyncBridge, SliderControl, ValueControl, VolumeSyncBridge};
use crate::transport::{ButtonLabel, ToggleOutcome, TransportController};

/// Which slider the keyboard is currently holding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Grab {
    Position,
    Volume,
}

/// UI-thread state. Holds player handles, so it never leaves the UI thread.
pub struct App {
    registry: TrackRegistry,
    transport: TransportController,
    position: PositionSyncBridge,
    volume: VolumeSyncBridge,
    grab: Option<Grab>,
    scrub_step: f64,
    volume_step: f64,
    torn_down: bool,
}

impl App {
    /// Wrap a loaded registry and bind everything to its first track.
    pub fn new(registry: TrackRegistry, controls: &ControlsSettings) -> Self {
        let mut app = Self {
            registry,
            transport: TransportController::new(),
            position: PositionSyncBridge::new(SliderControl::new(0.0, true)),
            volume: VolumeSyncBridge::new(SliderControl::new(0.0, false)),
            grab: None,
            scrub_step: controls.scrub_step,
            volume_step: controls.volume_step,
            torn_down: false,
        };
        app.rebind();
        app
    }

    pub fn tracks(&self) -> &[Track] {
        self.registry.tracks()
    }

    pub fn selected_id(&self) -> TrackId {
        self.registry.selected_id()
    }

    pub fn selected(&self) -> &Track {
        self.registry.selected()
    }

    pub fn label(&self) -> ButtonLabel {
        self.transport.label()
    }

    pub fn position_control(&self) -> &SliderControl {
        self.position.control()
    }

    pub fn volume_control(&self) -> &SliderControl {
        self.volume.control()
    }

    pub fn grabbed(&self) -> Option<Grab> {
        self.grab
    }

    /// Apply one message drained from the UI queue.
    pub fn handle(&mut self, msg: UiMsg) {
        match msg {
            UiMsg::Media { track, event } => self.on_media_event(track, &event),
            UiMsg::Remote(cmd) => self.on_remote_command(&cmd),
        }
    }

    fn on_media_event(&mut self, id: TrackId, event: &MediaEvent) {
        let selected = id == self.registry.selected_id();
        let Some(track) = self.registry.get_mut(id) else {
            warn!("event {event:?} for unknown track {id}");
            return;
        };

        let before = track.status();
        track.apply(event);

        // Only the selected track drives the controls.
        if !selected {
            return;
        }
        if matches!(event, MediaEvent::TimeAdvance | MediaEvent::Ready(_)) {
            self.position.on_time_advance(track);
            self.volume.on_time_advance(track);
        }
        if track.status() != before {
            self.transport.sync_label(track);
        }
    }

    /// Every remote command is exactly one toggle; the payload is not read.
    fn on_remote_command(&mut self, cmd: &RemoteCommand) {
        debug!("remote command {:?} -> toggle", cmd.payload());
        self.toggle();
    }

    /// Transport button press.
    pub fn toggle(&mut self) -> ToggleOutcome {
        self.transport.toggle(self.registry.selected_mut())
    }

    /// Bind controller and bridges to another track. Any drag in progress
    /// ends first so it cannot carry over to the new track.
    pub fn select(&mut self, id: TrackId) -> bool {
        self.release();
        if !self.registry.select(id) {
            return false;
        }
        self.rebind();
        true
    }

    pub fn select_next(&mut self) -> bool {
        self.select(self.registry.next_id())
    }

    pub fn select_prev(&mut self) -> bool {
        self.select(self.registry.prev_id())
    }

    fn rebind(&mut self) {
        let track = self.registry.selected_mut();
        self.position.on_time_advance(track);
        self.volume.on_time_advance(track);
        self.transport.sync_label(track);
        debug!("bound to track {} ({})", track.id(), track.source().display());
    }

    /// Start holding a slider, or let go of it when it is already held.
    /// Returns whether `which` is held afterwards.
    pub fn grab(&mut self, which: Grab) -> bool {
        if self.grab == Some(which) {
            self.release();
            return false;
        }
        self.release();

        let began = match which {
            Grab::Position => self.position.begin_drag(),
            Grab::Volume => self.volume.begin_drag(),
        };
        if began {
            self.grab = Some(which);
        }
        began
    }

    /// Let go of whatever slider is held.
    pub fn release(&mut self) {
        match self.grab.take() {
            Some(Grab::Position) => self.position.end_drag(),
            Some(Grab::Volume) => self.volume.end_drag(),
            None => {}
        }
    }

    /// Move the held slider by `steps` key steps. Without a grab this
    /// scrubs by the same amount as a one-shot gesture.
    pub fn adjust_grabbed(&mut self, steps: f64) {
        let track = self.registry.selected_mut();
        match self.grab {
            Some(Grab::Position) => {
                let value = self.position.control().value() + steps * self.scrub_step;
                self.position.drag_to(value, track);
            }
            Some(Grab::Volume) => {
                let value = self.volume.control().value() + steps * self.volume_step;
                self.volume.drag_to(value, track);
            }
            None => self.scrub_by(steps),
        }
    }

    /// One-shot scrub by `steps` key steps.
    pub fn scrub_by(&mut self, steps: f64) {
        let delta = steps * self.scrub_step;
        self.position.nudge(delta, self.registry.selected_mut());
    }

    /// One-shot volume change by `steps` key steps.
    pub fn nudge_volume(&mut self, steps: f64) {
        let delta = steps * self.volume_step;
        self.volume.nudge(delta, self.registry.selected_mut());
    }

    pub fn status(&self) -> PlaybackStatus {
        self.selected().status()
    }

    /// Release every player handle. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.release();
        self.registry.dispose_all();
        self.torn_down = true;
        info!("released {} player handle(s)", self.registry.tracks().len());
    }
}

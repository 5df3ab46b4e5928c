use crate::playback::Track;

use super::control::{SliderControl, ValueControl};

/// Keeps the scrub control and the selected track's playback position in step.
pub struct PositionSyncBridge<C = SliderControl> {
    control: C,
}

impl<C: ValueControl> PositionSyncBridge<C> {
    pub fn new(control: C) -> Self {
        Self { control }
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// Outbound path, run on every time advance of the bound track and when
    /// the binding changes.
    ///
    /// The control is disabled while the duration is unknown. Nothing is
    /// pushed while the user holds the control.
    pub fn on_time_advance(&mut self, track: &mut Track) {
        self.control.set_disabled(track.state().duration.is_none());

        if self.control.is_disabled() || self.control.is_value_changing() {
            return;
        }
        let Some(ratio) = track.position_ratio() else {
            return;
        };

        self.control.set_value(ratio);
        self.on_value_changed(track);
    }

    /// Inbound path, run after every change of the control's value whoever
    /// made it. Only a user-driven change seeks.
    pub fn on_value_changed(&mut self, track: &mut Track) {
        if !self.control.is_value_changing() {
            return;
        }

        // A disabled control cannot be grabbed, so a known duration is an
        // invariant here.
        let Some(duration) = track.state().duration else {
            panic!(
                "scrub control moved by the user while track {} has no known duration",
                track.id()
            );
        };
        let target = duration.mul_f64(self.control.value() / 100.0);
        track.player_mut().seek(target);
    }

    /// Start a user drag. Refused while the control is disabled.
    pub fn begin_drag(&mut self) -> bool {
        if self.control.is_disabled() {
            return false;
        }
        self.control.set_value_changing(true);
        true
    }

    /// Move the control during a drag. Ignored outside a drag.
    pub fn drag_to(&mut self, value: f64, track: &mut Track) {
        if !self.control.is_value_changing() {
            return;
        }
        self.control.set_value(value);
        self.on_value_changed(track);
    }

    pub fn end_drag(&mut self) {
        self.control.set_value_changing(false);
    }

    /// A complete press-move-release gesture by `delta` percent.
    pub fn nudge(&mut self, delta: f64, track: &mut Track) {
        if !self.begin_drag() {
            return;
        }
        let value = self.control.value() + delta;
        self.drag_to(value, track);
        self.end_drag();
    }
}

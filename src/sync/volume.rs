use crate::playback::Track;

use super::control::{SliderControl, ValueControl};

/// Keeps the volume control and the selected track's player volume in step.
/// Same shape as the position bridge, without the duration gate.
pub struct VolumeSyncBridge<C = SliderControl> {
    control: C,
}

impl<C: ValueControl> VolumeSyncBridge<C> {
    pub fn new(control: C) -> Self {
        Self { control }
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn on_time_advance(&mut self, track: &mut Track) {
        if self.control.is_value_changing() {
            return;
        }
        self.control.set_value(track.volume_percent());
        self.on_value_changed(track);
    }

    pub fn on_value_changed(&mut self, track: &mut Track) {
        if !self.control.is_value_changing() {
            return;
        }
        track.player_mut().set_volume(self.control.value() / 100.0);
    }

    pub fn begin_drag(&mut self) -> bool {
        if self.control.is_disabled() {
            return false;
        }
        self.control.set_value_changing(true);
        true
    }

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

    pub fn nudge(&mut self, delta: f64, track: &mut Track) {
        if !self.begin_drag() {
            return;
        }
        let value = self.control.value() + delta;
        self.drag_to(value, track);
        self.end_drag();
    }
}

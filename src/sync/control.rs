/// The UI-facing surface of a slider-like control.
pub trait ValueControl {
    /// Current value in `0.0..=100.0`.
    fn value(&self) -> f64;
    fn set_value(&mut self, value: f64);

    /// Whether the user is currently manipulating the control.
    fn is_value_changing(&self) -> bool;
    fn set_value_changing(&mut self, changing: bool);

    fn is_disabled(&self) -> bool;
    fn set_disabled(&mut self, disabled: bool);
}

/// Plain slider state rendered by the terminal UI.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderControl {
    value: f64,
    value_changing: bool,
    disabled: bool,
}

impl SliderControl {
    pub fn new(value: f64, disabled: bool) -> Self {
        Self {
            value: value.clamp(0.0, 100.0),
            value_changing: false,
            disabled,
        }
    }
}

impl ValueControl for SliderControl {
    fn value(&self) -> f64 {
        self.value
    }

    fn set_value(&mut self, value: f64) {
        self.value = value.clamp(0.0, 100.0);
    }

    fn is_value_changing(&self) -> bool {
        self.value_changing
    }

    fn set_value_changing(&mut self, changing: bool) {
        self.value_changing = changing;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

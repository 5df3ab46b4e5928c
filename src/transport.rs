//! The play/pause state machine driven by the transport button and by
//! remote commands.

mod controller;

pub use controller::{ButtonLabel, ToggleOutcome, TransportController};

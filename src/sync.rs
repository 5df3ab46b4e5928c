//! Bridges between player-reported values and the UI controls that show and
//! edit them.
//!
//! Each bridge owns its control and has two paths. Outbound pushes the
//! player's value into the control; inbound turns a control change into a
//! player command. The control's "value is changing" flag decides which path
//! may act, so a programmatic push never turns into a seek and a user drag is
//! never overwritten by the player.

mod control;
mod position;
mod volume;

pub use control::{SliderControl, ValueControl};
pub use position::PositionSyncBridge;
pub use volume::VolumeSyncBridge;

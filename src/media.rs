//! Media backend: the player-handle contract the playback core drives, and a
//! rodio engine implementing it.
//!
//! Players are plain handles owned by their `Track`. Commands are
//! fire-and-forget; observations (`MediaEvent`) come back through the UI
//! dispatch queue so they are only ever applied on the UI thread.

mod deck;
mod engine;
mod player;
mod sink;
mod types;

pub use engine::MediaEngine;
pub use player::{MediaBackend, MediaPlayer};
pub use types::{MediaEvent, TrackId};

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;

//! Playback model: per-track transport state, the track itself with its
//! lifecycle policy, and the registry that owns every track.

mod registry;
mod state;
mod track;

pub use registry::TrackRegistry;
pub use state::PlaybackStatus;
pub use track::Track;

#[cfg(test)]
mod tests;

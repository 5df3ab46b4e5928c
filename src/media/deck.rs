//! Per-track playback state inside the engine thread.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::Sink;

use super::types::{InfoHandle, MediaEvent};

/// The parts of a `rodio::Sink` a deck drives.
pub(super) trait DeckSink {
    fn play(&self);
    fn pause(&self);
    fn stop(&self);
    /// Whether every queued source has been played.
    fn empty(&self) -> bool;
    fn get_pos(&self) -> Duration;
    /// Seek in place. `false` when the source cannot seek.
    fn try_seek(&self, to: Duration) -> bool;
    fn volume(&self) -> f32;
    fn set_volume(&self, volume: f32);
}

impl DeckSink for Sink {
    fn play(&self) {
        Sink::play(self);
    }

    fn pause(&self) {
        Sink::pause(self);
    }

    fn stop(&self) {
        Sink::stop(self);
    }

    fn empty(&self) -> bool {
        Sink::empty(self)
    }

    fn get_pos(&self) -> Duration {
        Sink::get_pos(self)
    }

    fn try_seek(&self, to: Duration) -> bool {
        Sink::try_seek(self, to).is_ok()
    }

    fn volume(&self) -> f32 {
        Sink::volume(self)
    }

    fn set_volume(&self, volume: f32) {
        Sink::set_volume(self, volume);
    }
}

/// One loaded track: its sink, whether it is meant to be playing, and the
/// info handle its player reads positions from.
pub(super) struct Deck<S: DeckSink = Sink> {
    path: PathBuf,
    sink: S,
    /// Added to `sink.get_pos()` after the sink was rebuilt at an offset.
    offset: Duration,
    playing: bool,
    info: InfoHandle,
}

impl<S: DeckSink> Deck<S> {
    /// A paused deck at the start of `sink`, at the volume the player asked for.
    pub(super) fn new(path: PathBuf, sink: S, info: InfoHandle) -> Self {
        let volume = info.lock().map(|i| i.volume).unwrap_or(1.0);
        sink.set_volume(volume as f32);
        Self {
            path,
            sink,
            offset: Duration::ZERO,
            playing: false,
            info,
        }
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }

    pub(super) fn position(&self) -> Duration {
        self.offset + self.sink.get_pos()
    }

    fn publish_position(&self) {
        if let Ok(mut i) = self.info.lock() {
            i.position = self.position();
        }
    }

    /// Start playback. Reports `Playing` unless it was already playing.
    pub(super) fn play(&mut self) -> Option<MediaEvent> {
        if self.playing {
            return None;
        }
        self.sink.play();
        self.playing = true;
        Some(MediaEvent::Playing)
    }

    /// Pause playback. Reports `Paused` unless it was not playing.
    pub(super) fn pause(&mut self) -> Option<MediaEvent> {
        if !self.playing {
            return None;
        }
        self.sink.pause();
        self.playing = false;
        self.publish_position();
        Some(MediaEvent::Paused)
    }

    pub(super) fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume);
    }

    pub(super) fn stop(&self) {
        self.sink.stop();
    }

    /// Periodic report: nothing while paused, `EndOfMedia` once when the
    /// sink drained, `TimeAdvance` otherwise.
    pub(super) fn tick(&mut self) -> Option<MediaEvent> {
        if !self.playing {
            return None;
        }
        if self.sink.empty() {
            self.playing = false;
            return Some(MediaEvent::EndOfMedia);
        }
        self.publish_position();
        Some(MediaEvent::TimeAdvance)
    }

    /// Seek without touching the sink. `false` means the caller has to
    /// rebuild the sink at `to`; a drained sink accepts seeks without doing
    /// anything, so it always needs a rebuild.
    pub(super) fn seek_in_place(&mut self, to: Duration) -> bool {
        if self.sink.empty() || !self.sink.try_seek(to) {
            return false;
        }
        self.offset = Duration::ZERO;
        self.publish_position();
        true
    }

    /// Swap in a sink that starts at `at`, keeping volume and play state.
    pub(super) fn replace_sink(&mut self, sink: S, at: Duration) {
        sink.set_volume(self.sink.volume());
        if self.playing {
            sink.play();
        }
        self.sink.stop();
        self.sink = sink;
        self.offset = at;
        self.publish_position();
    }
}

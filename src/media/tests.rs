use super::deck::{Deck, DeckSink};
use super::sink::probe_duration;
use super::types::{InfoHandle, PlayerInfo};
use super::*;
use crate::config::PlaybackSettings;
use crate::dispatch::{self, UiMsg};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

fn wait_for_event(queue: &dispatch::UiQueue, track: TrackId) -> Option<MediaEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        for msg in queue.drain() {
            if let UiMsg::Media { track: t, event } = msg {
                if t == track {
                    return Some(event);
                }
            }
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    None
}

#[test]
fn probe_duration_is_none_for_missing_or_garbage_files() {
    assert_eq!(probe_duration(Path::new("/definitely/not/here.mp3")), None);

    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.mp3");
    std::fs::write(&junk, b"not audio at all").unwrap();
    assert_eq!(probe_duration(&junk), None);
}

#[test]
fn engine_reports_halted_for_unloadable_source() {
    let (poster, queue) = dispatch::channel();
    let mut engine = MediaEngine::spawn(poster, &PlaybackSettings::default());

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.mp3");
    let mut player = engine.open(3, &missing);

    // Either the file is missing or there is no output device; both halt.
    match wait_for_event(&queue, 3) {
        Some(MediaEvent::Halted(reason)) => assert!(!reason.is_empty()),
        other => panic!("expected Halted, got {other:?}"),
    }

    // Commands on a halted player are harmless.
    player.play();
    player.seek(Duration::from_secs(1));
    player.dispose();
    player.dispose();

    engine.shutdown();
    engine.shutdown();
}

#[test]
fn player_handle_reports_requested_volume_and_seek_target() {
    let (poster, _queue) = dispatch::channel();
    let settings = PlaybackSettings {
        initial_volume: 0.4,
        ..PlaybackSettings::default()
    };
    let mut engine = MediaEngine::spawn(poster, &settings);
    let mut player = engine.open(0, Path::new("/definitely/not/here.mp3"));

    assert!((player.volume() - 0.4).abs() < f64::EPSILON);
    assert_eq!(player.start_time(), Duration::ZERO);

    player.set_volume(1.7);
    assert!((player.volume() - 1.0).abs() < f64::EPSILON);

    player.seek(Duration::from_secs(12));
    assert_eq!(player.current_time(), Duration::from_secs(12));

    engine.shutdown();
}

/// What a `TestSink` was asked to do; shared so tests keep a view of a sink
/// the deck owns.
#[derive(Default)]
struct SinkState {
    playing: Cell<bool>,
    stopped: Cell<bool>,
    drained: Cell<bool>,
    seekable: bool,
    pos: Cell<Duration>,
    volume: Cell<f32>,
}

struct TestSink(Rc<SinkState>);

fn sink(seekable: bool) -> (TestSink, Rc<SinkState>) {
    let state = Rc::new(SinkState {
        seekable,
        ..SinkState::default()
    });
    (TestSink(state.clone()), state)
}

impl DeckSink for TestSink {
    fn play(&self) {
        self.0.playing.set(true);
    }
    fn pause(&self) {
        self.0.playing.set(false);
    }
    fn stop(&self) {
        self.0.stopped.set(true);
    }
    fn empty(&self) -> bool {
        self.0.drained.get()
    }
    fn get_pos(&self) -> Duration {
        self.0.pos.get()
    }
    fn try_seek(&self, to: Duration) -> bool {
        if self.0.seekable {
            self.0.pos.set(to);
        }
        self.0.seekable
    }
    fn volume(&self) -> f32 {
        self.0.volume.get()
    }
    fn set_volume(&self, volume: f32) {
        self.0.volume.set(volume);
    }
}

fn deck(seekable: bool) -> (Deck<TestSink>, Rc<SinkState>, InfoHandle) {
    let info: InfoHandle = Arc::new(Mutex::new(PlayerInfo {
        position: Duration::ZERO,
        volume: 0.5,
    }));
    let (sink, state) = sink(seekable);
    let deck = Deck::new(PathBuf::from("media/test1.mp3"), sink, info.clone());
    (deck, state, info)
}

fn reported_position(info: &InfoHandle) -> Duration {
    info.lock().unwrap().position
}

#[test]
fn new_deck_is_paused_at_the_requested_volume() {
    let (mut deck, state, _info) = deck(true);
    assert!((state.volume.get() - 0.5).abs() < f32::EPSILON);
    assert!(!state.playing.get());
    assert_eq!(deck.tick(), None);
    assert_eq!(deck.pause(), None);
    assert_eq!(deck.path(), Path::new("media/test1.mp3"));
}

#[test]
fn play_and_pause_report_only_real_transitions() {
    let (mut deck, state, _info) = deck(true);
    assert_eq!(deck.play(), Some(MediaEvent::Playing));
    assert!(state.playing.get());
    assert_eq!(deck.play(), None);
    assert_eq!(deck.pause(), Some(MediaEvent::Paused));
    assert!(!state.playing.get());
    assert_eq!(deck.pause(), None);
}

#[test]
fn tick_advances_time_only_while_playing() {
    let (mut deck, state, info) = deck(true);
    state.pos.set(Duration::from_secs(3));
    assert_eq!(deck.tick(), None);
    assert_eq!(reported_position(&info), Duration::ZERO);

    deck.play();
    assert_eq!(deck.tick(), Some(MediaEvent::TimeAdvance));
    assert_eq!(reported_position(&info), Duration::from_secs(3));

    deck.pause();
    assert_eq!(deck.tick(), None);
}

#[test]
fn drained_sink_ends_media_once() {
    let (mut deck, state, _info) = deck(true);
    deck.play();
    state.drained.set(true);

    assert_eq!(deck.tick(), Some(MediaEvent::EndOfMedia));
    assert_eq!(deck.tick(), None);
    // Already stopped as far as the engine is concerned.
    assert_eq!(deck.pause(), None);
}

#[test]
fn live_sink_seeks_in_place() {
    let (mut deck, state, info) = deck(true);
    assert!(deck.seek_in_place(Duration::from_secs(42)));
    assert_eq!(state.pos.get(), Duration::from_secs(42));
    assert_eq!(deck.position(), Duration::from_secs(42));
    assert_eq!(reported_position(&info), Duration::from_secs(42));
}

#[test]
fn drained_or_unseekable_sink_needs_a_rebuild() {
    let (mut drained, state, _info) = deck(true);
    state.drained.set(true);
    assert!(!drained.seek_in_place(Duration::from_secs(1)));
    assert_eq!(state.pos.get(), Duration::ZERO, "no seek on a drained sink");

    let (mut stubborn, _state, _info) = deck(false);
    assert!(!stubborn.seek_in_place(Duration::from_secs(1)));
    assert_eq!(stubborn.position(), Duration::ZERO);
}

#[test]
fn rebuilt_sink_keeps_volume_play_state_and_offset() {
    let (mut deck, old, info) = deck(false);
    deck.play();
    old.pos.set(Duration::from_secs(9));

    let (fresh, new) = sink(false);
    deck.replace_sink(fresh, Duration::from_secs(30));

    assert!(old.stopped.get());
    assert!(new.playing.get());
    assert!((new.volume.get() - 0.5).abs() < f32::EPSILON);
    assert_eq!(deck.position(), Duration::from_secs(30));
    assert_eq!(reported_position(&info), Duration::from_secs(30));

    new.pos.set(Duration::from_secs(2));
    assert_eq!(deck.position(), Duration::from_secs(32));
}

#[test]
fn rebuilding_a_paused_deck_leaves_it_paused() {
    let (mut deck, old, _info) = deck(false);
    let (fresh, new) = sink(false);
    deck.replace_sink(fresh, Duration::from_secs(5));

    assert!(old.stopped.get());
    assert!(!new.playing.get());
    assert_eq!(deck.tick(), None);
}

//! Recording player and backend for unit tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use super::player::{MediaBackend, MediaPlayer};
use super::types::TrackId;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCall {
    Play,
    Pause,
    Seek(Duration),
    SetVolume(f64),
    Dispose,
}

#[derive(Debug)]
pub struct FakeState {
    pub calls: Vec<PlayerCall>,
    pub current: Duration,
    pub volume: f64,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            current: Duration::ZERO,
            volume: 1.0,
        }
    }
}

pub type FakeHandle = Rc<RefCell<FakeState>>;

pub struct FakePlayer {
    state: FakeHandle,
}

impl FakePlayer {
    pub fn new() -> (Self, FakeHandle) {
        let state = FakeHandle::default();
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

impl MediaPlayer for FakePlayer {
    fn current_time(&self) -> Duration {
        self.state.borrow().current
    }

    fn volume(&self) -> f64 {
        self.state.borrow().volume
    }

    fn play(&mut self) {
        self.state.borrow_mut().calls.push(PlayerCall::Play);
    }

    fn pause(&mut self) {
        self.state.borrow_mut().calls.push(PlayerCall::Pause);
    }

    fn seek(&mut self, position: Duration) {
        let mut s = self.state.borrow_mut();
        s.current = position;
        s.calls.push(PlayerCall::Seek(position));
    }

    fn set_volume(&mut self, volume: f64) {
        let mut s = self.state.borrow_mut();
        s.volume = volume;
        s.calls.push(PlayerCall::SetVolume(volume));
    }

    fn dispose(&mut self) {
        self.state.borrow_mut().calls.push(PlayerCall::Dispose);
    }
}

/// Hands out `FakePlayer`s and keeps their handles, in open order.
#[derive(Default)]
pub struct FakeBackend {
    pub opened: Vec<(TrackId, PathBuf, FakeHandle)>,
}

impl FakeBackend {
    pub fn handle(&self, id: TrackId) -> FakeHandle {
        self.opened
            .iter()
            .find(|(i, _, _)| *i == id)
            .map(|(_, _, h)| h.clone())
            .expect("no player opened for track")
    }
}

impl MediaBackend for FakeBackend {
    fn open(&mut self, id: TrackId, source: &Path) -> Box<dyn MediaPlayer> {
        let (player, handle) = FakePlayer::new();
        self.opened.push((id, source.to_path_buf(), handle));
        Box::new(player)
    }
}

pub fn calls(handle: &FakeHandle) -> Vec<PlayerCall> {
    handle.borrow().calls.clone()
}

pub fn clear_calls(handle: &FakeHandle) {
    handle.borrow_mut().calls.clear();
}

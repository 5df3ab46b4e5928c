//! The rodio engine thread and the player handles that talk to it.
//!
//! One thread owns the output stream and one `Sink` per loaded track. Player
//! handles send `EngineCmd`s over a channel; the engine answers with
//! `MediaEvent`s posted to the UI queue and keeps a small `PlayerInfo` per
//! handle up to date for synchronous position/volume queries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use rodio::{OutputStream, OutputStreamBuilder};

use crate::config::PlaybackSettings;
use crate::dispatch::{UiMsg, UiPoster};
use crate::error::LoadError;

use super::deck::Deck;
use super::player::{MediaBackend, MediaPlayer};
use super::sink::{create_sink_at, probe_duration};
use super::types::{EngineCmd, InfoHandle, MediaEvent, PlayerInfo, TrackId};

pub struct MediaEngine {
    tx: Sender<EngineCmd>,
    initial_volume: f64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl MediaEngine {
    /// Spawn the engine thread. Events for every player it creates are posted
    /// through `poster`.
    pub fn spawn(poster: UiPoster, settings: &PlaybackSettings) -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let tick = Duration::from_millis(settings.tick_ms);

        let handle = thread::spawn(move || Engine::new(poster).run(rx, tick));

        Self {
            tx,
            initial_volume: settings.initial_volume.clamp(0.0, 1.0),
            join: Mutex::new(Some(handle)),
        }
    }

    /// Stop every sink and wait for the engine thread. Safe to call twice.
    pub fn shutdown(&self) {
        let _ = self.tx.send(EngineCmd::Shutdown);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                if h.join().is_err() {
                    error!("media engine thread panicked");
                }
            }
        }
    }
}

impl MediaBackend for MediaEngine {
    fn open(&mut self, id: TrackId, source: &Path) -> Box<dyn MediaPlayer> {
        let info: InfoHandle = Arc::new(Mutex::new(PlayerInfo {
            position: Duration::ZERO,
            volume: self.initial_volume,
        }));

        let player = RodioPlayer {
            id,
            tx: self.tx.clone(),
            info: info.clone(),
            disposed: false,
        };
        player.send(EngineCmd::Load {
            id,
            path: source.to_path_buf(),
            info,
        });

        Box::new(player)
    }
}

/// Handle for one track's sink inside the engine.
struct RodioPlayer {
    id: TrackId,
    tx: Sender<EngineCmd>,
    info: InfoHandle,
    disposed: bool,
}

impl RodioPlayer {
    fn send(&self, cmd: EngineCmd) {
        if self.disposed {
            return;
        }
        if let Err(e) = self.tx.send(cmd) {
            warn!("track {}: media engine is gone, dropping {:?}", self.id, e.0);
        }
    }
}

impl MediaPlayer for RodioPlayer {
    fn current_time(&self) -> Duration {
        self.info.lock().map(|i| i.position).unwrap_or_default()
    }

    fn volume(&self) -> f64 {
        self.info.lock().map(|i| i.volume).unwrap_or(0.0)
    }

    fn play(&mut self) {
        self.send(EngineCmd::Play(self.id));
    }

    fn pause(&mut self) {
        self.send(EngineCmd::Pause(self.id));
    }

    fn seek(&mut self, position: Duration) {
        // Report the target right away so the next outbound push does not
        // snap the slider back to the pre-seek position.
        if let Ok(mut i) = self.info.lock() {
            i.position = position;
        }
        self.send(EngineCmd::Seek(self.id, position));
    }

    fn set_volume(&mut self, volume: f64) {
        let volume = volume.clamp(0.0, 1.0);
        if let Ok(mut i) = self.info.lock() {
            i.volume = volume;
        }
        self.send(EngineCmd::SetVolume(self.id, volume as f32));
    }

    fn dispose(&mut self) {
        self.send(EngineCmd::Dispose(self.id));
        self.disposed = true;
    }
}

struct Engine {
    stream: Result<OutputStream, String>,
    decks: HashMap<TrackId, Deck>,
    poster: UiPoster,
}

impl Engine {
    fn new(poster: UiPoster) -> Self {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when the stream is dropped, which would
                // scribble over the terminal UI.
                s.log_on_drop(false);
                Ok(s)
            }
            Err(e) => {
                error!("media engine: no audio output device: {e}");
                Err(e.to_string())
            }
        };

        Self {
            stream,
            decks: HashMap::new(),
            poster,
        }
    }

    fn run(mut self, rx: Receiver<EngineCmd>, tick: Duration) {
        let mut last_tick = Instant::now();

        loop {
            match rx.recv_timeout(tick) {
                Ok(EngineCmd::Load { id, path, info }) => self.load(id, path, info),
                Ok(EngineCmd::Play(id)) => self.play(id),
                Ok(EngineCmd::Pause(id)) => self.pause(id),
                Ok(EngineCmd::Seek(id, to)) => self.seek(id, to),
                Ok(EngineCmd::SetVolume(id, volume)) => {
                    if let Some(deck) = self.decks.get(&id) {
                        deck.set_volume(volume);
                    }
                }
                Ok(EngineCmd::Dispose(id)) => {
                    if let Some(deck) = self.decks.remove(&id) {
                        deck.stop();
                        debug!("track {id}: disposed");
                    }
                }
                Ok(EngineCmd::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }

            if last_tick.elapsed() >= tick {
                self.tick();
                last_tick = Instant::now();
            }
        }

        for (_, deck) in self.decks.drain() {
            deck.stop();
        }
        info!("media engine stopped");
    }

    fn emit(&self, id: TrackId, event: MediaEvent) {
        self.poster.post(UiMsg::Media { track: id, event });
    }

    fn output(&self) -> Result<&OutputStream, LoadError> {
        self.stream
            .as_ref()
            .map_err(|e| LoadError::NoOutput(e.clone()))
    }

    fn load(&mut self, id: TrackId, path: PathBuf, info: InfoHandle) {
        let loaded = self
            .output()
            .and_then(|stream| create_sink_at(stream, &path, Duration::ZERO));

        match loaded {
            Ok((sink, total)) => {
                let duration = probe_duration(&path).or(total);
                info!("track {id}: loaded {} ({duration:?})", path.display());

                if let Some(old) = self.decks.insert(id, Deck::new(path, sink, info)) {
                    old.stop();
                }
                self.emit(id, MediaEvent::Ready(duration));
            }
            Err(e) => {
                warn!("track {id}: {e}");
                self.emit(id, MediaEvent::Halted(e.to_string()));
            }
        }
    }

    fn play(&mut self, id: TrackId) {
        if let Some(event) = self.decks.get_mut(&id).and_then(Deck::play) {
            self.emit(id, event);
        }
    }

    fn pause(&mut self, id: TrackId) {
        if let Some(event) = self.decks.get_mut(&id).and_then(Deck::pause) {
            self.emit(id, event);
        }
    }

    fn seek(&mut self, id: TrackId, to: Duration) {
        let Some(deck) = self.decks.get_mut(&id) else {
            return;
        };

        if !deck.seek_in_place(to) {
            let stream = match self.stream.as_ref() {
                Ok(s) => s,
                Err(e) => {
                    warn!("track {id}: cannot seek without an output device: {e}");
                    return;
                }
            };
            match create_sink_at(stream, deck.path(), to) {
                Ok((sink, _)) => deck.replace_sink(sink, to),
                Err(e) => {
                    warn!("track {id}: seek to {to:?} failed: {e}");
                    return;
                }
            }
        }

        self.emit(id, MediaEvent::TimeAdvance);
    }

    fn tick(&mut self) {
        let events: Vec<(TrackId, MediaEvent)> = self
            .decks
            .iter_mut()
            .filter_map(|(&id, deck)| deck.tick().map(|event| (id, event)))
            .collect();

        for (id, event) in events {
            self.emit(id, event);
        }
    }
}

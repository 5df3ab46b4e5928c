//! Remote command channel: a session-bus service that turns remote calls into
//! opaque commands for the UI thread.
//!
//! The service runs on its own thread and only ever posts to the UI queue.
//! What a command means is not interpreted here or by the receiver: every
//! delivered command is one transport toggle. The current status is
//! published back through `RemoteHandle` for remote callers to read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use async_io::{Timer, block_on};
use log::{debug, error, info};
use zbus::{Connection, interface};

use crate::config::RemoteSettings;
use crate::dispatch::{UiMsg, UiPoster};
use crate::playback::PlaybackStatus;

/// How often the service thread checks for cancellation.
const CANCEL_POLL: Duration = Duration::from_millis(100);

/// A discrete remote instruction. The payload is carried, never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    payload: String,
}

impl RemoteCommand {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

#[derive(Debug, Default)]
struct SharedState {
    status: PlaybackStatus,
    track: Option<String>,
}

/// UI-side handle for publishing state to remote callers.
#[derive(Clone)]
pub struct RemoteHandle {
    state: Arc<Mutex<SharedState>>,
}

impl RemoteHandle {
    pub fn set_status(&self, status: PlaybackStatus) {
        if let Ok(mut s) = self.state.lock() {
            s.status = status;
        }
    }

    pub fn set_track(&self, name: Option<&str>) {
        if let Ok(mut s) = self.state.lock() {
            s.track = name.map(str::to_string);
        }
    }
}

struct RemoteIface {
    poster: UiPoster,
    state: Arc<Mutex<SharedState>>,
}

impl RemoteIface {
    fn deliver(&self, payload: String) {
        debug!("remote command received: {payload:?}");
        if !self.poster.post(UiMsg::Remote(RemoteCommand::new(payload))) {
            debug!("remote command dropped, UI queue closed");
        }
    }
}

#[interface(name = "org.encore.Remote")]
impl RemoteIface {
    fn toggle(&self) {
        self.deliver("toggle".to_string());
    }

    fn command(&self, payload: String) {
        self.deliver(payload);
    }

    #[zbus(property)]
    fn status(&self) -> String {
        self.state
            .lock()
            .map(|s| s.status.as_str())
            .unwrap_or(PlaybackStatus::Unknown.as_str())
            .to_string()
    }

    #[zbus(property)]
    fn track(&self) -> String {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.track.clone())
            .unwrap_or_default()
    }
}

/// Owner of the remote service thread.
pub struct RemoteCommandChannel {
    settings: RemoteSettings,
    state: Arc<Mutex<SharedState>>,
    cancel: Option<Arc<AtomicBool>>,
}

impl RemoteCommandChannel {
    pub fn new(settings: RemoteSettings) -> Self {
        Self {
            settings,
            state: Arc::new(Mutex::new(SharedState::default())),
            cancel: None,
        }
    }

    pub fn handle(&self) -> RemoteHandle {
        RemoteHandle {
            state: self.state.clone(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|c| !c.load(Ordering::Acquire))
    }

    /// Start the service thread. No-op while already running; after
    /// `cancel` it starts a fresh service.
    pub fn start(&mut self, poster: UiPoster) {
        let Some(cancel) = self.arm() else {
            return;
        };

        let iface = RemoteIface {
            poster,
            state: self.state.clone(),
        };
        let bus_name = self.settings.bus_name.clone();
        let object_path = self.settings.object_path.clone();

        thread::spawn(move || {
            block_on(serve(iface, bus_name, object_path, cancel));
        });
    }

    /// Hand out a fresh cancel flag for a new service, or `None` while one
    /// is already running.
    fn arm(&mut self) -> Option<Arc<AtomicBool>> {
        if self.is_running() {
            return None;
        }
        let cancel = Arc::new(AtomicBool::new(false));
        self.cancel = Some(cancel.clone());
        Some(cancel)
    }

    /// Ask the service to stop. Does not wait; safe to call repeatedly,
    /// including while a previous cancellation is still in progress.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.store(true, Ordering::Release);
            info!("remote command channel cancelled");
        }
    }
}

async fn serve(
    iface: RemoteIface,
    bus_name: String,
    object_path: String,
    cancel: Arc<AtomicBool>,
) {
    let connection = match Connection::session().await {
        Ok(c) => c,
        Err(e) => {
            error!("remote: failed to connect to session bus: {e}");
            return;
        }
    };

    if let Err(e) = connection.request_name(bus_name.as_str()).await {
        error!("remote: failed to acquire name {bus_name}: {e}");
        return;
    }

    if let Err(e) = connection
        .object_server()
        .at(object_path.as_str(), iface)
        .await
    {
        error!("remote: failed to register interface at {object_path}: {e}");
        return;
    }
    info!("remote command channel listening as {bus_name} at {object_path}");

    while !cancel.load(Ordering::Acquire) {
        Timer::after(CANCEL_POLL).await;
    }

    if let Err(e) = connection.release_name(bus_name.as_str()).await {
        debug!("remote: failed to release {bus_name}: {e}");
    }
    info!("remote command channel stopped");
}

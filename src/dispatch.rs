//! Single-writer dispatch queue.
//!
//! Only the UI thread mutates playback state or issues player commands. The
//! media engine and the remote command service run on their own threads and
//! hand their observations over with `UiPoster::post`; the UI loop drains the
//! `UiQueue` once per iteration and applies messages in arrival order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::media::{MediaEvent, TrackId};
use crate::remote::RemoteCommand;

/// A unit of work marshalled onto the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum UiMsg {
    Media { track: TrackId, event: MediaEvent },
    Remote(RemoteCommand),
}

/// Producer side. Cheap to clone; one per producer thread.
#[derive(Clone)]
pub struct UiPoster {
    tx: Sender<UiMsg>,
    closed: Arc<AtomicBool>,
}

impl UiPoster {
    /// Post `msg` to the UI thread. Returns `false` once teardown has begun or
    /// the queue is gone; the message is dropped in that case.
    pub fn post(&self, msg: UiMsg) -> bool {
        if self.closed.load(Ordering::Acquire) {
            return false;
        }
        self.tx.send(msg).is_ok()
    }
}

/// Consumer side, owned by the UI thread.
pub struct UiQueue {
    rx: Receiver<UiMsg>,
    closed: Arc<AtomicBool>,
}

impl UiQueue {
    /// Take every message posted so far, oldest first.
    pub fn drain(&self) -> Vec<UiMsg> {
        if self.is_closed() {
            return Vec::new();
        }
        std::iter::from_fn(|| self.rx.try_recv().ok()).collect()
    }

    /// Stop accepting messages and discard anything still pending.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        while self.rx.try_recv().is_ok() {}
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

pub fn channel() -> (UiPoster, UiQueue) {
    let (tx, rx) = mpsc::channel::<UiMsg>();
    let closed = Arc::new(AtomicBool::new(false));
    (
        UiPoster {
            tx,
            closed: closed.clone(),
        },
        UiQueue { rx, closed },
    )
}

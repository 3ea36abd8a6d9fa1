//! Repaint notifications.
//!
//! Every published state transition sends a repaint signal. Embedding
//! applications wait on the receiver and re-render; bursts of transitions
//! collapse into a single repaint.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

/// Sender half of the repaint channel.
#[derive(Clone, Debug)]
pub struct RepaintSender {
    tx: mpsc::Sender<()>,
}

impl RepaintSender {
    /// Send a repaint signal.
    ///
    /// Non-blocking. Errors are ignored (full = a repaint is already queued,
    /// closed = nobody is listening).
    pub fn send(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Receiver half of the repaint channel.
#[derive(Debug)]
pub struct RepaintReceiver {
    rx: mpsc::Receiver<()>,
}

impl RepaintReceiver {
    /// Wait for a repaint signal.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    /// Drain all pending signals so they collapse into one repaint.
    pub fn drain(&mut self) {
        while self.rx.try_recv().is_ok() {}
    }
}

/// Create a new repaint channel pair.
pub fn channel() -> (RepaintSender, RepaintReceiver) {
    let (tx, rx) = mpsc::channel(16);
    (RepaintSender { tx }, RepaintReceiver { rx })
}

/// Slot for a sender installed after construction.
#[derive(Debug, Default, Clone)]
pub(crate) struct RepaintHandle {
    inner: Arc<Mutex<Option<RepaintSender>>>,
}

impl RepaintHandle {
    pub(crate) fn install(&self, sender: RepaintSender) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(sender);
        }
    }

    pub(crate) fn send(&self) {
        if let Ok(guard) = self.inner.lock()
            && let Some(sender) = guard.as_ref()
        {
            sender.send();
        }
    }
}

//! Refresh debouncing for hotplug bursts
//!
//! A single timer task owns the deadline. Every [`Debouncer::request`] pushes
//! it to `now + WINDOW`; when the deadline passes the task sends exactly one
//! [`Message::RefreshDue`] and goes back to idle.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};

use scrl_core::prelude::*;

use crate::message::Message;

/// Quiet period after the last request before a refresh is sent
pub const WINDOW: Duration = Duration::from_secs(1);

/// Handle for requesting a debounced refresh
#[derive(Debug, Clone)]
pub struct Debouncer {
    request_tx: mpsc::UnboundedSender<()>,
}

impl Debouncer {
    /// Spawn the timer task. It ends on shutdown or when every handle is dropped.
    pub fn spawn(msg_tx: mpsc::Sender<Message>, shutdown_rx: watch::Receiver<bool>) -> Self {
        Self::with_window(WINDOW, msg_tx, shutdown_rx)
    }

    pub fn with_window(
        window: Duration,
        msg_tx: mpsc::Sender<Message>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<()>();

        tokio::spawn(async move {
            loop {
                // Idle until the first request of a burst
                tokio::select! {
                    req = request_rx.recv() => {
                        if req.is_none() {
                            return;
                        }
                    }
                    _ = shutdown_rx.changed() => return,
                }

                let timer = sleep_until(Instant::now() + window);
                tokio::pin!(timer);

                loop {
                    tokio::select! {
                        _ = &mut timer => break,
                        req = request_rx.recv() => {
                            if req.is_none() {
                                return;
                            }
                            timer.as_mut().reset(Instant::now() + window);
                        }
                        _ = shutdown_rx.changed() => return,
                    }
                }

                trace!("Debounce window elapsed, requesting refresh");
                if msg_tx.send(Message::RefreshDue).await.is_err() {
                    return;
                }
            }
        });

        Self { request_tx }
    }

    /// Request a refresh; restarts the window
    pub fn request(&self) {
        let _ = self.request_tx.send(());
    }
}

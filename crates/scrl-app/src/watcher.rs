//! Hotplug watcher
//!
//! Keeps a `track-devices` stream running for the lifetime of the app and
//! turns every device change into a debounced refresh request. The stream is
//! restarted whenever it ends; the first line of each stream is the current
//! device table and is not treated as a change.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use scrl_core::prelude::*;
use scrl_daemon::Bridge;

use crate::debounce::Debouncer;
use crate::message::Message;

/// Wait before restarting after the stream ended or failed
pub const RESTART_DELAY: Duration = Duration::from_secs(2);

/// Wait before retrying when the bridge executable is missing
pub const TOOL_MISSING_DELAY: Duration = Duration::from_secs(5);

/// Owns the watcher task; stopping terminates the live tracking subprocess
pub struct HotplugWatcher {
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl HotplugWatcher {
    /// Start watching in a background task
    pub fn start<B: Bridge + Send + Sync + 'static>(
        bridge: Arc<B>,
        debouncer: Debouncer,
        msg_tx: mpsc::Sender<Message>,
    ) -> Self {
        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            run_watcher(bridge.as_ref(), debouncer, msg_tx, stop_rx).await;
        });

        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Stop the watcher. Idempotent.
    pub fn stop(&mut self) {
        let _ = self.stop_tx.send(true);
        self.handle = None;
    }

    /// Check if the watcher task is still alive
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for HotplugWatcher {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
    }
}

async fn run_watcher<B: Bridge + ?Sized>(
    bridge: &B,
    debouncer: Debouncer,
    msg_tx: mpsc::Sender<Message>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut announced = false;
    let mut missing_reported = false;

    loop {
        if *stop_rx.borrow() {
            break;
        }

        let delay = match bridge.track_devices().await {
            Ok(mut tracker) => {
                if !announced {
                    announced = true;
                    info!("Hotplug watcher started");
                    let _ = msg_tx.send(Message::HotplugStarted).await;
                }
                missing_reported = false;

                let mut first = true;
                loop {
                    tokio::select! {
                        line = tracker.next_line() => match line {
                            Some(_) if first => {
                                first = false;
                                trace!("Discarding initial device table");
                            }
                            Some(line) => {
                                if !line.trim().is_empty() {
                                    debug!("Device change: {}", line.trim());
                                    debouncer.request();
                                }
                            }
                            None => break,
                        },
                        _ = stop_rx.changed() => {
                            tracker.terminate();
                            info!("Hotplug watcher stopped");
                            return;
                        }
                    }
                }

                debug!("track-devices ended, restarting in {:?}", RESTART_DELAY);
                RESTART_DELAY
            }
            Err(e) if e.is_tool_missing() => {
                if !missing_reported {
                    missing_reported = true;
                    warn!("Hotplug watcher: {}", e);
                    let _ = msg_tx.send(Message::HotplugToolMissing).await;
                }
                TOOL_MISSING_DELAY
            }
            Err(e) => {
                warn!("Hotplug watcher failed to start: {}", e);
                RESTART_DELAY
            }
        };

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = stop_rx.changed() => break,
        }
    }

    info!("Hotplug watcher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrl_daemon::test_utils::FakeBridge;

    struct Counts {
        refreshes: usize,
        started: usize,
        tool_missing: usize,
    }

    fn drain(rx: &mut mpsc::Receiver<Message>) -> Counts {
        let mut counts = Counts {
            refreshes: 0,
            started: 0,
            tool_missing: 0,
        };
        while let Ok(msg) = rx.try_recv() {
            match msg {
                Message::RefreshDue => counts.refreshes += 1,
                Message::HotplugStarted => counts.started += 1,
                Message::HotplugToolMissing => counts.tool_missing += 1,
                _ => {}
            }
        }
        counts
    }

    fn start(bridge: &FakeBridge) -> (HotplugWatcher, mpsc::Receiver<Message>, watch::Sender<bool>) {
        let (tx, rx) = mpsc::channel(64);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let debouncer = Debouncer::spawn(tx.clone(), shutdown_rx);
        let watcher = HotplugWatcher::start(Arc::new(bridge.clone()), debouncer, tx);
        (watcher, rx, shutdown_tx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_changes_gives_one_refresh() {
        let bridge = FakeBridge::new().track_session(&[
            "0016ABC123\tdevice",
            "0000",
            "0016ABC123\tdevice",
            "0019ABC123\toffline",
            "0000",
        ]);
        let (_watcher, mut rx, _shutdown) = start(&bridge);

        tokio::time::sleep(Duration::from_secs(3)).await;

        let counts = drain(&mut rx);
        assert_eq!(counts.started, 1);
        assert_eq!(counts.refreshes, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_line_is_not_a_change() {
        let bridge = FakeBridge::new().track_session(&["0016ABC123\tdevice"]);
        let (_watcher, mut rx, _shutdown) = start(&bridge);

        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(drain(&mut rx).refreshes, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_discards_first_line_again() {
        let bridge = FakeBridge::new()
            .track_session_closing(&["initial", "0000"])
            .track_session(&["0016ABC123\tdevice"]);
        let (_watcher, mut rx, _shutdown) = start(&bridge);

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert_eq!(bridge.track_starts(), 2);
        let counts = drain(&mut rx);
        // Only "0000" from the first stream; the restart's first line is ignored
        assert_eq!(counts.refreshes, 1);
        assert_eq!(counts.started, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_tool_retries_slowly() {
        let bridge = FakeBridge::new().missing_tool();
        let (_watcher, mut rx, _shutdown) = start(&bridge);

        tokio::time::sleep(Duration::from_secs(12)).await;

        // Attempts at 0s, 5s and 10s
        assert_eq!(bridge.track_starts(), 3);
        let counts = drain(&mut rx);
        assert_eq!(counts.tool_missing, 1);
        assert_eq!(counts.started, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_task_and_tracking() {
        let bridge = FakeBridge::new().track_session(&["initial"]);
        let (tx, _rx) = mpsc::channel(64);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let debouncer = Debouncer::spawn(tx.clone(), shutdown_rx);
        let mut watcher = HotplugWatcher::start(Arc::new(bridge.clone()), debouncer, tx);

        tokio::time::sleep(Duration::from_millis(100)).await;
        let handle = watcher.handle.take().unwrap();
        watcher.stop();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("watcher did not stop")
            .unwrap();
        assert!(!watcher.is_running());

        // No restart after stop
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(bridge.track_starts(), 1);
        assert_eq!(bridge.track_terminations(), 1);
    }
}

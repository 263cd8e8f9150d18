//! Engine - orchestration state for the launcher
//!
//! The Engine owns the TEA state, the message channel, the shutdown signal,
//! the hotplug watcher and the settings file location. Frontends (the TUI
//! runner, end-to-end tests) feed it messages and read `state` to render.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use scrl_core::prelude::*;
use scrl_core::{AppPhase, LogEntry, LogSource};
use scrl_daemon::{AdbBridge, Bridge, ToolPaths};

use crate::actions::ActionContext;
use crate::config::{save_settings, Settings};
use crate::debounce::Debouncer;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::{AppState, UiMode};
use crate::watcher::HotplugWatcher;

/// Message channel capacity
const CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for the launcher.
///
/// Encapsulates:
/// - TEA state management
/// - Message channel
/// - Shutdown signaling
/// - Hotplug watcher and refresh debouncer
/// - Settings persistence
pub struct Engine<B: Bridge + Send + Sync + 'static = AdbBridge> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Sender for the shutdown signal. Send `true` to initiate shutdown.
    shutdown_tx: watch::Sender<bool>,

    /// Channel, bridge and config path shared with background tasks
    ctx: ActionContext<B>,

    /// Started by [`Engine::start`]
    watcher: Option<HotplugWatcher>,
}

impl<B: Bridge + Send + Sync + 'static> Engine<B> {
    /// Create an engine. Nothing runs until [`Engine::start`].
    pub fn new(bridge: B, tools: ToolPaths, settings: Settings, config_path: PathBuf) -> Self {
        let state = AppState::new(settings, tools);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            state,
            msg_rx,
            shutdown_tx,
            ctx: ActionContext {
                msg_tx,
                bridge: Arc::new(bridge),
                shutdown_rx,
                config_path,
            },
            watcher: None,
        }
    }

    /// Spawn the signal handler and hotplug watcher, then run the first
    /// enumeration.
    pub fn start(&mut self) {
        signals::spawn_signal_handler(self.msg_sender());

        let debouncer = Debouncer::spawn(self.msg_sender(), self.shutdown_receiver());
        self.watcher = Some(HotplugWatcher::start(
            self.ctx.bridge.clone(),
            debouncer,
            self.msg_sender(),
        ));

        for tool in self.state.tools.availability().missing() {
            let text = Error::tool_not_found(tool).to_string();
            warn!("{}", text);
            self.state.add_log(LogEntry::warn(LogSource::App, text));
        }

        if self.state.show_onboarding {
            self.state.ui_mode = UiMode::Onboarding;
        }

        self.state.phase = AppPhase::Running;
        info!("Launcher started");
        self.process_message(Message::RefreshDevices);
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.ctx);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message and process it. Returns `false` once the
    /// channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.ctx.msg_tx.clone()
    }

    /// Get a clone of the shutdown receiver for background tasks.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.ctx.shutdown_rx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop the watcher, signal background tasks and save settings.
    ///
    /// A running mirror is left alone; its window outlives the launcher.
    pub fn shutdown(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            watcher.stop();
        }

        let _ = self.shutdown_tx.send(true);

        if let Some(session) = self.state.session.as_ref().filter(|s| s.is_running()) {
            info!(
                "Leaving mirror of {} running (pid {:?})",
                session.label,
                session.pid()
            );
        }

        if let Err(e) = save_settings(&self.ctx.config_path, &self.state.to_settings()) {
            warn!("Failed to save settings on exit: {}", e);
        }
        info!("Launcher shut down");
    }
}

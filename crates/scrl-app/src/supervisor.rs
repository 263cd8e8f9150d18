//! Session supervision for the mirroring child
//!
//! At most one [`MirrorSession`] exists at a time; it lives in
//! [`AppState::session`] and is dropped when the child's exit is reported.

use std::time::Duration;

use tokio::sync::mpsc;

use scrl_core::prelude::*;
use scrl_core::{MirrorEvent, SupervisionMode};
use scrl_daemon::{MirrorCommand, MirrorProcess};

use crate::message::{LaunchFailure, Message};
use crate::state::AppState;

/// Delay between a monitored child's exit and the launcher quitting
pub const MONITORING_EXIT_GRACE: Duration = Duration::from_millis(500);

/// Everything needed to start one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub command: MirrorCommand,
    pub serial: String,
    pub label: String,
    pub mode: SupervisionMode,
}

/// A running mirroring session
#[derive(Debug)]
pub struct MirrorSession {
    process: MirrorProcess,
    pub serial: String,
    pub label: String,
}

impl MirrorSession {
    pub fn mode(&self) -> SupervisionMode {
        self.process.mode()
    }

    pub fn pid(&self) -> Option<u32> {
        self.process.id()
    }

    pub fn is_running(&self) -> bool {
        self.process.is_running()
    }
}

/// Spawn the mirroring child and forward its events as [`Message::Mirror`]
pub fn launch(request: &LaunchRequest, msg_tx: &mpsc::Sender<Message>) -> Result<MirrorSession> {
    let (event_tx, mut event_rx) = mpsc::channel::<MirrorEvent>(256);
    let process = MirrorProcess::spawn(&request.command, request.mode, event_tx)?;

    let tx = msg_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if tx.send(Message::Mirror(event)).await.is_err() {
                debug!("Message channel closed, dropping mirror events");
                break;
            }
        }
    });

    Ok(MirrorSession {
        process,
        serial: request.serial.clone(),
        label: request.label.clone(),
    })
}

/// Start a session unless one is already running.
///
/// Returns the follow-up message for the update loop.
pub fn start(state: &mut AppState, request: LaunchRequest, msg_tx: &mpsc::Sender<Message>) -> Message {
    if state.session.is_some() {
        warn!("Launch rejected: {}", Error::SessionActive);
        return Message::MirrorLaunchFailed {
            failure: LaunchFailure::SessionActive,
        };
    }

    match launch(&request, msg_tx) {
        Ok(session) => {
            info!(
                "Mirroring {} ({:?}, pid {:?})",
                session.serial,
                session.mode(),
                session.pid()
            );
            state.session = Some(session);
            Message::MirrorSpawned { mode: request.mode }
        }
        Err(Error::ToolNotFound { .. }) => {
            let path = request.command.program.display().to_string();
            error!("Mirroring tool not found: {}", path);
            Message::MirrorLaunchFailed {
                failure: LaunchFailure::ToolMissing { path },
            }
        }
        Err(e) => {
            error!("Failed to launch mirroring tool: {}", e);
            Message::MirrorLaunchFailed {
                failure: LaunchFailure::Spawn {
                    reason: e.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use scrl_core::SessionState;
    use scrl_daemon::ToolPaths;
    use std::path::PathBuf;

    fn request(program: &str, args: &[&str], mode: SupervisionMode) -> LaunchRequest {
        LaunchRequest {
            command: MirrorCommand {
                program: PathBuf::from(program),
                args: args.iter().map(|a| a.to_string()).collect(),
                working_dir: None,
                adb: None,
            },
            serial: "ABC123".into(),
            label: "Sample X1 (ABC123)".into(),
            mode,
        }
    }

    fn state() -> AppState {
        AppState::new(Settings::default(), ToolPaths::default())
    }

    #[tokio::test]
    async fn test_start_missing_tool_keeps_idle() {
        let (tx, _rx) = mpsc::channel(8);
        let mut state = state();
        let msg = start(
            &mut state,
            request("/nonexistent/scrl-test/scrcpy", &[], SupervisionMode::Silent),
            &tx,
        );
        assert!(matches!(
            msg,
            Message::MirrorLaunchFailed {
                failure: LaunchFailure::ToolMissing { .. }
            }
        ));
        assert!(state.session.is_none());
        assert_eq!(state.session_state(), SessionState::Idle);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_start_stores_session_and_forwards_exit() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut state = state();
        let msg = start(&mut state, request("true", &[], SupervisionMode::Silent), &tx);

        assert!(matches!(
            msg,
            Message::MirrorSpawned {
                mode: SupervisionMode::Silent
            }
        ));
        assert_eq!(state.session_state(), SessionState::Silent);

        let forwarded = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(
            forwarded,
            Message::Mirror(MirrorEvent::Exited { code: Some(0) })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_second_launch_is_rejected() {
        let (tx, _rx) = mpsc::channel(8);
        let mut state = state();
        start(&mut state, request("sleep", &["2"], SupervisionMode::Silent), &tx);
        assert!(state.session.is_some());

        let msg = start(&mut state, request("true", &[], SupervisionMode::Silent), &tx);
        assert!(matches!(
            msg,
            Message::MirrorLaunchFailed {
                failure: LaunchFailure::SessionActive
            }
        ));
        assert_eq!(state.session.as_ref().unwrap().serial, "ABC123");
    }
}

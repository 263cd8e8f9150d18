//! Mirroring tool (scrcpy) process management

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use scrl_core::events::MirrorEvent;
use scrl_core::params::{StreamParameters, WindowPosition};
use scrl_core::prelude::*;
use scrl_core::types::SupervisionMode;

use crate::bridge::{hide_console, spawn_error};
use crate::tools::{ToolPaths, SCRCPY_PROGRAM};

/// How often a silent session checks whether the child is still alive
pub const LIVENESS_POLL: Duration = Duration::from_millis(500);

/// How long the wait task lets output readers drain after exit
const READER_DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Offset of a corner-anchored window from the screen edges
const WINDOW_MARGIN: u32 = 50;

/// Distance of a top-right window's left edge from the right screen edge
const TOP_RIGHT_OFFSET: u32 = 500;

/// Build the mirroring tool's argument list from typed parameters
pub fn build_args(serial: &str, params: &StreamParameters, host_screen_width: u32) -> Vec<String> {
    let mut args = vec!["-s".to_string(), serial.to_string()];

    if let Some(px) = params.max_dimension.pixels() {
        args.push("-m".to_string());
        args.push(px.to_string());
    }

    args.push(format!("--max-fps={}", params.max_fps.value()));
    args.push(format!("--video-codec={}", params.codec.as_arg()));
    args.push("-b".to_string());
    args.push(format!("{}M", params.bitrate.mbps()));

    if params.screen_off {
        args.push("--turn-screen-off".to_string());
    }
    if params.borderless {
        args.push("--window-borderless".to_string());
    }
    if params.print_fps {
        args.push("--print-fps".to_string());
    }

    let origin = match params.window_position {
        WindowPosition::Center => None,
        WindowPosition::TopLeft => Some((WINDOW_MARGIN, WINDOW_MARGIN)),
        WindowPosition::TopRight => Some((
            host_screen_width.saturating_sub(TOP_RIGHT_OFFSET),
            WINDOW_MARGIN,
        )),
    };
    if let Some((x, y)) = origin {
        args.extend([
            "--window-x".to_string(),
            x.to_string(),
            "--window-y".to_string(),
            y.to_string(),
        ]);
    }

    args.push("--shortcut-mod=lctrl".to_string());
    args
}

/// Fully assembled mirroring invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    /// Exported as `ADB` so the mirroring tool uses the same bridge binary
    pub adb: Option<PathBuf>,
}

impl MirrorCommand {
    pub fn new(
        tools: &ToolPaths,
        serial: &str,
        params: &StreamParameters,
        host_screen_width: u32,
    ) -> Self {
        Self {
            program: tools.scrcpy.clone(),
            args: build_args(serial, params, host_screen_width),
            working_dir: tools.working_dir.clone(),
            adb: Some(tools.adb.clone()).filter(|p| p.is_absolute()),
        }
    }

    /// Shell-style rendering for the launch log
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// A running mirroring child.
///
/// The `Child` is owned by a background wait task that emits
/// [`MirrorEvent::Exited`] exactly once. The mirror window is independent of
/// the launcher, so dropping this handle does not kill the child.
#[derive(Debug)]
pub struct MirrorProcess {
    pid: Option<u32>,
    mode: SupervisionMode,
    /// Set by the wait task once the child has exited
    exited: Arc<AtomicBool>,
}

impl MirrorProcess {
    /// Spawn the mirroring tool and start supervising it.
    ///
    /// In [`SupervisionMode::Monitoring`] every stdout/stderr line is sent as
    /// [`MirrorEvent::Output`]; in [`SupervisionMode::Silent`] output is
    /// discarded and exit is detected by polling.
    pub fn spawn(
        command: &MirrorCommand,
        mode: SupervisionMode,
        event_tx: mpsc::Sender<MirrorEvent>,
    ) -> Result<Self> {
        info!("Spawning mirror: {}", command.command_line());

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .kill_on_drop(false);
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }
        if let Some(adb) = &command.adb {
            cmd.env("ADB", adb);
        }
        if mode.captures_output() {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        hide_console(&mut cmd);

        let mut child = cmd
            .spawn()
            .map_err(|e| spawn_error(SCRCPY_PROGRAM, e))?;

        let pid = child.id();
        info!("Mirror process started with PID: {:?} ({:?})", pid, mode);

        let exited = Arc::new(AtomicBool::new(false));

        match mode {
            SupervisionMode::Monitoring => {
                let mut readers = Vec::with_capacity(2);
                if let Some(stdout) = child.stdout.take() {
                    readers.push(tokio::spawn(Self::output_reader(stdout, event_tx.clone())));
                }
                if let Some(stderr) = child.stderr.take() {
                    readers.push(tokio::spawn(Self::output_reader(stderr, event_tx.clone())));
                }
                tokio::spawn(Self::wait_for_exit(
                    child,
                    readers,
                    event_tx,
                    Arc::clone(&exited),
                ));
            }
            SupervisionMode::Silent => {
                tokio::spawn(Self::poll_for_exit(child, event_tx, Arc::clone(&exited)));
            }
        }

        Ok(Self { pid, mode, exited })
    }

    /// Forward each line of one output stream
    async fn output_reader<R>(stream: R, tx: mpsc::Sender<MirrorEvent>)
    where
        R: AsyncRead + Unpin,
    {
        let mut lines = BufReader::new(stream).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim_end().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    if tx.send(MirrorEvent::Output(line)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Error reading mirror output: {}", e);
                    break;
                }
            }
        }
        debug!("Mirror output stream ended");
    }

    /// Monitoring mode: wait for exit, let readers drain, report the code
    async fn wait_for_exit(
        mut child: Child,
        readers: Vec<JoinHandle<()>>,
        event_tx: mpsc::Sender<MirrorEvent>,
        exited: Arc<AtomicBool>,
    ) {
        let code = match child.wait().await {
            Ok(status) => {
                info!("Mirror process exited with status: {:?}", status);
                status.code()
            }
            Err(e) => {
                error!("Error waiting for mirror process: {}", e);
                None
            }
        };

        for reader in readers {
            if tokio::time::timeout(READER_DRAIN_TIMEOUT, reader).await.is_err() {
                debug!("Mirror output reader did not finish in time");
            }
        }

        Self::report_exit(code, &event_tx, &exited).await;
    }

    /// Silent mode: check liveness on a fixed interval
    async fn poll_for_exit(
        mut child: Child,
        event_tx: mpsc::Sender<MirrorEvent>,
        exited: Arc<AtomicBool>,
    ) {
        let mut interval = tokio::time::interval(LIVENESS_POLL);
        let code = loop {
            interval.tick().await;
            match child.try_wait() {
                Ok(Some(status)) => {
                    info!("Mirror process exited with status: {:?}", status);
                    break status.code();
                }
                Ok(None) => continue,
                Err(e) => {
                    error!("Error polling mirror process: {}", e);
                    break None;
                }
            }
        };

        Self::report_exit(code, &event_tx, &exited).await;
    }

    async fn report_exit(
        code: Option<i32>,
        event_tx: &mpsc::Sender<MirrorEvent>,
        exited: &AtomicBool,
    ) {
        // Flag first so `has_exited()` is true before the event is observed
        exited.store(true, Ordering::Release);
        debug!("Sending MirrorEvent::Exited {{ code: {:?} }}", code);
        let _ = event_tx.send(MirrorEvent::Exited { code }).await;
    }

    pub fn id(&self) -> Option<u32> {
        self.pid
    }

    pub fn mode(&self) -> SupervisionMode {
        self.mode
    }

    pub fn has_exited(&self) -> bool {
        self.exited.load(Ordering::Acquire)
    }

    pub fn is_running(&self) -> bool {
        !self.has_exited()
    }
}

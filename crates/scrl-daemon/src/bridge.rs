//! Device bridge (adb) invocation
//!
//! Every call except the tracking stream is bounded by a timeout. The
//! [`Bridge`] trait is the seam used by the rest of the launcher so that
//! directory, probe and wireless logic can run against scripted output in
//! tests.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

use scrl_core::prelude::*;

/// Default bridge executable name
pub const ADB_PROGRAM: &str = "adb";

/// Captured result of one bridge command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` if terminated by a signal
    pub status: Option<i32>,
}

impl CommandOutput {
    /// Successful output with the given stdout
    pub fn from_stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            status: Some(0),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// stdout and stderr joined, trimmed
    pub fn combined(&self) -> String {
        let out = self.stdout.trim();
        let err = self.stderr.trim();
        match (out.is_empty(), err.is_empty()) {
            (false, false) => format!("{}\n{}", out, err),
            (false, true) => out.to_string(),
            (true, _) => err.to_string(),
        }
    }
}

#[trait_variant::make(Bridge: Send)]
pub trait LocalBridge {
    /// Run one bridge command to completion, giving up after `limit`.
    async fn run(&self, args: &[&str], limit: Duration) -> Result<CommandOutput>;

    /// Start the long-lived device tracking stream (`track-devices`).
    async fn track_devices(&self) -> Result<DeviceTracker>;
}

/// Line stream from a running `track-devices` subprocess.
///
/// Dropping the tracker or calling [`DeviceTracker::terminate`] stops the
/// subprocess.
pub struct DeviceTracker {
    lines: mpsc::Receiver<String>,
    kill_tx: Option<oneshot::Sender<()>>,
}

impl DeviceTracker {
    /// Assemble a tracker from an existing line channel. The producer should
    /// stop when `kill_rx` resolves.
    pub fn from_parts(lines: mpsc::Receiver<String>, kill_tx: oneshot::Sender<()>) -> Self {
        Self {
            lines,
            kill_tx: Some(kill_tx),
        }
    }

    fn spawn(child: Child, stdout: ChildStdout) -> Self {
        let (line_tx, lines) = mpsc::channel::<String>(64);
        let (kill_tx, kill_rx) = oneshot::channel::<()>();
        tokio::spawn(Self::pump(child, stdout, line_tx, kill_rx));
        Self::from_parts(lines, kill_tx)
    }

    /// Background task: forwards stdout lines until EOF or a stop request.
    async fn pump(
        mut child: Child,
        stdout: ChildStdout,
        tx: mpsc::Sender<String>,
        mut kill_rx: oneshot::Receiver<()>,
    ) {
        let mut reader = BufReader::new(stdout).lines();
        let stopped = loop {
            tokio::select! {
                line = reader.next_line() => match line {
                    Ok(Some(line)) => {
                        trace!("track-devices: {}", line);
                        if tx.send(line).await.is_err() {
                            break true;
                        }
                    }
                    Ok(None) => break false,
                    Err(e) => {
                        warn!("track-devices read error: {}", e);
                        break false;
                    }
                },
                _ = &mut kill_rx => break true,
            }
        };

        if stopped {
            if let Err(e) = child.kill().await {
                debug!("track-devices kill failed: {}", e);
            }
        } else {
            match child.wait().await {
                Ok(status) => debug!("track-devices exited: {:?}", status),
                Err(e) => debug!("track-devices wait failed: {}", e),
            }
        }
    }

    /// Next line, or `None` once the subprocess has ended
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }

    /// Ask the subprocess to stop. Idempotent.
    pub fn terminate(&mut self) {
        if let Some(tx) = self.kill_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for DeviceTracker {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Real bridge backed by the `adb` executable
#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: PathBuf,
}

impl AdbBridge {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        hide_console(&mut cmd);
        cmd
    }
}

impl Default for AdbBridge {
    fn default() -> Self {
        Self::new(ADB_PROGRAM)
    }
}

impl Bridge for AdbBridge {
    async fn run(&self, args: &[&str], limit: Duration) -> Result<CommandOutput> {
        let label = describe(args);
        debug!("Running {}", label);

        let child = self
            .command(args)
            .spawn()
            .map_err(|e| spawn_error(ADB_PROGRAM, e))?;

        // Dropping the future on timeout drops the child, which kills it.
        let output = timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| Error::timeout(label.as_str(), limit))??;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        };
        trace!("{} -> {:?}", label, result.status);
        Ok(result)
    }

    async fn track_devices(&self) -> Result<DeviceTracker> {
        let mut child = self
            .command(&["track-devices"])
            .spawn()
            .map_err(|e| spawn_error(ADB_PROGRAM, e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::process("track-devices stdout unavailable"))?;

        info!("Started adb track-devices (pid {:?})", child.id());
        Ok(DeviceTracker::spawn(child, stdout))
    }
}

/// `adb <args>` for logs and timeout errors
pub fn describe(args: &[&str]) -> String {
    format!("{} {}", ADB_PROGRAM, args.join(" "))
}

/// Map a spawn failure to the launcher's error taxonomy
pub(crate) fn spawn_error(tool: &str, e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
        Error::tool_not_found(tool)
    } else {
        Error::ProcessSpawn {
            reason: e.to_string(),
        }
    }
}

/// Keep child processes from flashing a console window on Windows.
#[cfg(windows)]
pub(crate) fn hide_console(cmd: &mut Command) {
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
pub(crate) fn hide_console(_cmd: &mut Command) {}

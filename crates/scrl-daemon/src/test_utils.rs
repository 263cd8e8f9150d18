//! Test utilities for bridge-driven code
//!
//! [`FakeBridge`] answers bridge commands from a script keyed by the joined
//! argument list and hands out scripted `track-devices` sessions.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use scrl_core::prelude::*;

use crate::bridge::{describe, Bridge, CommandOutput, DeviceTracker, ADB_PROGRAM};

/// Scripted answer for one command
#[derive(Debug, Clone)]
pub enum FakeReply {
    Output(CommandOutput),
    Timeout,
    Fail(String),
}

#[derive(Debug, Clone)]
struct TrackScript {
    lines: Vec<String>,
    /// Keep the stream open after the last line until terminated
    hold_open: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    replies: HashMap<String, FakeReply>,
    calls: Vec<String>,
    track_scripts: VecDeque<TrackScript>,
    track_starts: usize,
    track_terminations: usize,
    tool_missing: bool,
}

/// Scripted bridge. Clones share state, so a test can keep one clone for
/// assertions while the code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeBridge {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        // A panicking test thread must not hide the other assertions
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Answer `args` (space-joined) with `stdout` and exit code 0
    pub fn reply(self, args: &str, stdout: &str) -> Self {
        self.set_reply(args, FakeReply::Output(CommandOutput::from_stdout(stdout)));
        self
    }

    /// Make `args` time out
    pub fn reply_timeout(self, args: &str) -> Self {
        self.set_reply(args, FakeReply::Timeout);
        self
    }

    /// Make `args` fail with a process error
    pub fn reply_error(self, args: &str, message: &str) -> Self {
        self.set_reply(args, FakeReply::Fail(message.to_string()));
        self
    }

    /// Replace the scripted answer for `args` on a shared bridge
    pub fn set_reply(&self, args: &str, reply: FakeReply) {
        self.lock().replies.insert(args.to_string(), reply);
    }

    /// Every call fails as if the executable did not exist
    pub fn missing_tool(self) -> Self {
        self.lock().tool_missing = true;
        self
    }

    /// Queue a tracking session that emits `lines` and stays open
    pub fn track_session(self, lines: &[&str]) -> Self {
        self.push_track(lines, true);
        self
    }

    /// Queue a tracking session that emits `lines` and then ends
    pub fn track_session_closing(self, lines: &[&str]) -> Self {
        self.push_track(lines, false);
        self
    }

    fn push_track(&self, lines: &[&str], hold_open: bool) {
        self.lock().track_scripts.push_back(TrackScript {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            hold_open,
        });
    }

    /// All `run` calls so far, space-joined
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, args: &str) -> usize {
        self.lock().calls.iter().filter(|c| *c == args).count()
    }

    /// Number of `track_devices` calls so far
    pub fn track_starts(&self) -> usize {
        self.lock().track_starts
    }

    /// Number of open tracking sessions stopped through their tracker
    pub fn track_terminations(&self) -> usize {
        self.lock().track_terminations
    }
}

impl Bridge for FakeBridge {
    async fn run(&self, args: &[&str], limit: Duration) -> Result<CommandOutput> {
        let key = args.join(" ");
        let reply = {
            let mut state = self.lock();
            state.calls.push(key.clone());
            if state.tool_missing {
                return Err(Error::tool_not_found(ADB_PROGRAM));
            }
            state.replies.get(&key).cloned()
        };

        match reply {
            Some(FakeReply::Output(output)) => Ok(output),
            Some(FakeReply::Timeout) => Err(Error::timeout(describe(args), limit)),
            Some(FakeReply::Fail(message)) => Err(Error::process(message)),
            None => Err(Error::process(format!("no scripted reply for '{}'", key))),
        }
    }

    async fn track_devices(&self) -> Result<DeviceTracker> {
        let script = {
            let mut state = self.lock();
            state.track_starts += 1;
            if state.tool_missing {
                return Err(Error::tool_not_found(ADB_PROGRAM));
            }
            state.track_scripts.pop_front()
        };

        let Some(script) = script else {
            return Err(Error::process("track-devices exited"));
        };

        let (tx, rx) = mpsc::channel(64);
        let (kill_tx, kill_rx) = oneshot::channel::<()>();
        let shared = self.clone();
        tokio::spawn(async move {
            for line in script.lines {
                if tx.send(line).await.is_err() {
                    return;
                }
            }
            if script.hold_open && kill_rx.await.is_ok() {
                shared.lock().track_terminations += 1;
            }
        });

        Ok(DeviceTracker::from_parts(rx, kill_tx))
    }
}

/// `adb devices` output for the given `(serial, state)` rows
pub fn devices_output(rows: &[(&str, &str)]) -> String {
    let mut out = String::from("List of devices attached\n");
    for (serial, state) in rows {
        out.push_str(&format!("{}\t{}\n", serial, state));
    }
    out.push('\n');
    out
}

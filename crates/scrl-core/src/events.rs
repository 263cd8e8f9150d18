//! Events emitted by supervised child processes

/// Output and lifecycle events from the mirroring tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    /// A line from stdout or stderr (monitoring mode only)
    Output(String),
    /// The child exited; `None` when killed by a signal
    Exited { code: Option<i32> },
}

impl MirrorEvent {
    pub fn is_exit(&self) -> bool {
        matches!(self, MirrorEvent::Exited { .. })
    }
}

//! Application error types with rich context

use std::time::Duration;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // External Tool Errors
    // ─────────────────────────────────────────────────────────────
    #[error("'{tool}' not found. Put it on PATH or pass --tools-dir.")]
    ToolNotFound { tool: String },

    #[error("'{command}' timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("Failed to spawn process: {reason}")]
    ProcessSpawn { reason: String },

    #[error("Process error: {message}")]
    Process { message: String },

    #[error("Unrecognized {what} output")]
    ParseMiss { what: String },

    // ─────────────────────────────────────────────────────────────
    // Session Errors
    // ─────────────────────────────────────────────────────────────
    #[error("A mirroring session is already active")]
    SessionActive,

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Build a [`Error::Timeout`] for a command that exceeded `limit`.
    pub fn timeout(command: impl Into<String>, limit: Duration) -> Self {
        Self::Timeout {
            command: command.into(),
            secs: limit.as_secs(),
        }
    }

    pub fn process(message: impl Into<String>) -> Self {
        Self::Process {
            message: message.into(),
        }
    }

    pub fn parse_miss(what: impl Into<String>) -> Self {
        Self::ParseMiss { what: what.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    pub fn is_tool_missing(&self) -> bool {
        matches!(self, Error::ToolNotFound { .. })
    }

    pub fn is_parse_miss(&self) -> bool {
        matches!(self, Error::ParseMiss { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::tool_not_found("adb");
        assert!(err.to_string().contains("'adb' not found"));

        let err = Error::timeout("adb devices", Duration::from_secs(10));
        assert_eq!(err.to_string(), "'adb devices' timed out after 10s");

        assert_eq!(
            Error::SessionActive.to_string(),
            "A mirroring session is already active"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_classification_helpers() {
        assert!(Error::timeout("x", Duration::from_secs(1)).is_timeout());
        assert!(!Error::tool_not_found("adb").is_timeout());
        assert!(Error::tool_not_found("adb").is_tool_missing());
        assert!(Error::parse_miss("wm size").is_parse_miss());
        assert!(!Error::SessionActive.is_parse_miss());
    }
}

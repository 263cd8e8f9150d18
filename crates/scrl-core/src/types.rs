//! Core domain type definitions

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;

/// `ip:port` serials are devices attached over TCP/IP.
static WIRELESS_SERIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+\.\d+:\d+$").expect("valid wireless regex"));

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Initializing,
    Running,
    Quitting,
}

/// Represents a log entry with timestamp
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub source: LogSource,
    pub message: String,
}

impl LogEntry {
    /// Create a new log entry with current timestamp
    pub fn new(level: LogLevel, source: LogSource, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            source,
            message: message.into(),
        }
    }

    /// Create an info log entry
    pub fn info(source: LogSource, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, source, message)
    }

    /// Create an error log entry
    pub fn error(source: LogSource, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, source, message)
    }

    /// Create a warning log entry
    pub fn warn(source: LogSource, message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, source, message)
    }

    /// Format timestamp for display
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    /// Format for single-line display (without wrapping)
    pub fn display_line(&self) -> String {
        format!(
            "{} {} [{}] {}",
            self.formatted_time(),
            self.level.prefix(),
            self.source.prefix(),
            self.message
        )
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Get display prefix for log level
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warning => "WRN",
            LogLevel::Error => "ERR",
        }
    }
}

/// Source of log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    /// Launcher messages
    App,
    /// Device bridge (adb) calls
    Bridge,
    /// Mirroring tool (scrcpy) output
    Mirror,
    /// Hotplug watcher
    Hotplug,
    /// Settings load/save
    Config,
}

impl LogSource {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogSource::App => "app",
            LogSource::Bridge => "adb",
            LogSource::Mirror => "scrcpy",
            LogSource::Hotplug => "hotplug",
            LogSource::Config => "config",
        }
    }
}

/// Whether a serial names a device attached over TCP/IP (`a.b.c.d:port`).
pub fn is_wireless_serial(serial: &str) -> bool {
    WIRELESS_SERIAL.is_match(serial)
}

/// A device reported ready by the bridge tool.
///
/// Rebuilt from scratch on every enumeration; the directory never patches
/// records in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub serial: String,
    pub is_wireless: bool,
    pub display_label: String,
}

impl DeviceRecord {
    pub fn new(serial: impl Into<String>, display_label: impl Into<String>) -> Self {
        let serial = serial.into();
        Self {
            is_wireless: is_wireless_serial(&serial),
            serial,
            display_label: display_label.into(),
        }
    }

    /// IP part of a wireless serial
    pub fn host(&self) -> Option<&str> {
        if !self.is_wireless {
            return None;
        }
        self.serial.rsplit_once(':').map(|(host, _)| host)
    }
}

impl fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label)
    }
}

/// How a running mirroring session is supervised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisionMode {
    /// Launcher shows only the log and streams the child's output; exits when the child exits.
    Monitoring,
    /// Launcher is hidden; output is discarded and the launcher comes back when the child exits.
    Silent,
}

impl SupervisionMode {
    pub fn from_show_log(show_log: bool) -> Self {
        if show_log {
            SupervisionMode::Monitoring
        } else {
            SupervisionMode::Silent
        }
    }

    /// Whether the child's stdout/stderr are piped back to the launcher.
    pub fn captures_output(&self) -> bool {
        matches!(self, SupervisionMode::Monitoring)
    }
}

/// Mirroring session state; a child handle exists iff this is not `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Monitoring,
    Silent,
}

impl From<SupervisionMode> for SessionState {
    fn from(mode: SupervisionMode) -> Self {
        match mode {
            SupervisionMode::Monitoring => SessionState::Monitoring,
            SupervisionMode::Silent => SessionState::Silent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wireless_serial_detection() {
        assert!(is_wireless_serial("192.168.1.5:5555"));
        assert!(is_wireless_serial("10.0.0.2:40123"));
        assert!(!is_wireless_serial("ABC123"));
        assert!(!is_wireless_serial("emulator-5554"));
        assert!(!is_wireless_serial("192.168.1.5"));
        assert!(!is_wireless_serial("adb-XYZ._adb-tls-connect._tcp"));
    }

    #[test]
    fn test_device_record_derives_wireless_flag() {
        let usb = DeviceRecord::new("ABC123", "Sample X1 (ABC123)");
        assert!(!usb.is_wireless);
        assert_eq!(usb.host(), None);

        let tcp = DeviceRecord::new("192.168.1.5:5555", "192.168.1.5:5555 (Wireless)");
        assert!(tcp.is_wireless);
        assert_eq!(tcp.host(), Some("192.168.1.5"));
        assert_eq!(tcp.to_string(), "192.168.1.5:5555 (Wireless)");
    }

    #[test]
    fn test_log_entry_display_line() {
        let entry = LogEntry::warn(LogSource::Mirror, "exited with code 2");
        let line = entry.display_line();
        assert!(line.contains("WRN"));
        assert!(line.contains("[scrcpy]"));
        assert!(line.ends_with("exited with code 2"));
        assert!(!entry.is_error());
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error > LogLevel::Warning);
        assert!(LogLevel::Warning > LogLevel::Info);
    }

    #[test]
    fn test_supervision_mode_from_show_log() {
        assert_eq!(
            SupervisionMode::from_show_log(true),
            SupervisionMode::Monitoring
        );
        assert_eq!(SupervisionMode::from_show_log(false), SupervisionMode::Silent);
        assert!(SupervisionMode::Monitoring.captures_output());
        assert!(!SupervisionMode::Silent.captures_output());
        assert_eq!(
            SessionState::from(SupervisionMode::Silent),
            SessionState::Silent
        );
    }
}

//! Message types for the application (TEA pattern)
//!
//! Background tasks (watcher, debouncer, bridge calls, mirror supervision)
//! communicate with the control loop only through these messages.

use scrl_core::{DeviceRecord, MirrorEvent, Recommendation, SupervisionMode};

use crate::input_key::InputKey;

/// Why a device enumeration produced no list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFailure {
    /// The bridge executable could not be found
    ToolMissing,
    /// `adb devices` did not answer in time
    TimedOut,
    Other(String),
}

/// Why a mirroring launch did not produce a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchFailure {
    /// Another session is still running
    SessionActive,
    /// The mirroring executable was not found
    ToolMissing { path: String },
    Spawn { reason: String },
}

/// Progress of the wireless connect and disconnect flows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WirelessEvent {
    /// The WLAN address of the USB device was read
    DetectedIp { ip: String },
    /// No usable WLAN address; fall back to manual entry
    IpUnavailable,
    EnablingTcpip { device: String },
    /// `tcpip` answered; carries the tool's message
    TcpipEnabled { output: String },
    TcpipFailed { error: String },
    WaitingRestart,
    Connecting { target: String },
    Connected { ip: String, target: String },
    /// `connect` answered without confirming the connection
    ConnectRejected { output: String },
    ConnectTimedOut,
    ConnectError { error: String },
    Disconnected { serial: String },
    DisconnectFailed { error: String },
    /// Every wireless device in the list was disconnected
    AllDisconnected,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from the terminal
    Key(InputKey),

    /// Periodic wake-up from the event loop
    Tick,

    /// Leave the application (key, signal, or end of a monitoring session)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Device Directory
    // ─────────────────────────────────────────────────────────
    /// Re-enumerate devices now (startup, `r`, language switch)
    RefreshDevices,
    /// The hotplug debounce window elapsed
    RefreshDue,
    /// Enumeration finished
    DevicesEnumerated {
        result: Result<Vec<DeviceRecord>, ScanFailure>,
    },
    SelectNextDevice,
    SelectPreviousDevice,

    // ─────────────────────────────────────────────────────────
    // Hotplug Watcher
    // ─────────────────────────────────────────────────────────
    /// The tracking stream is running
    HotplugStarted,
    /// The tracking stream could not start because adb is missing
    HotplugToolMissing,

    // ─────────────────────────────────────────────────────────
    // Parameters
    // ─────────────────────────────────────────────────────────
    /// Hardware probes finished for a device
    RecommendationReady {
        serial: String,
        recommendation: Recommendation,
    },
    FocusNextField,
    FocusPreviousField,
    /// Step the focused field forward (`true`) or backward
    AdjustField { forward: bool },
    /// Flip the focused field if it is a flag
    ToggleField,

    // ─────────────────────────────────────────────────────────
    // Mirroring Session
    // ─────────────────────────────────────────────────────────
    StartMirror,
    /// The mirroring child is running
    MirrorSpawned { mode: SupervisionMode },
    MirrorLaunchFailed { failure: LaunchFailure },
    /// Output or exit of the mirroring child
    Mirror(MirrorEvent),

    // ─────────────────────────────────────────────────────────
    // Wireless
    // ─────────────────────────────────────────────────────────
    /// Start the wireless flow (auto via USB, or manual prompt)
    WirelessConnect,
    /// Text in the IP prompt changed
    WirelessInput { text: String },
    /// Connect to the IP typed into the prompt
    WirelessSubmit,
    WirelessCancel,
    Wireless(WirelessEvent),
    /// Disconnect the selected device
    Disconnect,
    DisconnectAllWireless,

    // ─────────────────────────────────────────────────────────
    // Log View
    // ─────────────────────────────────────────────────────────
    ClearLogs,
    ScrollLogUp,
    ScrollLogDown,
    ScrollLogToBottom,

    // ─────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────
    SwitchLanguage,
    ShowOnboarding,
    OnboardingNext,
    OnboardingPrevious,
    OnboardingToggleDontShow,
    CloseOnboarding,
    /// Write the current settings to disk
    PersistSettings,
    SettingsSaveFailed { error: String },
}

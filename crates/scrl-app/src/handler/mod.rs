//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `devices`: Enumeration results, selection and hotplug notices
//! - `params`: Parameter editing and recommendations
//! - `session`: Mirroring launch and child events
//! - `wireless`: Wireless connect/disconnect flow
//! - `preferences`: Language, onboarding and settings persistence

pub(crate) mod devices;
pub(crate) mod keys;
pub(crate) mod params;
pub(crate) mod preferences;
pub(crate) mod session;
pub(crate) mod update;
pub(crate) mod wireless;


use std::time::Duration;

use scrl_core::Language;

use crate::config::Settings;
use crate::message::Message;
use crate::supervisor::LaunchRequest;

// Re-export main entry point
pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Run `adb devices` and label every ready device
    EnumerateDevices { language: Language },

    /// Gather hardware probes and compute a recommendation
    ProbeDevice { serial: String },

    /// Start the mirroring child (handled synchronously by `process`)
    LaunchMirror(LaunchRequest),

    /// Send `Message::Quit` after a delay
    ScheduleQuit { delay: Duration },

    /// Send `Message::RefreshDevices` after a delay
    DelayedRefresh { delay: Duration },

    /// Read the USB device's WLAN address, enable TCP/IP and connect
    WirelessAuto { serial: String },

    /// Connect to a typed address
    WirelessConnectIp { ip: String },

    /// Disconnect each serial, then refresh
    Disconnect { serials: Vec<String>, all: bool },

    /// Write settings to the config file
    SaveSettings(Settings),
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn both(msg: Message, action: UpdateAction) -> Self {
        Self {
            message: Some(msg),
            action: Some(action),
        }
    }
}

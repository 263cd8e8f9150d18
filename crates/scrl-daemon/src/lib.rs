//! # scrl-daemon - External Tool Management
//!
//! Wraps the two external executables the launcher drives: the device bridge
//! (`adb`) and the mirroring tool (`scrcpy`).
//!
//! Depends on [`scrl_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Bridge
//! - [`Bridge`] - Async seam over bridge invocations (implemented by [`AdbBridge`])
//! - [`DeviceTracker`] - Line stream from `adb track-devices`
//!
//! ### Device Directory
//! - [`enumerate()`] - Ready devices with localized labels
//!
//! ### Hardware Probes
//! - [`gather_recommendation()`] - Screen size, model and host RAM fed into [`scrl_core::recommend()`]
//!
//! ### Wireless
//! - [`wireless`] - WLAN address lookup, `tcpip`, `connect`, `disconnect`
//!
//! ### Mirroring
//! - [`MirrorCommand`], [`MirrorProcess`] - Assemble and supervise a `scrcpy` child
//!
//! ### Tools
//! - [`ToolPaths`] - Executable resolution

pub mod bridge;
pub mod devices;
pub mod mirror;
pub mod probe;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tools;
pub mod wireless;

// Public API re-exports
pub use bridge::{AdbBridge, Bridge, CommandOutput, DeviceTracker, ADB_PROGRAM};
pub use devices::{compose_label, enumerate, parse_device_list, DeviceListing, LabelProbe};
pub use mirror::{build_args, MirrorCommand, MirrorProcess, LIVENESS_POLL};
pub use probe::{gather_recommendation, host_ram_gb, parse_screen_size};
pub use tools::{ToolAvailability, ToolPaths, SCRCPY_PROGRAM};
pub use wireless::{ConnectOutcome, WIRELESS_PORT};

//! Configuration types for the scrcpy launcher
//!
//! Every section uses `#[serde(default)]` so a partial file still loads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use scrl_core::{Language, StreamParameters};

/// Host screen width assumed for window placement when not configured
pub const DEFAULT_HOST_SCREEN_WIDTH: u32 = 1920;

/// Launcher settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Mirroring parameters from the last run
    pub stream: StreamParameters,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub wireless: WirelessSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub tools: ToolSettings,
}

/// How a mirroring session is supervised
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Stream the mirror's output into the log (monitoring mode) instead of
    /// hiding the launcher until the mirror exits
    pub show_log: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WirelessSettings {
    /// Last IP that connected successfully, used to prefill the prompt
    pub last_ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    pub language: Language,

    /// Show the first-run guide on startup
    pub show_onboarding: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            show_onboarding: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Directory containing `adb` and `scrcpy`; searched before `PATH`
    pub dir: Option<PathBuf>,

    /// Width of the host screen in pixels, used for top-right placement
    pub host_screen_width: u32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            dir: None,
            host_screen_width: DEFAULT_HOST_SCREEN_WIDTH,
        }
    }
}

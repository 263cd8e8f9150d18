//! # scrl-core - Core Domain Types
//!
//! Foundation crate for the scrcpy launcher. Provides domain types, stream
//! parameters, the recommendation rule, localized text, error handling and
//! logging setup.
//!
//! This crate has **zero internal dependencies**.
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`DeviceRecord`] - A ready device with its display label
//! - [`LogEntry`], [`LogLevel`], [`LogSource`] - Entries for the visible log panel
//! - [`SessionState`], [`SupervisionMode`] - Mirroring session state
//!
//! ### Stream Parameters (`params`)
//! - [`StreamParameters`] and its typed option enums
//!
//! ### Recommendation (`recommend`)
//! - [`recommend()`] - Hardware-based parameter suggestion
//!
//! ### Localization (`locale`)
//! - [`Language`], [`Label`], [`Phrase`]
//!
//! ### Error Handling (`error`)
//! - [`Error`], [`Result`]

pub mod error;
pub mod events;
pub mod locale;
pub mod logging;
pub mod params;
pub mod recommend;
pub mod types;

/// Prelude for common imports used throughout all launcher crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result};
pub use events::MirrorEvent;
pub use locale::{onboarding_pages, Label, Language, OnboardingPage, Phrase};
pub use params::{
    Bitrate, Choice, MaxDimension, MaxFps, StreamParameters, VideoCodec, WindowPosition,
};
pub use recommend::{recommend, Recommendation, ScreenSize};
pub use types::{
    is_wireless_serial, AppPhase, DeviceRecord, LogEntry, LogLevel, LogSource, SessionState,
    SupervisionMode,
};

//! Configuration file handling for the scrcpy launcher
//!
//! A single TOML file (`config.toml` under the platform config directory)
//! holds stream parameters, session mode, the remembered wireless address,
//! UI preferences and tool locations.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, load_settings, save_settings, CONFIG_FILENAME};
pub use types::*;

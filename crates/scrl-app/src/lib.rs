//! scrl-app - Application state and orchestration for the scrcpy launcher
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management, the Engine that owns the message loop, the hotplug watcher and
//! refresh debouncer, mirroring session supervision, and settings persistence.

pub mod actions;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;
pub mod supervisor;
pub mod watcher;

// Re-export primary types
pub use engine::Engine;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, ParamField, UiMode};
pub use supervisor::MirrorSession;

// Re-export daemon types for TUI
pub use scrl_daemon::{AdbBridge, ToolAvailability, ToolPaths};

//! scrl-tui - Terminal UI for the scrcpy launcher
//!
//! This crate provides the ratatui-based terminal interface. It drives an
//! Engine from scrl-app and adds terminal rendering, event polling, widget
//! display, and releasing the terminal while a silent mirror runs.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

// Re-export main entry point
pub use runner::run;

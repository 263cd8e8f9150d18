//! Terminal-independent key events
//!
//! The TUI converts crossterm events into [`InputKey`] so that key handling in
//! this crate can be tested without a terminal.

/// A key press as seen by the handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character, including Shift variants (`X`, `?`)
    Char(char),
    /// Character with Ctrl held
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
}

impl InputKey {
    /// Ctrl+C quits from every mode
    pub fn is_interrupt(&self) -> bool {
        matches!(self, InputKey::CharCtrl('c'))
    }
}

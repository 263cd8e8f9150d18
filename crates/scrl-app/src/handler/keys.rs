//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit with Ctrl+C from any mode
    if key.is_interrupt() {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Setup => handle_key_setup(key),
        UiMode::Monitoring => handle_key_monitoring(key),
        UiMode::Hidden => None,
        UiMode::WirelessPrompt => handle_key_wireless_prompt(state, key),
        UiMode::Onboarding => handle_key_onboarding(key),
    }
}

/// Handle key events on the main panel
fn handle_key_setup(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),

        // Devices
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPreviousDevice),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNextDevice),
        InputKey::Char('r') => Some(Message::RefreshDevices),

        // Parameters
        InputKey::Tab => Some(Message::FocusNextField),
        InputKey::BackTab => Some(Message::FocusPreviousField),
        InputKey::Left | InputKey::Char('h') => Some(Message::AdjustField { forward: false }),
        InputKey::Right | InputKey::Char('l') => Some(Message::AdjustField { forward: true }),
        InputKey::Char(' ') => Some(Message::ToggleField),

        InputKey::Enter => Some(Message::StartMirror),

        // Wireless
        InputKey::Char('w') => Some(Message::WirelessConnect),
        InputKey::Char('x') => Some(Message::Disconnect),
        InputKey::Char('X') => Some(Message::DisconnectAllWireless),

        // Log
        InputKey::Char('c') => Some(Message::ClearLogs),
        InputKey::PageUp => Some(Message::ScrollLogUp),
        InputKey::PageDown => Some(Message::ScrollLogDown),
        InputKey::End => Some(Message::ScrollLogToBottom),

        InputKey::Char('L') => Some(Message::SwitchLanguage),
        InputKey::Char('?') => Some(Message::ShowOnboarding),

        _ => None,
    }
}

/// Log-only view while a monitored session runs
fn handle_key_monitoring(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        InputKey::Up | InputKey::PageUp | InputKey::Char('k') => Some(Message::ScrollLogUp),
        InputKey::Down | InputKey::PageDown | InputKey::Char('j') => {
            Some(Message::ScrollLogDown)
        }
        InputKey::End | InputKey::Char('G') => Some(Message::ScrollLogToBottom),
        InputKey::Char('c') => Some(Message::ClearLogs),
        _ => None,
    }
}

fn handle_key_wireless_prompt(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::WirelessCancel),
        InputKey::Enter => Some(Message::WirelessSubmit),

        InputKey::Backspace => {
            let mut text = state.wireless_input.clone();
            text.pop();
            Some(Message::WirelessInput { text })
        }

        // Clear all input
        InputKey::CharCtrl('u') => Some(Message::WirelessInput {
            text: String::new(),
        }),

        InputKey::Char(c) if c.is_ascii_digit() || c == '.' => {
            let mut text = state.wireless_input.clone();
            text.push(c);
            Some(Message::WirelessInput { text })
        }

        _ => None,
    }
}

fn handle_key_onboarding(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Left | InputKey::Char('h') => Some(Message::OnboardingPrevious),
        InputKey::Right | InputKey::Char('l') | InputKey::Char(' ') => {
            Some(Message::OnboardingNext)
        }
        InputKey::Char('d') => Some(Message::OnboardingToggleDontShow),
        InputKey::Enter | InputKey::Esc | InputKey::Char('q') => Some(Message::CloseOnboarding),
        _ => None,
    }
}

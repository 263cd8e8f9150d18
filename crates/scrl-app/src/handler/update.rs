//! Main update function - handles state transitions (TEA pattern)

use scrl_core::{AppPhase, Choice};

use crate::message::Message;
use crate::state::AppState;

use super::{devices, keys::handle_key, params, preferences, session, wireless, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Device Directory
        // ─────────────────────────────────────────────────────────
        Message::RefreshDevices => devices::handle_refresh(state, false),
        Message::RefreshDue => devices::handle_refresh(state, true),
        Message::DevicesEnumerated { result } => devices::handle_enumerated(state, result),
        Message::SelectNextDevice => devices::handle_select(state, true),
        Message::SelectPreviousDevice => devices::handle_select(state, false),
        Message::HotplugStarted => devices::handle_hotplug_started(state),
        Message::HotplugToolMissing => devices::handle_hotplug_tool_missing(state),

        // ─────────────────────────────────────────────────────────
        // Parameters
        // ─────────────────────────────────────────────────────────
        Message::RecommendationReady {
            serial,
            recommendation,
        } => params::handle_recommendation(state, &serial, recommendation),
        Message::FocusNextField => {
            state.focus = state.focus.next();
            UpdateResult::none()
        }
        Message::FocusPreviousField => {
            state.focus = state.focus.prev();
            UpdateResult::none()
        }
        Message::AdjustField { forward } => params::handle_adjust(state, forward),
        Message::ToggleField => params::handle_toggle(state),

        // ─────────────────────────────────────────────────────────
        // Mirroring Session
        // ─────────────────────────────────────────────────────────
        Message::StartMirror => session::handle_start(state),
        Message::MirrorSpawned { mode } => session::handle_spawned(state, mode),
        Message::MirrorLaunchFailed { failure } => session::handle_launch_failed(state, failure),
        Message::Mirror(event) => session::handle_mirror_event(state, event),

        // ─────────────────────────────────────────────────────────
        // Wireless
        // ─────────────────────────────────────────────────────────
        Message::WirelessConnect => wireless::handle_connect(state),
        Message::WirelessInput { text } => {
            state.wireless_input = text;
            UpdateResult::none()
        }
        Message::WirelessSubmit => wireless::handle_submit(state),
        Message::WirelessCancel => wireless::handle_cancel(state),
        Message::Wireless(event) => wireless::handle_event(state, event),
        Message::Disconnect => wireless::handle_disconnect(state),
        Message::DisconnectAllWireless => wireless::handle_disconnect_all(state),

        // ─────────────────────────────────────────────────────────
        // Log View
        // ─────────────────────────────────────────────────────────
        Message::ClearLogs => {
            state.clear_logs();
            UpdateResult::none()
        }
        Message::ScrollLogUp => {
            state.log_scroll = (state.log_scroll + 1).min(state.logs.len().saturating_sub(1));
            UpdateResult::none()
        }
        Message::ScrollLogDown => {
            state.log_scroll = state.log_scroll.saturating_sub(1);
            UpdateResult::none()
        }
        Message::ScrollLogToBottom => {
            state.log_scroll = 0;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Preferences
        // ─────────────────────────────────────────────────────────
        Message::SwitchLanguage => preferences::handle_switch_language(state),
        Message::ShowOnboarding => preferences::handle_show_onboarding(state),
        Message::OnboardingNext => preferences::handle_onboarding_page(state, true),
        Message::OnboardingPrevious => preferences::handle_onboarding_page(state, false),
        Message::OnboardingToggleDontShow => {
            state.onboarding.dont_show_again = !state.onboarding.dont_show_again;
            UpdateResult::none()
        }
        Message::CloseOnboarding => preferences::handle_close_onboarding(state),
        Message::PersistSettings => preferences::handle_persist(state),
        Message::SettingsSaveFailed { error } => preferences::handle_save_failed(state, error),
    }
}

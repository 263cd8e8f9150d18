//! Language, onboarding and settings persistence

use scrl_core::{onboarding_pages, Choice, LogSource, Phrase};

use crate::message::Message;
use crate::state::{AppState, OnboardingState, UiMode};

use super::{UpdateAction, UpdateResult};

/// Cycle the language; the refresh re-localizes device labels
pub fn handle_switch_language(state: &mut AppState) -> UpdateResult {
    state.language = state.language.next();
    state.log_info(LogSource::App, Phrase::LanguageChanged);
    UpdateResult::both(
        Message::RefreshDevices,
        UpdateAction::SaveSettings(state.to_settings()),
    )
}

pub fn handle_show_onboarding(state: &mut AppState) -> UpdateResult {
    state.onboarding = OnboardingState::default();
    state.ui_mode = UiMode::Onboarding;
    UpdateResult::none()
}

pub fn handle_onboarding_page(state: &mut AppState, forward: bool) -> UpdateResult {
    let last = onboarding_pages(state.language).len().saturating_sub(1);
    let page = state.onboarding.page;
    state.onboarding.page = if forward {
        (page + 1).min(last)
    } else {
        page.saturating_sub(1)
    };
    UpdateResult::none()
}

pub fn handle_close_onboarding(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::Setup;
    if state.onboarding.dont_show_again && state.show_onboarding {
        state.show_onboarding = false;
        return UpdateResult::message(Message::PersistSettings);
    }
    UpdateResult::none()
}

pub fn handle_persist(state: &mut AppState) -> UpdateResult {
    UpdateResult::action(UpdateAction::SaveSettings(state.to_settings()))
}

pub fn handle_save_failed(state: &mut AppState, error: String) -> UpdateResult {
    state.log_error(LogSource::Config, Phrase::SettingsSaveFailed { error });
    UpdateResult::none()
}

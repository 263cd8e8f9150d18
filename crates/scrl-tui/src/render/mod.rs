//! Main render/view function (View in TEA pattern)


use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use scrl_app::{AppState, UiMode};
use scrl_core::Label;

use super::{layout, widgets};
use crate::theme::palette;

/// Key hints for the current mode
fn key_hints(state: &AppState) -> Label {
    match state.ui_mode {
        UiMode::Setup => Label::SetupKeys,
        UiMode::Monitoring => Label::MonitoringKeys,
        UiMode::Hidden => Label::SessionSilent,
        UiMode::WirelessPrompt => Label::WirelessKeys,
        UiMode::Onboarding => Label::OnboardingKeys,
    }
}

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to `state`; the runner never draws in `UiMode::Hidden`,
/// but the log-only view is used for it anyway.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let lang = state.language;

    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let log_only = matches!(state.ui_mode, UiMode::Monitoring | UiMode::Hidden);
    let areas = layout::create(area, log_only);

    frame.render_widget(widgets::MainHeader::new(state), areas.header);

    if let Some(panels) = areas.panels {
        frame.render_widget(
            widgets::DeviceList::new(&state.devices, state.selected, lang)
                .scanning(state.scanning),
            panels.devices,
        );
        frame.render_widget(
            widgets::ParamsPanel::new(&state.params, state.show_log, lang)
                .focus(state.focus)
                .hint(state.auto_config_hint.as_deref())
                .locked(state.session.is_some()),
            panels.params,
        );
    }

    frame.render_widget(
        widgets::LogView::new(&state.logs, Label::LogTitle.text(lang)).scroll(state.log_scroll),
        areas.logs,
    );
    frame.render_widget(
        widgets::StatusBar::new(key_hints(state).text(lang)),
        areas.status,
    );

    match state.ui_mode {
        UiMode::WirelessPrompt => {
            frame.render_widget(
                widgets::WirelessPrompt::new(&state.wireless_input, lang)
                    .first_time(state.wireless_first_time),
                area,
            );
        }
        UiMode::Onboarding => {
            frame.render_widget(
                widgets::OnboardingOverlay::new(
                    state.onboarding.page,
                    state.onboarding.dont_show_again,
                    lang,
                ),
                area,
            );
        }
        UiMode::Setup | UiMode::Monitoring | UiMode::Hidden => {}
    }
}

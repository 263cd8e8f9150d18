//! Parameter editing and hardware recommendations

use scrl_core::locale::{max_dimension_text, Label};
use scrl_core::{Choice, LogEntry, LogSource, Phrase, Recommendation};

use crate::state::{AppState, ParamField};

use super::UpdateResult;

/// Apply a recommendation if it still belongs to the selected device and
/// no session is running.
pub fn handle_recommendation(
    state: &mut AppState,
    serial: &str,
    recommendation: Recommendation,
) -> UpdateResult {
    let still_selected = state
        .selected_device()
        .is_some_and(|d| d.serial == serial);
    if !still_selected || state.session.is_some() {
        tracing::debug!("Discarding stale recommendation for {}", serial);
        return UpdateResult::none();
    }

    recommendation.apply_to(&mut state.params);

    state.log_info(
        LogSource::App,
        Phrase::AutoConfigDevice {
            model: recommendation.device_model.clone(),
            screen: recommendation.screen_size.map(|s| s.to_string()),
            ram_gb: recommendation.host_ram_gb,
        },
    );
    state.log_info(
        LogSource::App,
        Phrase::AutoConfigRecommended {
            size: max_dimension_text(recommendation.max_dimension, state.language),
            bitrate: recommendation.bitrate.mbps(),
        },
    );

    let hint = Phrase::AutoConfigHint {
        model: recommendation.device_model,
        ram_gb: recommendation.host_ram_gb,
    };
    state.auto_config_hint = Some(hint.text(state.language));

    UpdateResult::none()
}

/// Step the focused field forward or backward
pub fn handle_adjust(state: &mut AppState, forward: bool) -> UpdateResult {
    let field = state.focus;
    if field.is_flag() {
        flip_flag(state, field);
        return UpdateResult::none();
    }

    let params = &mut state.params;
    match field {
        ParamField::MaxDimension => params.max_dimension = step(params.max_dimension, forward),
        ParamField::MaxFps => params.max_fps = step(params.max_fps, forward),
        ParamField::Codec => params.codec = step(params.codec, forward),
        ParamField::Bitrate => params.bitrate = params.bitrate.step(if forward { 1 } else { -1 }),
        ParamField::WindowPosition => {
            params.window_position = step(params.window_position, forward)
        }
        _ => {}
    }
    state.auto_config_hint = None;
    UpdateResult::none()
}

/// Space on a flag flips it; on any other row it steps forward
pub fn handle_toggle(state: &mut AppState) -> UpdateResult {
    let field = state.focus;
    if field.is_flag() {
        flip_flag(state, field);
        UpdateResult::none()
    } else {
        handle_adjust(state, true)
    }
}

fn step<T: Choice>(value: T, forward: bool) -> T {
    if forward {
        value.next()
    } else {
        value.prev()
    }
}

fn flip_flag(state: &mut AppState, field: ParamField) {
    match field {
        ParamField::ScreenOff => {
            state.params.screen_off = !state.params.screen_off;
            if state.params.screen_off {
                let text = Label::ScreenOffWarning.text(state.language);
                state.add_log(LogEntry::warn(LogSource::App, text));
            }
        }
        ParamField::Borderless => state.params.borderless = !state.params.borderless,
        ParamField::PrintFps => state.params.print_fps = !state.params.print_fps,
        // Supervision mode, not a stream parameter
        ParamField::ShowLog => {
            state.show_log = !state.show_log;
            return;
        }
        _ => return,
    }
    state.auto_config_hint = None;
}

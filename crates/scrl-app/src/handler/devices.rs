//! Device directory handlers

use scrl_core::{DeviceRecord, LogSource, Phrase};

use crate::message::ScanFailure;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// Start an enumeration. `hotplug` marks refreshes requested by the watcher.
pub fn handle_refresh(state: &mut AppState, hotplug: bool) -> UpdateResult {
    if hotplug {
        state.log_info(LogSource::Hotplug, Phrase::DeviceChangeDetected);
    } else {
        state.log_info(LogSource::App, Phrase::Refreshing);
    }
    state.scanning = true;
    UpdateResult::action(UpdateAction::EnumerateDevices {
        language: state.language,
    })
}

/// Replace the device list with a finished enumeration.
///
/// Selection priority: a pending wireless target, then the previously
/// selected serial, then the first device.
pub fn handle_enumerated(
    state: &mut AppState,
    result: Result<Vec<DeviceRecord>, ScanFailure>,
) -> UpdateResult {
    state.scanning = false;
    let previous = state.selected_device().map(|d| d.serial.clone());

    let devices = match result {
        Ok(devices) => devices,
        Err(failure) => {
            state.devices.clear();
            state.selected = None;
            let phrase = match failure {
                ScanFailure::ToolMissing => Phrase::AdbNotFound,
                ScanFailure::TimedOut => Phrase::AdbTimedOut,
                ScanFailure::Other(error) => Phrase::ScanFailed { error },
            };
            state.log_error(LogSource::Bridge, phrase);
            state.log_warn(LogSource::Bridge, Phrase::NoDevices);
            return UpdateResult::none();
        }
    };

    state.devices = devices;
    state.selected = None;

    if let Some(target) = state.pending_select.clone() {
        if state.select_serial(&target) {
            state.pending_select = None;
            let name = state
                .selected_device()
                .map(|d| d.display_label.clone())
                .unwrap_or(target);
            state.log_info(LogSource::App, Phrase::AutoSelected { name });
        }
    }

    if state.selected.is_none() {
        let kept = previous
            .as_deref()
            .map(|serial| state.select_serial(serial))
            .unwrap_or(false);
        if !kept && !state.devices.is_empty() {
            state.selected = Some(0);
        }
    }

    if state.devices.is_empty() {
        state.log_warn(LogSource::Bridge, Phrase::NoDevices);
    } else {
        let count = state.devices.len();
        state.log_info(LogSource::Bridge, Phrase::FoundDevices { count });
    }

    probe_if_changed(state, previous)
}

/// Move the selection, wrapping at both ends
pub fn handle_select(state: &mut AppState, forward: bool) -> UpdateResult {
    let len = state.devices.len();
    if len == 0 {
        return UpdateResult::none();
    }

    let previous = state.selected_device().map(|d| d.serial.clone());
    let current = state.selected.unwrap_or(0);
    state.selected = Some(if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    });

    probe_if_changed(state, previous)
}

pub fn handle_hotplug_started(state: &mut AppState) -> UpdateResult {
    state.log_info(LogSource::Hotplug, Phrase::HotplugStarted);
    UpdateResult::none()
}

pub fn handle_hotplug_tool_missing(state: &mut AppState) -> UpdateResult {
    state.log_warn(LogSource::Hotplug, Phrase::HotplugToolMissing);
    UpdateResult::none()
}

/// Request a recommendation when the selected serial changed
fn probe_if_changed(state: &AppState, previous: Option<String>) -> UpdateResult {
    match state.selected_device() {
        Some(device) if previous.as_deref() != Some(device.serial.as_str()) => {
            UpdateResult::action(UpdateAction::ProbeDevice {
                serial: device.serial.clone(),
            })
        }
        _ => UpdateResult::none(),
    }
}

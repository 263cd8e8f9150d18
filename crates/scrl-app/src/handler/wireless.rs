//! Wireless connect and disconnect handlers

use std::time::Duration;

use scrl_core::{LogEntry, LogSource, Phrase};
use scrl_daemon::wireless::{can_disconnect, first_usb_device, is_valid_ipv4};

use crate::message::{Message, WirelessEvent};
use crate::state::{AppState, UiMode};

use super::{UpdateAction, UpdateResult};

/// Delay between a successful connect and the refresh that selects it
pub const CONNECT_REFRESH_DELAY: Duration = Duration::from_millis(500);

/// Auto flow through an attached USB device, manual prompt otherwise.
///
/// Without any earlier wireless connection the prompt carries first-time
/// guidance.
pub fn handle_connect(state: &mut AppState) -> UpdateResult {
    if let Some(device) = first_usb_device(&state.devices) {
        return UpdateResult::action(UpdateAction::WirelessAuto {
            serial: device.serial.clone(),
        });
    }

    let connected_before = state.last_ip.is_some() || state.devices.iter().any(|d| d.is_wireless);
    if connected_before {
        state.log_info(LogSource::App, Phrase::ManualIpEntry);
    } else {
        state.log_warn(LogSource::App, Phrase::WirelessFirstTime);
    }
    open_prompt(state);
    state.wireless_first_time = !connected_before;
    UpdateResult::none()
}

pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    let ip = state.wireless_input.trim().to_string();
    if !is_valid_ipv4(&ip) {
        state.log_warn(LogSource::App, Phrase::InvalidIp { input: ip });
        return UpdateResult::none();
    }

    state.ui_mode = UiMode::Setup;
    UpdateResult::action(UpdateAction::WirelessConnectIp { ip })
}

pub fn handle_cancel(state: &mut AppState) -> UpdateResult {
    state.ui_mode = UiMode::Setup;
    UpdateResult::none()
}

pub fn handle_event(state: &mut AppState, event: WirelessEvent) -> UpdateResult {
    match event {
        WirelessEvent::DetectedIp { ip } => {
            state.log_info(LogSource::Bridge, Phrase::DetectedIp { ip });
        }
        WirelessEvent::IpUnavailable => {
            state.log_warn(LogSource::Bridge, Phrase::IpFallback);
            open_prompt(state);
        }
        WirelessEvent::EnablingTcpip { device } => {
            state.log_info(LogSource::Bridge, Phrase::EnablingTcpip { device });
        }
        WirelessEvent::TcpipEnabled { output } => {
            state.add_log(LogEntry::info(LogSource::Bridge, output));
        }
        WirelessEvent::TcpipFailed { error } => {
            state.log_error(LogSource::Bridge, Phrase::TcpipFailed { error });
        }
        WirelessEvent::WaitingRestart => {
            state.log_info(LogSource::Bridge, Phrase::WaitingRestart);
        }
        WirelessEvent::Connecting { target } => {
            state.log_info(LogSource::Bridge, Phrase::Connecting { target });
        }
        WirelessEvent::Connected { ip, target } => return handle_connected(state, ip, target),
        WirelessEvent::ConnectRejected { output } => {
            state.log_warn(LogSource::Bridge, Phrase::ConnectMayHaveFailed { output });
        }
        WirelessEvent::ConnectTimedOut => {
            state.log_error(LogSource::Bridge, Phrase::ConnectTimedOut);
        }
        WirelessEvent::ConnectError { error } => {
            state.log_error(LogSource::Bridge, Phrase::ConnectFailed { error });
        }
        WirelessEvent::Disconnected { serial } => return handle_disconnected(state, serial),
        WirelessEvent::DisconnectFailed { error } => {
            state.log_error(LogSource::Bridge, Phrase::DisconnectFailed { error });
        }
        WirelessEvent::AllDisconnected => {
            state.log_info(LogSource::Bridge, Phrase::AllWirelessDisconnected);
            if state.last_ip.take().is_some() {
                return UpdateResult::message(Message::PersistSettings);
            }
        }
    }
    UpdateResult::none()
}

/// Disconnect the selected device if it is a network or stale entry
pub fn handle_disconnect(state: &mut AppState) -> UpdateResult {
    let Some(device) = state.selected_device().cloned() else {
        state.log_warn(LogSource::App, Phrase::NoValidDevice);
        return UpdateResult::none();
    };

    if !can_disconnect(&device) {
        state.log_warn(LogSource::App, Phrase::UsbCannotDisconnect);
        return UpdateResult::none();
    }

    state.log_info(
        LogSource::Bridge,
        Phrase::Disconnecting {
            device: device.display_label,
        },
    );
    UpdateResult::action(UpdateAction::Disconnect {
        serials: vec![device.serial],
        all: false,
    })
}

pub fn handle_disconnect_all(state: &mut AppState) -> UpdateResult {
    let wireless: Vec<_> = state
        .devices
        .iter()
        .filter(|d| d.is_wireless)
        .cloned()
        .collect();

    if wireless.is_empty() {
        state.log_info(LogSource::App, Phrase::NoWirelessDevices);
        return UpdateResult::none();
    }

    let mut serials = Vec::with_capacity(wireless.len());
    for device in wireless {
        state.log_info(
            LogSource::Bridge,
            Phrase::Disconnecting {
                device: device.display_label,
            },
        );
        serials.push(device.serial);
    }

    UpdateResult::action(UpdateAction::Disconnect { serials, all: true })
}

fn open_prompt(state: &mut AppState) {
    state.wireless_input = state.last_ip.clone().unwrap_or_default();
    state.wireless_first_time = false;
    state.ui_mode = UiMode::WirelessPrompt;
}

fn handle_connected(state: &mut AppState, ip: String, target: String) -> UpdateResult {
    state.log_info(
        LogSource::Bridge,
        Phrase::Connected {
            target: target.clone(),
        },
    );
    state.log_info(LogSource::App, Phrase::UnplugHint);
    state.last_ip = Some(ip);
    state.pending_select = Some(target);

    UpdateResult::both(
        Message::PersistSettings,
        UpdateAction::DelayedRefresh {
            delay: CONNECT_REFRESH_DELAY,
        },
    )
}

/// Forget the remembered address when its device is disconnected
fn handle_disconnected(state: &mut AppState, serial: String) -> UpdateResult {
    let host = serial.split(':').next().unwrap_or_default().to_string();
    state.log_info(LogSource::Bridge, Phrase::Disconnected { device: serial });

    if state.last_ip.as_deref() == Some(host.as_str()) {
        state.last_ip = None;
        return UpdateResult::message(Message::PersistSettings);
    }
    UpdateResult::none()
}

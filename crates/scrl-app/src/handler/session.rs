//! Mirroring session handlers

use scrl_core::{LogEntry, LogLevel, LogSource, MirrorEvent, Phrase, SupervisionMode};
use scrl_daemon::MirrorCommand;

use crate::message::LaunchFailure;
use crate::state::{AppState, UiMode};
use crate::supervisor::{LaunchRequest, MONITORING_EXIT_GRACE};

use super::{UpdateAction, UpdateResult};

/// Validate the launch and hand the assembled command to the supervisor
pub fn handle_start(state: &mut AppState) -> UpdateResult {
    if state.session.is_some() {
        state.log_warn(LogSource::App, Phrase::SessionAlreadyActive);
        return UpdateResult::none();
    }

    let Some(device) = state.selected_device().cloned() else {
        state.log_warn(LogSource::App, Phrase::NoValidDevice);
        return UpdateResult::none();
    };

    let command = MirrorCommand::new(
        &state.tools,
        &device.serial,
        &state.params,
        state.host_screen_width(),
    );

    state.log_info(LogSource::App, Phrase::Launching);
    state.log_info(
        LogSource::App,
        Phrase::LaunchDevice {
            label: device.display_label.clone(),
        },
    );
    state.log_info(
        LogSource::App,
        Phrase::LaunchParams {
            summary: state.params.summary(),
        },
    );
    state.log_info(
        LogSource::App,
        Phrase::LaunchCommand {
            command: command.command_line(),
        },
    );

    UpdateResult::action(UpdateAction::LaunchMirror(LaunchRequest {
        command,
        serial: device.serial,
        label: device.display_label,
        mode: state.supervision_mode(),
    }))
}

pub fn handle_spawned(state: &mut AppState, mode: SupervisionMode) -> UpdateResult {
    state.log_info(LogSource::Mirror, Phrase::MirrorLaunched);
    state.log_scroll = 0;
    state.ui_mode = match mode {
        SupervisionMode::Monitoring => UiMode::Monitoring,
        SupervisionMode::Silent => UiMode::Hidden,
    };
    UpdateResult::none()
}

pub fn handle_launch_failed(state: &mut AppState, failure: LaunchFailure) -> UpdateResult {
    match failure {
        LaunchFailure::SessionActive => {
            state.log_warn(LogSource::App, Phrase::SessionAlreadyActive)
        }
        LaunchFailure::ToolMissing { path } => {
            state.log_error(LogSource::Mirror, Phrase::MirrorNotFound { path })
        }
        LaunchFailure::Spawn { reason } => {
            state.log_error(LogSource::Mirror, Phrase::LaunchFailed { error: reason })
        }
    }
    UpdateResult::none()
}

pub fn handle_mirror_event(state: &mut AppState, event: MirrorEvent) -> UpdateResult {
    match event {
        MirrorEvent::Output(line) => {
            let level = output_level(&line);
            state.add_log(LogEntry::new(level, LogSource::Mirror, line));
            UpdateResult::none()
        }
        MirrorEvent::Exited { code } => handle_exit(state, code),
    }
}

/// Severity of a mirroring tool output line
pub(crate) fn output_level(line: &str) -> LogLevel {
    if line.contains("ERROR") {
        LogLevel::Error
    } else if line.contains("WARN") {
        LogLevel::Warning
    } else {
        LogLevel::Info
    }
}

fn handle_exit(state: &mut AppState, code: Option<i32>) -> UpdateResult {
    let Some(session) = state.session.take() else {
        tracing::debug!("Exit reported with no active session");
        return UpdateResult::none();
    };
    tracing::info!("Mirroring {} ended with {:?}", session.serial, code);

    match code {
        Some(0) => state.log_info(LogSource::Mirror, Phrase::MirrorExitedNormally),
        Some(code) => state.log_warn(
            LogSource::Mirror,
            Phrase::MirrorExitCode {
                code: code.to_string(),
            },
        ),
        None => state.log_warn(
            LogSource::Mirror,
            Phrase::MirrorExitCode {
                code: "signal".to_string(),
            },
        ),
    }

    match session.mode() {
        SupervisionMode::Monitoring => {
            state.log_info(LogSource::App, Phrase::ExitingAfterMirror);
            UpdateResult::action(UpdateAction::ScheduleQuit {
                delay: MONITORING_EXIT_GRACE,
            })
        }
        SupervisionMode::Silent => {
            state.ui_mode = UiMode::Setup;
            state.log_info(LogSource::App, Phrase::WindowRestored);
            UpdateResult::none()
        }
    }
}

//! Application state (Model in TEA pattern)

use std::collections::VecDeque;

use scrl_core::locale::Label;
use scrl_core::{
    AppPhase, Choice, DeviceRecord, Language, LogEntry, LogLevel, LogSource, Phrase,
    SessionState, StreamParameters, SupervisionMode,
};
use scrl_daemon::ToolPaths;

use crate::config::Settings;
use crate::supervisor::MirrorSession;

/// Visible log ring capacity
pub const MAX_LOG_ENTRIES: usize = 5000;

/// What the terminal currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Device list, parameters and log
    #[default]
    Setup,
    /// Log-only view while a monitored session runs
    Monitoring,
    /// Terminal handed back to the shell while a silent session runs
    Hidden,
    /// Manual IP entry for wireless connect
    WirelessPrompt,
    /// First-run guide overlay
    Onboarding,
}

/// Editable parameter rows, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamField {
    #[default]
    MaxDimension,
    MaxFps,
    Codec,
    Bitrate,
    ScreenOff,
    Borderless,
    WindowPosition,
    PrintFps,
    ShowLog,
}

impl Choice for ParamField {
    const ALL: &'static [Self] = &[
        ParamField::MaxDimension,
        ParamField::MaxFps,
        ParamField::Codec,
        ParamField::Bitrate,
        ParamField::ScreenOff,
        ParamField::Borderless,
        ParamField::WindowPosition,
        ParamField::PrintFps,
        ParamField::ShowLog,
    ];
}

impl ParamField {
    pub fn label(self) -> Label {
        match self {
            ParamField::MaxDimension => Label::MaxSize,
            ParamField::MaxFps => Label::MaxFps,
            ParamField::Codec => Label::Codec,
            ParamField::Bitrate => Label::Bitrate,
            ParamField::ScreenOff => Label::ScreenOff,
            ParamField::Borderless => Label::Borderless,
            ParamField::WindowPosition => Label::WindowPosition,
            ParamField::PrintFps => Label::PrintFps,
            ParamField::ShowLog => Label::ShowLog,
        }
    }

    /// On/off rows toggled with Space
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            ParamField::ScreenOff
                | ParamField::Borderless
                | ParamField::PrintFps
                | ParamField::ShowLog
        )
    }
}

/// Paging state of the first-run guide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnboardingState {
    pub page: usize,
    pub dont_show_again: bool,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub ui_mode: UiMode,
    pub language: Language,

    /// Devices from the latest enumeration; replaced wholesale
    pub devices: Vec<DeviceRecord>,
    /// Index into `devices`
    pub selected: Option<usize>,
    /// An enumeration is in flight
    pub scanning: bool,
    /// Serial to select once it appears (set by wireless connect)
    pub pending_select: Option<String>,

    pub params: StreamParameters,
    pub show_log: bool,
    pub focus: ParamField,
    /// Shown after a recommendation is applied, cleared by manual edits
    pub auto_config_hint: Option<String>,

    /// The running mirroring child, if any
    pub session: Option<MirrorSession>,

    pub logs: VecDeque<LogEntry>,
    /// Lines scrolled up from the newest entry
    pub log_scroll: usize,

    pub wireless_input: String,
    /// No USB device, no remembered IP and no wireless device when the prompt opened
    pub wireless_first_time: bool,
    pub last_ip: Option<String>,

    pub onboarding: OnboardingState,
    pub show_onboarding: bool,

    pub tools: ToolPaths,

    /// Settings as loaded; sections the UI does not edit are written back unchanged
    base_settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings, tools: ToolPaths) -> Self {
        Self {
            phase: AppPhase::Initializing,
            ui_mode: UiMode::Setup,
            language: settings.ui.language,
            devices: Vec::new(),
            selected: None,
            scanning: false,
            pending_select: None,
            params: settings.stream.clone(),
            show_log: settings.session.show_log,
            focus: ParamField::default(),
            auto_config_hint: None,
            session: None,
            logs: VecDeque::with_capacity(256),
            log_scroll: 0,
            wireless_input: String::new(),
            wireless_first_time: false,
            last_ip: settings.wireless.last_ip.clone(),
            onboarding: OnboardingState::default(),
            show_onboarding: settings.ui.show_onboarding,
            tools,
            base_settings: settings,
        }
    }

    /// Snapshot of everything that is persisted
    pub fn to_settings(&self) -> Settings {
        let mut settings = self.base_settings.clone();
        settings.stream = self.params.clone();
        settings.session.show_log = self.show_log;
        settings.wireless.last_ip = self.last_ip.clone();
        settings.ui.language = self.language;
        settings.ui.show_onboarding = self.show_onboarding;
        settings
    }

    pub fn host_screen_width(&self) -> u32 {
        self.base_settings.tools.host_screen_width
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn selected_device(&self) -> Option<&DeviceRecord> {
        self.selected.and_then(|i| self.devices.get(i))
    }

    pub fn select_serial(&mut self, serial: &str) -> bool {
        match self.devices.iter().position(|d| d.serial == serial) {
            Some(idx) => {
                self.selected = Some(idx);
                true
            }
            None => false,
        }
    }

    pub fn session_state(&self) -> SessionState {
        self.session
            .as_ref()
            .map(|s| SessionState::from(s.mode()))
            .unwrap_or_default()
    }

    /// Mode the next launch will use
    pub fn supervision_mode(&self) -> SupervisionMode {
        SupervisionMode::from_show_log(self.show_log)
    }

    // ─────────────────────────────────────────────────────────
    // Log View
    // ─────────────────────────────────────────────────────────

    pub fn add_log(&mut self, entry: LogEntry) {
        if self.logs.len() >= MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    pub fn log(&mut self, level: LogLevel, source: LogSource, phrase: Phrase) {
        let text = phrase.text(self.language);
        self.add_log(LogEntry::new(level, source, text));
    }

    pub fn log_info(&mut self, source: LogSource, phrase: Phrase) {
        self.log(LogLevel::Info, source, phrase);
    }

    pub fn log_warn(&mut self, source: LogSource, phrase: Phrase) {
        self.log(LogLevel::Warning, source, phrase);
    }

    pub fn log_error(&mut self, source: LogSource, phrase: Phrase) {
        self.log(LogLevel::Error, source, phrase);
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
        self.log_scroll = 0;
    }

    pub fn has_error_logs(&self) -> bool {
        self.logs.iter().any(LogEntry::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(Settings::default(), ToolPaths::default())
    }

    #[test]
    fn test_new_state_from_settings() {
        let mut settings = Settings::default();
        settings.session.show_log = true;
        settings.wireless.last_ip = Some("10.0.0.7".into());
        settings.ui.language = Language::Chinese;

        let state = AppState::new(settings, ToolPaths::default());
        assert_eq!(state.phase, AppPhase::Initializing);
        assert_eq!(state.supervision_mode(), SupervisionMode::Monitoring);
        assert_eq!(state.last_ip.as_deref(), Some("10.0.0.7"));
        assert_eq!(state.language, Language::Chinese);
        assert_eq!(state.session_state(), SessionState::Idle);
    }

    #[test]
    fn test_to_settings_keeps_tool_section() {
        let mut settings = Settings::default();
        settings.tools.host_screen_width = 2560;
        let mut state = AppState::new(settings, ToolPaths::default());
        state.show_log = true;
        state.params.screen_off = true;

        let saved = state.to_settings();
        assert_eq!(saved.tools.host_screen_width, 2560);
        assert!(saved.session.show_log);
        assert!(saved.stream.screen_off);
    }

    #[test]
    fn test_log_ring_is_bounded() {
        let mut state = state();
        for _ in 0..(MAX_LOG_ENTRIES + 10) {
            state.log_info(LogSource::App, Phrase::Refreshing);
        }
        assert_eq!(state.logs.len(), MAX_LOG_ENTRIES);
    }

    #[test]
    fn test_log_uses_current_language() {
        let mut state = state();
        state.log_warn(LogSource::Bridge, Phrase::NoDevices);
        state.language = Language::Chinese;
        state.log_warn(LogSource::Bridge, Phrase::NoDevices);

        assert_eq!(state.logs[0].message, "No devices found");
        assert_eq!(state.logs[1].message, "未检测到设备");
        assert!(!state.has_error_logs());
    }

    #[test]
    fn test_select_serial() {
        let mut state = state();
        state.devices = vec![
            DeviceRecord::new("A", "a"),
            DeviceRecord::new("192.168.1.5:5555", "b"),
        ];
        assert!(state.select_serial("192.168.1.5:5555"));
        assert_eq!(state.selected_device().unwrap().display_label, "b");
        assert!(!state.select_serial("missing"));
        assert_eq!(state.selected, Some(1));
    }

    #[test]
    fn test_param_field_cycle() {
        assert_eq!(ParamField::ShowLog.next(), ParamField::MaxDimension);
        assert_eq!(ParamField::MaxDimension.prev(), ParamField::ShowLog);
        assert!(ParamField::ScreenOff.is_flag());
        assert!(!ParamField::Bitrate.is_flag());
    }
}

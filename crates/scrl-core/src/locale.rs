//! UI and log text in English and Chinese
//!
//! Keys are enums so a missing translation is a compile error. Static labels
//! use [`Label`]; messages with arguments use [`Phrase`], whose variants carry
//! their arguments.

use serde::{Deserialize, Serialize};

use crate::params::{Choice, MaxDimension, WindowPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Choice for Language {
    const ALL: &'static [Self] = &[Language::English, Language::Chinese];
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }
}

/// Fixed UI strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    AppTitle,
    Devices,
    Scanning,
    NoDevice,
    Parameters,
    MaxSize,
    MaxFps,
    Codec,
    Bitrate,
    ScreenOff,
    ScreenOffWarning,
    Borderless,
    WindowPosition,
    PrintFps,
    ShowLog,
    Native,
    PositionCenter,
    PositionTopLeft,
    PositionTopRight,
    On,
    Off,
    LogTitle,
    DeviceWireless,
    DeviceUnauthorized,
    SetupKeys,
    MonitoringKeys,
    WirelessTitle,
    WirelessPrompt,
    WirelessFirstTime,
    WirelessKeys,
    OnboardingKeys,
    DontShowAgain,
    SessionSilent,
}

impl Label {
    pub fn text(self, lang: Language) -> &'static str {
        use Language::{Chinese as Zh, English as En};
        match (self, lang) {
            (Label::AppTitle, _) => "scrcpy launcher",
            (Label::Devices, En) => "Devices",
            (Label::Devices, Zh) => "设备",
            (Label::Scanning, En) => "Scanning...",
            (Label::Scanning, Zh) => "正在扫描...",
            (Label::NoDevice, En) => "No device found",
            (Label::NoDevice, Zh) => "未检测到设备",
            (Label::Parameters, En) => "Stream parameters",
            (Label::Parameters, Zh) => "推流参数",
            (Label::MaxSize, En) => "Max size",
            (Label::MaxSize, Zh) => "最大分辨率",
            (Label::MaxFps, En) => "Max FPS",
            (Label::MaxFps, Zh) => "帧率限制",
            (Label::Codec, En) => "Video codec",
            (Label::Codec, Zh) => "视频编码",
            (Label::Bitrate, En) => "Bitrate",
            (Label::Bitrate, Zh) => "传输码率",
            (Label::ScreenOff, En) => "Turn screen off",
            (Label::ScreenOff, Zh) => "启动即熄屏",
            (Label::ScreenOffWarning, En) => {
                "With a lock screen the unlock UI may not show. Prefer LCtrl+O after connecting."
            }
            (Label::ScreenOffWarning, Zh) => "若有锁屏密码，投屏可能无法显示解锁界面。建议连接后按 LCtrl+O 熄屏。",
            (Label::Borderless, En) => "Borderless window",
            (Label::Borderless, Zh) => "无边框模式",
            (Label::WindowPosition, En) => "Window position",
            (Label::WindowPosition, Zh) => "窗口位置",
            (Label::PrintFps, En) => "Print FPS to log",
            (Label::PrintFps, Zh) => "在日志中打印 FPS",
            (Label::ShowLog, En) => "Show log (monitoring)",
            (Label::ShowLog, Zh) => "显示运行日志",
            (Label::Native, En) => "Native",
            (Label::Native, Zh) => "原生",
            (Label::PositionCenter, En) => "Center",
            (Label::PositionCenter, Zh) => "居中",
            (Label::PositionTopLeft, En) => "Top-left",
            (Label::PositionTopLeft, Zh) => "左上角",
            (Label::PositionTopRight, En) => "Top-right",
            (Label::PositionTopRight, Zh) => "右上角",
            (Label::On, En) => "on",
            (Label::On, Zh) => "开",
            (Label::Off, En) => "off",
            (Label::Off, Zh) => "关",
            (Label::LogTitle, En) => "Console output",
            (Label::LogTitle, Zh) => "运行日志",
            (Label::DeviceWireless, En) => "Wireless",
            (Label::DeviceWireless, Zh) => "无线",
            (Label::DeviceUnauthorized, En) => "Unauthorized",
            (Label::DeviceUnauthorized, Zh) => "未授权",
            (Label::SetupKeys, En) => {
                "↑↓ device  Tab field  ←→ change  Space toggle  Enter start  r refresh  w wireless  x disconnect  X disconnect all  c clear  L lang  ? help  q quit"
            }
            (Label::SetupKeys, Zh) => {
                "↑↓ 设备  Tab 选项  ←→ 调整  空格 切换  Enter 开始  r 刷新  w 无线  x 断开  X 全部断开  c 清空  L 语言  ? 帮助  q 退出"
            }
            (Label::MonitoringKeys, En) => "Mirroring in progress. Closing the mirror window exits the launcher.  q quit",
            (Label::MonitoringKeys, Zh) => "投屏进行中，关闭投屏窗口后程序将退出。  q 退出",
            (Label::WirelessTitle, En) => "Wireless setup",
            (Label::WirelessTitle, Zh) => "无线连接向导",
            (Label::WirelessPrompt, En) => {
                "Enter phone IP address. Settings → About phone → Status shows it."
            }
            (Label::WirelessPrompt, Zh) => "请输入手机 IP 地址（手机设置 → 关于手机 → 状态信息）",
            (Label::WirelessFirstTime, En) => {
                "No device detected. Connect over USB and press w to detect the IP automatically, or enter a known IP below."
            }
            (Label::WirelessFirstTime, Zh) => {
                "未检测到设备。可用 USB 线连接手机后按 w 自动获取 IP，或在下方手动输入已知的 IP 地址。"
            }
            (Label::WirelessKeys, En) => "Enter connect  Esc cancel",
            (Label::WirelessKeys, Zh) => "Enter 连接  Esc 取消",
            (Label::OnboardingKeys, En) => "←→ page  Enter close  d don't show again",
            (Label::OnboardingKeys, Zh) => "←→ 翻页  Enter 关闭  d 不再显示",
            (Label::DontShowAgain, En) => "Don't show again",
            (Label::DontShowAgain, Zh) => "不再显示",
            (Label::SessionSilent, En) => "Mirroring in progress. The launcher returns when the mirror window closes.",
            (Label::SessionSilent, Zh) => "投屏进行中，关闭投屏窗口后将恢复启动器。",
        }
    }
}

/// Display name of a max-dimension choice
pub fn max_dimension_text(value: MaxDimension, lang: Language) -> String {
    match value.pixels() {
        Some(px) => format!("{} ({})", value.tier(), px),
        None => Label::Native.text(lang).to_string(),
    }
}

pub fn window_position_text(value: WindowPosition, lang: Language) -> &'static str {
    match value {
        WindowPosition::Center => Label::PositionCenter.text(lang),
        WindowPosition::TopLeft => Label::PositionTopLeft.text(lang),
        WindowPosition::TopRight => Label::PositionTopRight.text(lang),
    }
}

/// Log messages with arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phrase {
    Refreshing,
    DeviceChangeDetected,
    HotplugStarted,
    HotplugToolMissing,
    FoundDevices { count: usize },
    NoDevices,
    AdbNotFound,
    AdbTimedOut,
    ScanFailed { error: String },
    AutoSelected { name: String },
    AutoConfigDevice { model: String, screen: Option<String>, ram_gb: u64 },
    AutoConfigRecommended { size: String, bitrate: u8 },
    AutoConfigHint { model: String, ram_gb: u64 },
    NoValidDevice,
    SessionAlreadyActive,
    Launching,
    LaunchDevice { label: String },
    LaunchParams { summary: String },
    LaunchCommand { command: String },
    MirrorLaunched,
    MirrorNotFound { path: String },
    LaunchFailed { error: String },
    MirrorExitedNormally,
    MirrorExitCode { code: String },
    ExitingAfterMirror,
    WindowRestored,
    DetectedIp { ip: String },
    IpFallback,
    WirelessFirstTime,
    ManualIpEntry,
    EnablingTcpip { device: String },
    TcpipFailed { error: String },
    WaitingRestart,
    Connecting { target: String },
    Connected { target: String },
    UnplugHint,
    ConnectMayHaveFailed { output: String },
    ConnectTimedOut,
    ConnectFailed { error: String },
    InvalidIp { input: String },
    Disconnecting { device: String },
    Disconnected { device: String },
    DisconnectFailed { error: String },
    UsbCannotDisconnect,
    NoWirelessDevices,
    AllWirelessDisconnected,
    LanguageChanged,
    SettingsSaveFailed { error: String },
}

impl Phrase {
    pub fn text(&self, lang: Language) -> String {
        use Language::{Chinese as Zh, English as En};
        match (self, lang) {
            (Phrase::Refreshing, En) => "Refreshing device list...".into(),
            (Phrase::Refreshing, Zh) => "正在刷新设备列表...".into(),
            (Phrase::DeviceChangeDetected, En) => "Device change detected, refreshing...".into(),
            (Phrase::DeviceChangeDetected, Zh) => "检测到设备变化，正在刷新...".into(),
            (Phrase::HotplugStarted, En) => "Device hotplug monitoring started".into(),
            (Phrase::HotplugStarted, Zh) => "设备热插拔监听已启动".into(),
            (Phrase::HotplugToolMissing, En) => {
                "Hotplug monitoring unavailable: adb not found, retrying".into()
            }
            (Phrase::HotplugToolMissing, Zh) => "热插拔监听不可用：未找到 ADB，稍后重试".into(),
            (Phrase::FoundDevices { count }, En) => format!("Found {} device(s)", count),
            (Phrase::FoundDevices { count }, Zh) => format!("找到 {} 台设备", count),
            (Phrase::NoDevices, En) => "No devices found".into(),
            (Phrase::NoDevices, Zh) => "未检测到设备".into(),
            (Phrase::AdbNotFound, En) => "ADB not found. Ensure adb is on PATH.".into(),
            (Phrase::AdbNotFound, Zh) => "未找到 ADB。请确保 adb 在 PATH 环境变量中。".into(),
            (Phrase::AdbTimedOut, En) => "ADB command timed out.".into(),
            (Phrase::AdbTimedOut, Zh) => "ADB 命令超时。".into(),
            (Phrase::ScanFailed { error }, En) => format!("Failed to scan devices: {}", error),
            (Phrase::ScanFailed { error }, Zh) => format!("扫描设备失败: {}", error),
            (Phrase::AutoSelected { name }, En) => format!("Auto-selected wireless device: {}", name),
            (Phrase::AutoSelected { name }, Zh) => format!("已自动选择无线设备: {}", name),
            (
                Phrase::AutoConfigDevice {
                    model,
                    screen,
                    ram_gb,
                },
                En,
            ) => format!(
                "[AutoConfig] Device: {} | Screen: {} | PC RAM: {}GB",
                model,
                screen.as_deref().unwrap_or("Unknown"),
                ram_gb
            ),
            (
                Phrase::AutoConfigDevice {
                    model,
                    screen,
                    ram_gb,
                },
                Zh,
            ) => format!(
                "[AutoConfig] 设备: {} | 屏幕: {} | 电脑内存: {}GB",
                model,
                screen.as_deref().unwrap_or("未知"),
                ram_gb
            ),
            (Phrase::AutoConfigRecommended { size, bitrate }, En) => {
                format!("[AutoConfig] Recommended: {}, {}Mbps", size, bitrate)
            }
            (Phrase::AutoConfigRecommended { size, bitrate }, Zh) => {
                format!("[AutoConfig] 推荐: {}, {}Mbps", size, bitrate)
            }
            (Phrase::AutoConfigHint { model, ram_gb }, En) => {
                format!("Auto-configured for [{} + {}GB RAM]", model, ram_gb)
            }
            (Phrase::AutoConfigHint { model, ram_gb }, Zh) => {
                format!("已根据硬件 [{} + {}GB RAM] 自动优化", model, ram_gb)
            }
            (Phrase::NoValidDevice, En) => "No valid device selected.".into(),
            (Phrase::NoValidDevice, Zh) => "未选择有效设备。".into(),
            (Phrase::SessionAlreadyActive, En) => "A mirroring session is already running.".into(),
            (Phrase::SessionAlreadyActive, Zh) => "已有投屏会话在运行。".into(),
            (Phrase::Launching, En) => "Launching scrcpy...".into(),
            (Phrase::Launching, Zh) => "正在启动 scrcpy...".into(),
            (Phrase::LaunchDevice { label }, En) => format!("Device: {}", label),
            (Phrase::LaunchDevice { label }, Zh) => format!("设备: {}", label),
            (Phrase::LaunchParams { summary }, En) => format!("Params: {}", summary),
            (Phrase::LaunchParams { summary }, Zh) => format!("参数: {}", summary),
            (Phrase::LaunchCommand { command }, En) => format!("Command: {}", command),
            (Phrase::LaunchCommand { command }, Zh) => format!("命令: {}", command),
            (Phrase::MirrorLaunched, En) => "Scrcpy launched successfully!".into(),
            (Phrase::MirrorLaunched, Zh) => "Scrcpy 启动成功！".into(),
            (Phrase::MirrorNotFound { path }, En) => format!("scrcpy not found at: {}", path),
            (Phrase::MirrorNotFound { path }, Zh) => format!("未找到 scrcpy: {}", path),
            (Phrase::LaunchFailed { error }, En) => format!("Failed to launch scrcpy: {}", error),
            (Phrase::LaunchFailed { error }, Zh) => format!("Scrcpy 启动失败: {}", error),
            (Phrase::MirrorExitedNormally, En) => "Scrcpy exited normally.".into(),
            (Phrase::MirrorExitedNormally, Zh) => "Scrcpy 已正常退出。".into(),
            (Phrase::MirrorExitCode { code }, En) => format!("Scrcpy exited with code: {}", code),
            (Phrase::MirrorExitCode { code }, Zh) => format!("Scrcpy 异常退出，代码: {}", code),
            (Phrase::ExitingAfterMirror, En) => "Mirror window closed, exiting launcher.".into(),
            (Phrase::ExitingAfterMirror, Zh) => "投屏窗口已关闭，正在退出。".into(),
            (Phrase::WindowRestored, En) => "Mirroring ended, launcher restored.".into(),
            (Phrase::WindowRestored, Zh) => "投屏已结束，启动器已恢复。".into(),
            (Phrase::DetectedIp { ip }, En) => format!("Detected device IP: {}", ip),
            (Phrase::DetectedIp { ip }, Zh) => format!("检测到设备 IP: {}", ip),
            (Phrase::IpFallback, En) => {
                "Failed to auto-detect IP, falling back to manual input.".into()
            }
            (Phrase::IpFallback, Zh) => "无法自动检测 IP，将使用手动输入。".into(),
            (Phrase::WirelessFirstTime, En) => {
                "First wireless connection and no device detected. Connect over USB or enter the IP manually.".into()
            }
            (Phrase::WirelessFirstTime, Zh) => "首次无线连接未检测到设备，请用 USB 连接或手动输入 IP。".into(),
            (Phrase::ManualIpEntry, En) => "No USB device detected, please enter IP manually.".into(),
            (Phrase::ManualIpEntry, Zh) => "未检测到 USB 设备，请手动输入 IP。".into(),
            (Phrase::EnablingTcpip { device }, En) => {
                format!("Enabling TCP/IP mode on {}...", device)
            }
            (Phrase::EnablingTcpip { device }, Zh) => format!("正在对 {} 启用 TCP/IP 模式...", device),
            (Phrase::TcpipFailed { error }, En) => format!("Failed to enable TCP/IP mode: {}", error),
            (Phrase::TcpipFailed { error }, Zh) => format!("启用 TCP/IP 模式失败: {}", error),
            (Phrase::WaitingRestart, En) => {
                "Waiting 2 seconds for the device to restart adbd...".into()
            }
            (Phrase::WaitingRestart, Zh) => "等待 2 秒让设备重启 ADB...".into(),
            (Phrase::Connecting { target }, En) => format!("Connecting to {}...", target),
            (Phrase::Connecting { target }, Zh) => format!("正在连接 {}...", target),
            (Phrase::Connected { target }, En) => format!("Successfully connected to {}", target),
            (Phrase::Connected { target }, Zh) => format!("已成功连接到 {}", target),
            (Phrase::UnplugHint, En) => "You can unplug the USB cable now.".into(),
            (Phrase::UnplugHint, Zh) => "您现在可以拔掉 USB 线了。".into(),
            (Phrase::ConnectMayHaveFailed { output }, En) => {
                format!("Connection may have failed: {}", output)
            }
            (Phrase::ConnectMayHaveFailed { output }, Zh) => format!("连接可能失败: {}", output),
            (Phrase::ConnectTimedOut, En) => {
                "Connection timed out. Check that the IP is correct.".into()
            }
            (Phrase::ConnectTimedOut, Zh) => "连接超时。请检查 IP 是否正确。".into(),
            (Phrase::ConnectFailed { error }, En) => format!("Failed to connect: {}", error),
            (Phrase::ConnectFailed { error }, Zh) => format!("连接失败: {}", error),
            (Phrase::InvalidIp { input }, En) => format!("Not an IPv4 address: {}", input),
            (Phrase::InvalidIp { input }, Zh) => format!("不是有效的 IPv4 地址: {}", input),
            (Phrase::Disconnecting { device }, En) => format!("Disconnecting device: {}...", device),
            (Phrase::Disconnecting { device }, Zh) => format!("正在断开设备: {}...", device),
            (Phrase::Disconnected { device }, En) => {
                format!("Disconnected wireless device: {}", device)
            }
            (Phrase::Disconnected { device }, Zh) => format!("已断开无线设备连接: {}", device),
            (Phrase::DisconnectFailed { error }, En) => {
                format!("Failed to disconnect device: {}", error)
            }
            (Phrase::DisconnectFailed { error }, Zh) => format!("断开设备失败: {}", error),
            (Phrase::UsbCannotDisconnect, En) => {
                "USB devices cannot be disconnected manually. Unplug the cable.".into()
            }
            (Phrase::UsbCannotDisconnect, Zh) => "USB 设备无法手动断开，请直接拔掉数据线。".into(),
            (Phrase::NoWirelessDevices, En) => "No wireless devices connected.".into(),
            (Phrase::NoWirelessDevices, Zh) => "当前没有已连接的无线设备。".into(),
            (Phrase::AllWirelessDisconnected, En) => "All wireless devices disconnected.".into(),
            (Phrase::AllWirelessDisconnected, Zh) => "已断开所有无线设备。".into(),
            (Phrase::LanguageChanged, En) => "Language: English".into(),
            (Phrase::LanguageChanged, Zh) => "语言：中文".into(),
            (Phrase::SettingsSaveFailed { error }, En) => {
                format!("Failed to save settings: {}", error)
            }
            (Phrase::SettingsSaveFailed { error }, Zh) => format!("保存设置失败: {}", error),
        }
    }
}

/// One page of the first-run guide
#[derive(Debug, Clone, Copy)]
pub struct OnboardingPage {
    pub title: &'static str,
    pub body: &'static str,
}

const ONBOARDING_EN: &[OnboardingPage] = &[
    OnboardingPage {
        title: "Connection modes",
        body: "1. USB: no network needed, lowest latency, best quality. Connect the cable and enable USB debugging.\n\n2. Wi-Fi: phone and computer on the same network. No cable, good for light everyday use.",
    },
    OnboardingPage {
        title: "Preparation",
        body: "Enable USB debugging:\n\n1. Settings → About phone → tap Build number 7 times.\n2. Settings → Developer options → enable USB debugging.\n3. Accept the authorization prompt on the phone after plugging in.",
    },
    OnboardingPage {
        title: "Wireless mirroring",
        body: "The first wireless connection needs the cable:\n\n1. Plug in USB and make sure the device shows up.\n2. Press w.\n3. When the log reports success, unplug the cable.\n\nIf it fails, check that both are on the same Wi-Fi.",
    },
    OnboardingPage {
        title: "Shortcuts",
        body: "The mirror window uses left Ctrl as its modifier:\n\nLCtrl+F  fullscreen\nLCtrl+P  screen on/off\nLCtrl+H  home\nLCtrl+O  turn device screen off",
    },
];

const ONBOARDING_ZH: &[OnboardingPage] = &[
    OnboardingPage {
        title: "连接模式概览",
        body: "1. 有线模式 (USB)：无需网络，延迟最低，画质最高。只需用数据线连接电脑，并开启 USB 调试即可。\n\n2. 无线模式 (Wi-Fi)：需要手机和电脑在同一 Wi-Fi 下。摆脱线缆束缚，适合日常轻度使用。",
    },
    OnboardingPage {
        title: "准备工作",
        body: "如何开启 USB 调试？\n\n1. 手机设置 → 关于手机 → 连续点击 7 次【版本号】开启开发者模式。\n2. 返回设置 → 开发者选项 → 开启【USB 调试】。\n3. 连接电脑后，手机上弹出授权框，请点击【允许】。",
    },
    OnboardingPage {
        title: "无线投屏步骤",
        body: "首次连接需要插线：\n\n1. 先插上 USB 线，确保有线连接成功。\n2. 按 w 键。\n3. 日志提示成功后，拔掉数据线即可。\n\n如果失败，请检查两者是否在同一 Wi-Fi 网络。",
    },
    OnboardingPage {
        title: "快捷键",
        body: "投屏窗口使用左 Ctrl 作为快捷键修饰键：\n\n左Ctrl+F  全屏模式\n左Ctrl+P  点亮/关闭屏幕\n左Ctrl+H  返回桌面\n左Ctrl+O  关闭手机屏幕",
    },
];

pub fn onboarding_pages(lang: Language) -> &'static [OnboardingPage] {
    match lang {
        Language::English => ONBOARDING_EN,
        Language::Chinese => ONBOARDING_ZH,
    }
}

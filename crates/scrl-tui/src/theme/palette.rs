//! Color palette

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const CARD_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;

// --- Log level colors ---
pub const LOG_ERROR: Color = Color::Red;
pub const LOG_ERROR_MSG: Color = Color::LightRed;
pub const LOG_WARNING: Color = Color::Yellow;
pub const LOG_INFO: Color = Color::Green;
pub const LOG_INFO_MSG: Color = Color::White;
pub const LOG_DEBUG: Color = Color::DarkGray;

// --- Log source colors ---
pub const SOURCE_APP: Color = Color::Magenta;
pub const SOURCE_BRIDGE: Color = Color::Yellow;
pub const SOURCE_MIRROR: Color = Color::Blue;
pub const SOURCE_HOTPLUG: Color = Color::Cyan;
pub const SOURCE_CONFIG: Color = Color::Gray;

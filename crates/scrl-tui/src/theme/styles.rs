//! Semantic style builders

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};
use scrl_core::{LogLevel, LogSource};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Highlighted row in a list or the focused parameter
pub fn selected_highlight() -> Style {
    Style::default()
        .fg(palette::DEEPEST_BG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Containers ---

/// Rounded bordered panel; cyan border when it has focus
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Style::default().fg(palette::BORDER_ACTIVE)
        } else {
            Style::default().fg(palette::BORDER_DIM)
        })
        .style(Style::default().bg(palette::CARD_BG))
}

/// Modal dialog container with a title
pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::BORDER_ACTIVE))
        .title(format!(" {} ", title))
        .title_style(accent_bold())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Log styles ---

/// (prefix style, message style) for a log level
pub fn log_level(level: LogLevel) -> (Style, Style) {
    match level {
        LogLevel::Error => (
            Style::default()
                .fg(palette::LOG_ERROR)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(palette::LOG_ERROR_MSG),
        ),
        LogLevel::Warning => (
            Style::default()
                .fg(palette::LOG_WARNING)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(palette::LOG_WARNING),
        ),
        LogLevel::Info => (
            Style::default().fg(palette::LOG_INFO),
            Style::default().fg(palette::LOG_INFO_MSG),
        ),
        LogLevel::Debug => (
            Style::default().fg(palette::LOG_DEBUG),
            Style::default().fg(palette::LOG_DEBUG),
        ),
    }
}

pub fn log_source(source: LogSource) -> Style {
    let color = match source {
        LogSource::App => palette::SOURCE_APP,
        LogSource::Bridge => palette::SOURCE_BRIDGE,
        LogSource::Mirror => palette::SOURCE_MIRROR,
        LogSource::Hotplug => palette::SOURCE_HOTPLUG,
        LogSource::Config => palette::SOURCE_CONFIG,
    };
    Style::default().fg(color)
}

/// Session indicator: running sessions in green, idle in muted gray
pub fn session_indicator(running: bool) -> Style {
    if running {
        Style::default()
            .fg(palette::STATUS_GREEN)
            .add_modifier(Modifier::BOLD)
    } else {
        text_muted()
    }
}

pub fn warning() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

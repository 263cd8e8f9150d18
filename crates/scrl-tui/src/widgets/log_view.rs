//! Log panel
//!
//! Entries are single lines anchored to the bottom. `scroll` counts entries
//! scrolled up from the newest one.

use std::collections::VecDeque;
use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use scrl_core::LogEntry;

use crate::theme::styles;

pub struct LogView<'a> {
    logs: &'a VecDeque<LogEntry>,
    scroll: usize,
    title: &'a str,
}

impl<'a> LogView<'a> {
    pub fn new(logs: &'a VecDeque<LogEntry>, title: &'a str) -> Self {
        Self {
            logs,
            scroll: 0,
            title,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn title_line(&self) -> String {
        if self.scroll > 0 {
            format!(" {} ↑{} ", self.title, self.scroll)
        } else {
            format!(" {} ", self.title)
        }
    }
}

/// Indices of the entries that fit in `height` rows
pub fn visible_range(len: usize, height: usize, scroll: usize) -> Range<usize> {
    let end = len.saturating_sub(scroll);
    let start = end.saturating_sub(height);
    start..end
}

pub fn format_entry(entry: &LogEntry) -> Line<'static> {
    let (level_style, message_style) = styles::log_level(entry.level);
    Line::from(vec![
        Span::styled(entry.formatted_time(), styles::text_muted()),
        Span::raw(" "),
        Span::styled(entry.level.prefix(), level_style),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", entry.source.prefix()),
            styles::log_source(entry.source),
        ),
        Span::raw(" "),
        Span::styled(entry.message.clone(), message_style),
    ])
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false)
            .title(self.title_line())
            .title_style(styles::text_secondary());
        let inner = block.inner(area);
        block.render(area, buf);

        let range = visible_range(self.logs.len(), inner.height as usize, self.scroll);
        let lines: Vec<Line> = self.logs.range(range).map(format_entry).collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrl_core::{LogLevel, LogSource};

    #[test]
    fn test_visible_range_follows_newest() {
        assert_eq!(visible_range(100, 10, 0), 90..100);
        assert_eq!(visible_range(5, 10, 0), 0..5);
    }

    #[test]
    fn test_visible_range_scrolled() {
        assert_eq!(visible_range(100, 10, 20), 70..80);
        assert_eq!(visible_range(100, 10, 95), 0..5);
        assert_eq!(visible_range(100, 10, 200), 0..0);
    }

    #[test]
    fn test_format_entry_includes_level_and_source() {
        let entry = LogEntry::new(LogLevel::Warning, LogSource::Mirror, "WARN: device busy");
        let text: String = format_entry(&entry)
            .spans
            .iter()
            .map(|s| s.content.to_string())
            .collect();

        assert!(text.contains("WRN [scrcpy] WARN: device busy"));
        assert!(text.starts_with(&entry.formatted_time()));
    }

    #[test]
    fn test_title_shows_scroll_position() {
        let logs = VecDeque::new();
        assert_eq!(LogView::new(&logs, "Log").title_line(), " Log ");
        assert_eq!(LogView::new(&logs, "Log").scroll(3).title_line(), " Log ↑3 ");
    }
}

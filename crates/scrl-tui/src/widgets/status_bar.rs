//! Key hint line at the bottom of the screen

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::styles;

pub struct StatusBar<'a> {
    keys: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(keys: &'a str) -> Self {
        Self { keys }
    }
}

/// Cut `text` to at most `max` display columns, ending with `…` when cut
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = truncate_to_width(self.keys, area.width.saturating_sub(1) as usize);
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(text, styles::keybinding()),
        ]))
        .render(area, buf);
    }
}

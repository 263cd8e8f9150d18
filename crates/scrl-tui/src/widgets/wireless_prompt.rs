//! Manual IP entry dialog for wireless connect

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use scrl_core::{Label, Language};

use super::modal_overlay;
use crate::theme::styles;

const WIDTH: u16 = 64;
const HEIGHT: u16 = 9;
/// Wrapped guidance text plus a spacer
const GUIDANCE_HEIGHT: u16 = 4;

pub struct WirelessPrompt<'a> {
    input: &'a str,
    language: Language,
    first_time: bool,
}

impl<'a> WirelessPrompt<'a> {
    pub fn new(input: &'a str, language: Language) -> Self {
        Self {
            input,
            language,
            first_time: false,
        }
    }

    /// Lead with guidance for a first wireless connection
    pub fn first_time(mut self, first_time: bool) -> Self {
        self.first_time = first_time;
        self
    }
}

impl Widget for WirelessPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = if self.first_time {
            HEIGHT + GUIDANCE_HEIGHT
        } else {
            HEIGHT
        };
        let modal = modal_overlay::prepare(WIDTH, height, area, buf);
        let block = styles::modal_block(Label::WirelessTitle.text(self.language));
        let inner = block.inner(modal);
        block.render(modal, buf);

        let mut lines = Vec::new();
        if self.first_time {
            lines.push(Line::styled(
                Label::WirelessFirstTime.text(self.language),
                styles::warning(),
            ));
            lines.push(Line::raw(""));
        }
        lines.extend([
            Line::styled(
                Label::WirelessPrompt.text(self.language),
                styles::text_primary(),
            ),
            Line::raw(""),
            Line::from(vec![
                Span::styled("> ", styles::accent()),
                Span::styled(self.input.to_string(), styles::accent_bold()),
                Span::styled("█", styles::accent()),
                Span::styled(":5555", styles::text_muted()),
            ]),
            Line::raw(""),
            Line::styled(Label::WirelessKeys.text(self.language), styles::keybinding()),
        ]);

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

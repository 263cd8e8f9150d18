//! Header bar: title, session status and language

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use scrl_app::AppState;
use scrl_core::{Label, SessionState};

use crate::theme::styles;

pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// "● <device>" while a session runs, otherwise "○"
    fn session_span(&self) -> Span<'static> {
        match (self.state.session_state(), self.state.session.as_ref()) {
            (SessionState::Idle, _) | (_, None) => {
                Span::styled("○", styles::session_indicator(false))
            }
            (_, Some(session)) => Span::styled(
                format!("● {}", session.label),
                styles::session_indicator(true),
            ),
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let lang = self.state.language;
        let language = format!("[{}]", lang.code());

        let mut spans = vec![
            Span::styled(Label::AppTitle.text(lang), styles::accent_bold()),
            Span::raw("  "),
            self.session_span(),
        ];

        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let padding = (inner.width as usize).saturating_sub(used + language.width());
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(language, styles::text_secondary()));

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

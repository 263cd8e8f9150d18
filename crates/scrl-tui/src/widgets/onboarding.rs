//! First-run guide overlay

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use scrl_core::{onboarding_pages, Label, Language};

use super::modal_overlay;
use crate::theme::styles;

const WIDTH: u16 = 72;
const HEIGHT: u16 = 18;

pub struct OnboardingOverlay {
    page: usize,
    dont_show_again: bool,
    language: Language,
}

impl OnboardingOverlay {
    pub fn new(page: usize, dont_show_again: bool, language: Language) -> Self {
        Self {
            page,
            dont_show_again,
            language,
        }
    }

    fn footer(&self, total: usize) -> Line<'static> {
        let mark = if self.dont_show_again { "x" } else { " " };
        Line::from(vec![
            Span::styled(
                format!("[{}] {}", mark, Label::DontShowAgain.text(self.language)),
                styles::text_secondary(),
            ),
            Span::raw("   "),
            Span::styled(format!("{}/{}", self.page + 1, total), styles::accent()),
            Span::raw("   "),
            Span::styled(Label::OnboardingKeys.text(self.language), styles::keybinding()),
        ])
    }
}

impl Widget for OnboardingOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pages = onboarding_pages(self.language);
        let Some(page) = pages.get(self.page.min(pages.len().saturating_sub(1))) else {
            return;
        };

        let modal = modal_overlay::prepare(WIDTH, HEIGHT, area, buf);
        let block = styles::modal_block(page.title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        Paragraph::new(page.body)
            .style(styles::text_primary())
            .wrap(Wrap { trim: false })
            .render(body, buf);
        Paragraph::new(self.footer(pages.len())).render(footer, buf);
    }
}

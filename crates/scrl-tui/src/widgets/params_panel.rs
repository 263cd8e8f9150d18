//! Stream parameter panel
//!
//! One row per [`ParamField`]. The focused row is highlighted and shows
//! `◀ value ▶` for cycling fields; flags render as checkboxes. The last row
//! carries the auto-config hint when a recommendation was applied.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use scrl_app::ParamField;
use scrl_core::locale::{max_dimension_text, window_position_text};
use scrl_core::{Choice, Label, Language, StreamParameters};

use crate::theme::styles;

/// Column width reserved for field labels
const LABEL_WIDTH: usize = 22;

pub struct ParamsPanel<'a> {
    params: &'a StreamParameters,
    show_log: bool,
    focus: ParamField,
    hint: Option<&'a str>,
    language: Language,
    /// Editing is pointless while a session runs
    locked: bool,
}

impl<'a> ParamsPanel<'a> {
    pub fn new(params: &'a StreamParameters, show_log: bool, language: Language) -> Self {
        Self {
            params,
            show_log,
            focus: ParamField::default(),
            hint: None,
            language,
            locked: false,
        }
    }

    pub fn focus(mut self, focus: ParamField) -> Self {
        self.focus = focus;
        self
    }

    pub fn hint(mut self, hint: Option<&'a str>) -> Self {
        self.hint = hint;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    fn row(&self, field: ParamField) -> Line<'static> {
        let label = field.label().text(self.language);
        let label = format!(" {:<width$}", label, width = LABEL_WIDTH);
        let value = value_text(field, self.params, self.show_log, self.language);
        let focused = field == self.focus && !self.locked;

        let value = match (focused, field.is_flag()) {
            (true, false) => format!("◀ {} ▶", value),
            _ => value,
        };

        if focused {
            Line::from(vec![
                Span::styled(label, styles::accent()),
                Span::styled(value, styles::selected_highlight()),
            ])
        } else {
            Line::from(vec![
                Span::styled(label, styles::text_secondary()),
                Span::styled(value, styles::text_primary()),
            ])
        }
    }
}

/// Display text for a field's current value
pub fn value_text(
    field: ParamField,
    params: &StreamParameters,
    show_log: bool,
    lang: Language,
) -> String {
    let flag = |on: bool| {
        let mark = if on { "x" } else { " " };
        let text = if on { Label::On } else { Label::Off };
        format!("[{}] {}", mark, text.text(lang))
    };

    match field {
        ParamField::MaxDimension => max_dimension_text(params.max_dimension, lang),
        ParamField::MaxFps => format!("{} fps", params.max_fps.value()),
        ParamField::Codec => params.codec.display_name().to_string(),
        ParamField::Bitrate => params.bitrate.to_string(),
        ParamField::ScreenOff => flag(params.screen_off),
        ParamField::Borderless => flag(params.borderless),
        ParamField::WindowPosition => window_position_text(params.window_position, lang).into(),
        ParamField::PrintFps => flag(params.print_fps),
        ParamField::ShowLog => flag(show_log),
    }
}

impl Widget for ParamsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(!self.locked)
            .title(format!(" {} ", Label::Parameters.text(self.language)))
            .title_style(styles::accent());
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = ParamField::ALL.iter().map(|f| self.row(*f)).collect();

        if self.focus == ParamField::ScreenOff && self.params.screen_off {
            lines.push(Line::styled(
                format!(" {}", Label::ScreenOffWarning.text(self.language)),
                styles::warning(),
            ));
        } else if let Some(hint) = self.hint {
            lines.push(Line::styled(format!(" ✓ {}", hint), styles::accent()));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

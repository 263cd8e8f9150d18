//! Device list panel

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use scrl_core::{DeviceRecord, Label, Language};

use crate::theme::styles;

pub struct DeviceList<'a> {
    devices: &'a [DeviceRecord],
    selected: Option<usize>,
    scanning: bool,
    language: Language,
}

impl<'a> DeviceList<'a> {
    pub fn new(devices: &'a [DeviceRecord], selected: Option<usize>, language: Language) -> Self {
        Self {
            devices,
            selected,
            scanning: false,
            language,
        }
    }

    pub fn scanning(mut self, scanning: bool) -> Self {
        self.scanning = scanning;
        self
    }

    /// First visible row so the selection stays on screen
    fn scroll_offset(&self, height: usize) -> usize {
        match self.selected {
            Some(idx) if height > 0 && idx >= height => idx + 1 - height,
            _ => 0,
        }
    }

    fn title(&self) -> String {
        let base = Label::Devices.text(self.language);
        if self.scanning {
            format!(" {} · {} ", base, Label::Scanning.text(self.language))
        } else {
            format!(" {} ({}) ", base, self.devices.len())
        }
    }
}

impl Widget for DeviceList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true)
            .title(self.title())
            .title_style(styles::accent());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.devices.is_empty() {
            let text = if self.scanning {
                Label::Scanning
            } else {
                Label::NoDevice
            };
            Paragraph::new(Span::styled(
                format!(" {}", text.text(self.language)),
                styles::text_muted(),
            ))
            .render(inner, buf);
            return;
        }

        let height = inner.height as usize;
        let offset = self.scroll_offset(height);
        let lines: Vec<Line> = self
            .devices
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(idx, device)| {
                let icon = if device.is_wireless { "≋" } else { "⌁" };
                if Some(idx) == self.selected {
                    Line::styled(
                        format!("▶ {} {}", icon, device.display_label),
                        styles::selected_highlight(),
                    )
                } else {
                    Line::from(vec![
                        Span::styled(format!("  {} ", icon), styles::text_muted()),
                        Span::styled(device.display_label.clone(), styles::text_primary()),
                    ])
                }
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

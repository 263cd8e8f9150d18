//! Screen layout definitions for the TUI
//!
//! The setup screen stacks header, device/parameter panels, log and key
//! hints. The monitoring screen drops the panels and gives the log the space.

use ratatui::layout::{Constraint, Layout, Rect};

/// Parameter rows plus the auto-config hint line plus borders
pub const PANEL_HEIGHT: u16 = 12;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, session status and language
    pub header: Rect,

    /// Device list and parameter panel; absent in log-only mode
    pub panels: Option<PanelAreas>,

    pub logs: Rect,

    /// Single row of key hints
    pub status: Rect,
}

#[derive(Debug, Clone, Copy)]
pub struct PanelAreas {
    pub devices: Rect,
    pub params: Rect,
}

/// Create the screen layout
///
/// # Arguments
/// * `area` - Total screen area
/// * `log_only` - Monitoring view: no device or parameter panels
pub fn create(area: Rect, log_only: bool) -> ScreenAreas {
    if log_only {
        let [header, logs, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        return ScreenAreas {
            header,
            panels: None,
            logs,
            status,
        };
    }

    let [header, panels, logs, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(PANEL_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let [devices, params] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(panels);

    ScreenAreas {
        header,
        panels: Some(PanelAreas { devices, params }),
        logs,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = create(area, false);

        assert_eq!(layout.header.height, 3);
        let panels = layout.panels.unwrap();
        assert_eq!(panels.devices.height, PANEL_HEIGHT);
        assert_eq!(panels.devices.y, 3);
        assert_eq!(panels.devices.width + panels.params.width, 100);
        assert_eq!(layout.logs.y, 3 + PANEL_HEIGHT);
        assert_eq!(layout.logs.height, 40 - 3 - PANEL_HEIGHT - 1);
        assert_eq!(layout.status.y, 39);
    }

    #[test]
    fn test_log_only_layout() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area, true);

        assert!(layout.panels.is_none());
        assert_eq!(layout.logs.y, 3);
        assert_eq!(layout.logs.height, 20);
        assert_eq!(layout.status.height, 1);
    }

    #[test]
    fn test_layout_areas_contiguous() {
        let area = Rect::new(0, 0, 80, 30);

        let layout = create(area, true);
        assert_eq!(
            layout.header.height + layout.logs.height + layout.status.height,
            area.height
        );

        let layout = create(area, false);
        assert_eq!(
            layout.header.height
                + layout.panels.unwrap().params.height
                + layout.logs.height
                + layout.status.height,
            area.height
        );
    }
}

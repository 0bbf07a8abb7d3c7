// Screen layout: fixed bars around one content area, plus overlay placement.
//
// +--------------------------------------------------+
// | Navigation bar (1 row)                            |
// +--------------------------------------------------+
// |                                                  |
// | Main content (fill)            [popover overlays] |
// |                                                  |
// +--------------------------------------------------+
// | Help bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Resolved screen areas.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: brand, navigation entries, notification badge, avatar.
    pub navbar: Rect,
    /// The active view.
    pub main: Rect,
    /// Bottom row: key hints and the latest status message.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // navbar
            Constraint::Min(3),    // main
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        navbar: vertical[0],
        main: vertical[1],
        help_bar: vertical[2],
    }
}

/// A popover anchored to the top-right corner of `area`, clamped to fit.
pub fn popover_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(area.x + area.width - w, area.y, w, h)
}

/// Compute a centered rectangle of the given size within `area`.
///
/// If the area is too small, the rectangle is clamped to the available space.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);

    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0]);

    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

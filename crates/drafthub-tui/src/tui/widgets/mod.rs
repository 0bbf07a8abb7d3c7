// TUI widget modules for each view and overlay.

pub mod account_menu;
pub mod active_drafts;
pub mod auth_form;
pub mod create_draft;
pub mod draft_options;
pub mod friend_manager;
pub mod help_bar;
pub mod join_draft;
pub mod navbar;
pub mod notifications;
pub mod quit_confirm;
pub mod tabs;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// First row to draw so that `selected` stays inside a window of `visible` rows.
pub fn scroll_offset(selected: usize, total: usize, visible: usize) -> usize {
    if visible == 0 || total <= visible {
        return 0;
    }
    let max_offset = total - visible;
    selected.saturating_sub(visible - 1).min(max_offset)
}

/// Style for the row under the list cursor.
pub fn selected_style() -> Style {
    Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
}

/// Cursor gutter: ">> " on the selected row, padding elsewhere.
pub fn marker(selected: bool) -> Span<'static> {
    if selected {
        Span::styled(">> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("   ")
    }
}

/// Text of an input box: the value, the placeholder when empty, and a block
/// cursor while the input is being edited.
pub fn input_spans(value: &str, placeholder: &str, editing: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if value.is_empty() && !editing {
        spans.push(Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(value.to_string(), Style::default().fg(Color::White)));
    }
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    spans
}

/// Render a draw closure into an in-memory terminal and return its text,
/// one line per row.
#[cfg(test)]
pub(crate) fn render_text(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    let backend = ratatui::backend::TestBackend::new(width, height);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

/// A signed-in view over the sample data.
#[cfg(test)]
pub(crate) fn signed_in_state() -> crate::tui::ViewState {
    let mut state = crate::tui::ViewState::default();
    state.apply_snapshot(drafthub_core::protocol::SessionSnapshot {
        authenticated: true,
        data: drafthub_core::sample::SeedData::default(),
    });
    state
}

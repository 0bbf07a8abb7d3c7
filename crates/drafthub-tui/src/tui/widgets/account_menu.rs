// Account menu popover opened from the navbar avatar.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use drafthub_core::avatar::initials;

use crate::tui::layout::popover_rect;
use crate::tui::widgets::{marker, selected_style};
use crate::tui::{ViewState, ACCOUNT_MENU, CURSOR_ACCOUNT};

const MENU_WIDTH: u16 = 34;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let user = &state.session.data.user;
    let selected = state.cursor(CURSOR_ACCOUNT);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", initials(&user.name)),
                Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}", user.name), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(format!(" {}", user.email), Style::default().fg(Color::Gray))),
        Line::from(Span::styled(" ──────────────", Style::default().fg(Color::DarkGray))),
    ];
    for (i, entry) in ACCOUNT_MENU.iter().enumerate() {
        let line = Line::from(vec![marker(i == selected), Span::raw(*entry)]);
        lines.push(if i == selected { line.style(selected_style()) } else { line });
    }

    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let rect = popover_rect(MENU_WIDTH, height, area);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(" Account ")
                .style(Style::default().bg(Color::Black)),
        ),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::{render_text, signed_in_state};

    #[test]
    fn shows_user_and_entries() {
        let state = signed_in_state();
        let text = render_text(80, 12, |frame| render(frame, frame.area(), &state));
        assert!(text.contains("Alex Johnson"));
        assert!(text.contains("Profile"));
        assert!(text.contains("Log out"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let state = signed_in_state();
        render_text(6, 2, |frame| render(frame, frame.area(), &state));
    }
}

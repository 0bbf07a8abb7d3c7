// Navigation bar: brand, screen entries, notification badge, user avatar.
//
// Signed out, only the brand is shown. Signed in, the entries carry their
// number-key shortcut and the active screen is highlighted.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use drafthub_core::avatar::initials;
use drafthub_core::model::unread_count;

use crate::tui::{Screen, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let brand = Span::styled(
        " DraftHub ",
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
    );

    if !state.is_authenticated() {
        let line = Line::from(vec![
            brand,
            Span::styled("  Sign in to start drafting", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
        return;
    }

    let right = Line::from(account_spans(state));
    let right_width = u16::try_from(right.width()).unwrap_or(u16::MAX).min(area.width);
    let [left_area, right_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);

    let mut left = vec![brand, Span::raw(" ")];
    left.extend(screen_spans(state.screen));
    frame.render_widget(
        Paragraph::new(Line::from(left)).style(Style::default().bg(Color::Black)),
        left_area,
    );
    frame.render_widget(Paragraph::new(right).style(Style::default().bg(Color::Black)), right_area);
}

/// One span per screen, e.g. "1 Dashboard", with the active one highlighted.
pub fn screen_spans(active: Screen) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for screen in Screen::ALL {
        let style = if screen == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} {} ", screen.hotkey(), screen.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Notification badge and avatar, right-aligned.
fn account_spans(state: &ViewState) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let unread = unread_count(&state.session.data.notifications);
    spans.push(Span::styled("[i] Notifications", Style::default().fg(Color::White)));
    if unread > 0 {
        spans.push(Span::styled(
            format!(" {} ", unread),
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    let user = &state.session.data.user;
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        format!(" {} ", initials(&user.name)),
        Style::default().fg(Color::Black).bg(Color::Magenta).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(format!(" {} [u] ", user.name), Style::default().fg(Color::White)));
    spans
}

// Notification popover, anchored under the navbar badge.
//
// Unread entries are bold with a dot; the icon colour follows the kind.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};
use ratatui::Frame;

use drafthub_core::model::{unread_count, Notification, NotificationKind};

use crate::tui::layout::popover_rect;
use crate::tui::widgets::{scroll_offset, selected_style};
use crate::tui::{ViewState, CURSOR_NOTIFICATIONS};

const POPOVER_WIDTH: u16 = 56;
const POPOVER_HEIGHT: u16 = 18;
const ROWS_PER_ENTRY: usize = 3;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let rect = popover_rect(POPOVER_WIDTH, POPOVER_HEIGHT, area);
    frame.render_widget(Clear, rect);

    let notifications = &state.session.data.notifications;
    let unread = unread_count(notifications);
    let mut title = vec![Span::styled(" Notifications ", Style::default().add_modifier(Modifier::BOLD))];
    if unread > 0 {
        title.push(Span::styled("[m] Mark all as read ", Style::default().fg(Color::Cyan)));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(title))
        .style(Style::default().bg(Color::Black));

    if notifications.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("  No notifications yet", Style::default().fg(Color::DarkGray)))
                .block(block),
            rect,
        );
        return;
    }

    let selected = state.cursor(CURSOR_NOTIFICATIONS).min(notifications.len() - 1);
    let visible = (usize::from(rect.height).saturating_sub(2) / ROWS_PER_ENTRY).max(1);
    let offset = scroll_offset(selected, notifications.len(), visible);
    let items: Vec<ListItem> = notifications
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, n)| notification_item(n, i == selected))
        .collect();
    frame.render_widget(List::new(items).block(block), rect);
}

/// Icon and colour per kind: invitation blue, turn yellow, completion green,
/// friend purple.
pub fn kind_icon(kind: NotificationKind) -> (&'static str, Color) {
    match kind {
        NotificationKind::Invitation => ("✉", Color::Blue),
        NotificationKind::Turn => ("⏱", Color::Yellow),
        NotificationKind::Completion => ("✓", Color::Green),
        NotificationKind::Friend => ("☺", Color::Magenta),
    }
}

fn notification_item(notification: &Notification, selected: bool) -> ListItem<'static> {
    let (icon, color) = kind_icon(notification.kind);
    let title_style = if notification.read {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let dot = if notification.read { "  " } else { "● " };
    let lines = vec![
        Line::from(vec![
            Span::styled(dot, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{} ", icon), Style::default().fg(color)),
            Span::styled(notification.title.clone(), title_style),
            Span::styled(format!("  {}", notification.time), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            format!("    {}", notification.message),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];
    let item = ListItem::new(lines);
    if selected {
        item.style(selected_style())
    } else {
        item
    }
}

// Draft options tab: create/join option cards and the recent drafts table.
//
// One cursor runs over both parts: indexes 0 and 1 are the option cards, the
// rest map onto recent drafts in order.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use drafthub_core::model::{RecentDraft, RecentDraftStatus};

use crate::tui::widgets::{marker, selected_style};
use crate::tui::{ViewState, CURSOR_OPTIONS};

/// (title, description, action) of each option card.
pub const OPTIONS: [(&str, &str, &str); 2] = [
    (
        "Create New Draft",
        "Set up a customized draft with your preferred format and settings",
        "Create",
    ),
    (
        "Join Existing Draft",
        "Enter a draft code or browse public drafts to participate",
        "Join",
    ),
];

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [options_area, recent_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).areas(area);
    let selected = state.cursor(CURSOR_OPTIONS);

    let mut lines = Vec::new();
    for (i, (title, description, action)) in OPTIONS.iter().enumerate() {
        let is_selected = i == selected;
        let title_style = if is_selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            marker(is_selected),
            Span::styled(*title, title_style),
            Span::styled(format!("  [Enter] {}", action), Style::default().fg(Color::Cyan)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", description),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Draft Options")),
        options_area,
    );

    render_recent(frame, recent_area, &state.session.data.recent_drafts, selected.checked_sub(2));
}

fn render_recent(frame: &mut Frame, area: Rect, drafts: &[RecentDraft], selected: Option<usize>) {
    let block = Block::default().borders(Borders::ALL).title("Recent Drafts");
    if drafts.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("  No recent drafts", Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    }

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Title"),
        Cell::from("Date"),
        Cell::from("Participants"),
        Cell::from("Status"),
        Cell::from("Action"),
    ])
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = drafts
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let is_selected = selected == Some(i);
            let row = Row::new(vec![
                Cell::from(marker(is_selected)),
                Cell::from(d.title.clone()),
                Cell::from(d.date.clone()),
                Cell::from(d.participants.to_string()),
                Cell::from(Span::styled(d.status_label(), Style::default().fg(recent_status_color(d.status)))),
                Cell::from(Span::styled(d.action_label(), Style::default().fg(Color::Cyan))),
            ]);
            if is_selected {
                row.style(selected_style())
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(16),
        Constraint::Length(11),
        Constraint::Length(13),
        Constraint::Length(12),
        Constraint::Length(15),
    ];
    frame.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

pub fn recent_status_color(status: RecentDraftStatus) -> Color {
    match status {
        RecentDraftStatus::Completed => Color::Green,
        RecentDraftStatus::InProgress => Color::Blue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::{render_text, signed_in_state};

    #[test]
    fn shows_options_and_recent_drafts() {
        let state = signed_in_state();
        let text = render_text(110, 20, |frame| render(frame, frame.area(), &state));
        assert!(text.contains("Create New Draft"));
        assert!(text.contains("Join Existing Draft"));
        assert!(text.contains("Recent Drafts"));
        assert!(text.contains("View Results"));
        assert!(text.contains("Continue Draft"));
    }

    #[test]
    fn empty_recent_list() {
        let mut state = signed_in_state();
        state.session.data.recent_drafts.clear();
        let text = render_text(80, 14, |frame| render(frame, frame.area(), &state));
        assert!(text.contains("No recent drafts"));
    }

    #[test]
    fn status_colours() {
        assert_eq!(recent_status_color(RecentDraftStatus::Completed), Color::Green);
        assert_eq!(recent_status_color(RecentDraftStatus::InProgress), Color::Blue);
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let mut state = signed_in_state();
        state.cursor.insert(CURSOR_OPTIONS.to_string(), 4);
        render_text(12, 3, |frame| render(frame, frame.area(), &state));
    }
}

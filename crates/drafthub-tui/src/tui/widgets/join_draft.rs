// Join draft view: enter a code, browse public drafts, or answer invitations.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use drafthub_core::model::{Invitation, PublicDraft, PublicDraftStatus};

use crate::tui::widgets::{input_spans, marker, scroll_offset, selected_style, tabs};
use crate::tui::{EditTarget, JoinTab, ViewState, CURSOR_INVITATIONS, CURSOR_PUBLIC};

pub const CODE_PLACEHOLDER: &str = "Enter draft code (e.g., DRAFT-123456)";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [header_area, tabs_area, body] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let header = vec![
        Line::from(Span::styled(" Join a Draft", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            " Join an existing draft by entering a code, browsing public drafts, or accepting an invitation.",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(header), header_area);

    let labels = [
        "Enter Code".to_string(),
        "Public Drafts".to_string(),
        format!("Invitations ({})", state.session.data.invitations.len()),
    ];
    let active = match state.join_tab {
        JoinTab::Code => 0,
        JoinTab::Public => 1,
        JoinTab::Invitations => 2,
    };
    tabs::render(frame, tabs_area, &labels, active);

    match state.join_tab {
        JoinTab::Code => render_code(frame, body, state),
        JoinTab::Public => render_public(frame, body, state),
        JoinTab::Invitations => render_invitations(frame, body, state),
    }
}

fn render_code(frame: &mut Frame, area: Rect, state: &ViewState) {
    let editing = state.editing == Some(EditTarget::JoinCode);
    let mut input = vec![Span::raw("  Code: ")];
    input.extend(input_spans(&state.join_code, CODE_PLACEHOLDER, editing));

    let button_style = if state.join_enabled() {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let lines = vec![
        Line::from(Span::styled(
            "  Enter the unique code provided by the draft creator to join a private draft.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(input),
        Line::from(""),
        Line::from(vec![Span::raw("  "), Span::styled("[Enter] Join Draft", button_style)]),
        Line::from(Span::styled("  e: edit code", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Enter Draft Code")),
        area,
    );
}

fn render_public(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [search_area, list_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let editing = state.editing == Some(EditTarget::PublicSearch);
    let mut search = vec![Span::styled(" / ", Style::default().fg(Color::Cyan))];
    search.extend(input_spans(&state.public_query, "Search public drafts...", editing));
    frame.render_widget(Paragraph::new(Line::from(search)), search_area);

    let drafts = state.filtered_public_drafts();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Public Drafts ({})", drafts.len()));

    if drafts.is_empty() {
        let reason = if state.public_query.is_empty() {
            "There are no public drafts available at the moment"
        } else {
            "No drafts match your search criteria"
        };
        let lines = vec![
            Line::from(Span::styled("  No public drafts found", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(format!("  {}", reason), Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled("  [Esc] Clear Search", Style::default().fg(Color::Cyan))),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), list_area);
        return;
    }

    let selected = state.cursor(CURSOR_PUBLIC).min(drafts.len() - 1);
    let visible = (usize::from(list_area.height).saturating_sub(2) / 3).max(1);
    let offset = scroll_offset(selected, drafts.len(), visible);
    let items: Vec<ListItem> = drafts
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, d)| public_item(d, i == selected))
        .collect();
    frame.render_widget(List::new(items).block(block), list_area);
}

pub fn public_status_color(status: PublicDraftStatus) -> Color {
    match status {
        PublicDraftStatus::Waiting => Color::Yellow,
        PublicDraftStatus::InProgress => Color::Blue,
    }
}

fn public_item(draft: &PublicDraft, selected: bool) -> ListItem<'static> {
    let status_label = match draft.status {
        PublicDraftStatus::Waiting => "Waiting to Start",
        PublicDraftStatus::InProgress => "In Progress",
    };
    let lines = vec![
        Line::from(vec![
            marker(selected),
            Span::styled(draft.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", draft.format.display_str()), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", status_label),
                Style::default().fg(Color::Black).bg(public_status_color(draft.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("   Created by {} • {}   ", draft.creator, draft.created_at),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(format!(
                "{}/{} participants   ",
                draft.participants.current, draft.participants.max
            )),
            Span::styled("[Enter] Join Draft", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
    ];
    let item = ListItem::new(lines);
    if selected {
        item.style(selected_style())
    } else {
        item
    }
}

fn render_invitations(frame: &mut Frame, area: Rect, state: &ViewState) {
    let invitations = &state.session.data.invitations;
    let block = Block::default().borders(Borders::ALL).title("Invitations");

    if invitations.is_empty() {
        let lines = vec![
            Line::from(Span::styled("  No invitations", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                "  You don't have any pending draft invitations",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    let selected = state.cursor(CURSOR_INVITATIONS).min(invitations.len() - 1);
    let visible = (usize::from(area.height).saturating_sub(2) / 3).max(1);
    let offset = scroll_offset(selected, invitations.len(), visible);
    let items: Vec<ListItem> = invitations
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, inv)| invitation_item(inv, i == selected))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn invitation_item(invitation: &Invitation, selected: bool) -> ListItem<'static> {
    let lines = vec![
        Line::from(vec![
            marker(selected),
            Span::styled(invitation.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("   Invited by {} • {}   ", invitation.from, invitation.date),
                Style::default().fg(Color::Gray),
            ),
            Span::styled("[d] Decline ", Style::default().fg(Color::Red)),
            Span::styled("[a] Accept", Style::default().fg(Color::Green)),
        ]),
        Line::from(""),
    ];
    let item = ListItem::new(lines);
    if selected {
        item.style(selected_style())
    } else {
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::{render_text, signed_in_state};

    fn render_tab(state: &ViewState, width: u16, height: u16) -> String {
        render_text(width, height, |frame| render(frame, frame.area(), state))
    }

    #[test]
    fn code_tab_shows_placeholder() {
        let state = signed_in_state();
        let text = render_tab(&state, 100, 16);
        assert!(text.contains("Enter draft code (e.g., DRAFT-123456)"));
        assert!(text.contains("Invitations (2)"));
    }

    #[test]
    fn public_tab_lists_drafts() {
        let mut state = signed_in_state();
        state.join_tab = JoinTab::Public;
        let text = render_tab(&state, 120, 20);
        assert!(text.contains("Fantasy Football League 2023"));
        assert!(text.contains("8/12 participants"));
        assert!(text.contains("Created by Alex Johnson"));
    }

    #[test]
    fn public_tab_empty_states() {
        let mut state = signed_in_state();
        state.join_tab = JoinTab::Public;
        state.public_query = "zzz".into();
        let text = render_tab(&state, 100, 16);
        assert!(text.contains("No public drafts found"));
        assert!(text.contains("No drafts match your search criteria"));
        assert!(text.contains("Clear Search"));

        state.public_query.clear();
        state.session.data.public_drafts.clear();
        let text = render_tab(&state, 100, 16);
        assert!(text.contains("There are no public drafts available at the moment"));
    }

    #[test]
    fn invitations_tab_and_empty_state() {
        let mut state = signed_in_state();
        state.join_tab = JoinTab::Invitations;
        let text = render_tab(&state, 100, 16);
        assert!(text.contains("Invited by David Lee"));

        state.session.data.invitations.clear();
        let text = render_tab(&state, 100, 16);
        assert!(text.contains("No invitations"));
        assert!(text.contains("You don't have any pending draft invitations"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let mut state = signed_in_state();
        for tab in [JoinTab::Code, JoinTab::Public, JoinTab::Invitations] {
            state.join_tab = tab;
            render_tab(&state, 10, 3);
        }
    }
}

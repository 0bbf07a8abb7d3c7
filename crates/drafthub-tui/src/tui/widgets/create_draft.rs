// Draft-creation wizard view.
//
// +--------------------------------------------------+
// | Create New Draft          Step 2 of 5: Item Pool |
// | [progress gauge]                                  |
// | ✓ Basic Info  ● Item Pool  ○ Time Settings ...    |
// +--------------------------------------------------+
// | Step card: title, description, fields             |
// +--------------------------------------------------+
// | Step actions                                      |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use drafthub_core::model::{DraftTemplate, Friend};
use drafthub_core::wizard::{CreateDraftWizard, DraftField, FieldKind, StepMarker, WizardStep, TOTAL_STEPS};

use crate::tui::widgets::{input_spans, marker, scroll_offset};
use crate::tui::{EditTarget, ViewState, CURSOR_INVITES};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [header_area, gauge_area, steps_area, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let wizard = &state.wizard;
    let step = wizard.step();

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Create New Draft", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("   Step {} of {}: {}", step.number(), TOTAL_STEPS, step.label()),
                Style::default().fg(Color::Gray),
            ),
        ])),
        header_area,
    );

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio(wizard.progress().clamp(0.0, 1.0))
            .label(format!("{:.0}%", wizard.progress() * 100.0)),
        gauge_area,
    );

    frame.render_widget(Paragraph::new(Line::from(step_marker_spans(wizard))), steps_area);

    let lines = if step == WizardStep::Invitations {
        invitation_lines(state, usize::from(body.height).saturating_sub(2))
    } else {
        field_lines(state)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {} ", step.title()), Style::default().add_modifier(Modifier::BOLD)));
    frame.render_widget(Paragraph::new(lines).block(block), body);

    frame.render_widget(Paragraph::new(Line::from(footer_spans(wizard))), footer);
}

/// "✓ Basic Info  ● Item Pool  ○ Time Settings ..."
pub fn step_marker_spans(wizard: &CreateDraftWizard) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for step in WizardStep::ALL {
        let (symbol, style) = match wizard.marker(step) {
            StepMarker::Completed => ("✓", Style::default().fg(Color::Green)),
            StepMarker::Current => ("●", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            StepMarker::Upcoming => ("○", Style::default().fg(Color::DarkGray)),
        };
        spans.push(Span::styled(format!("{} {}", symbol, step.label()), style));
        spans.push(Span::raw("  "));
    }
    spans
}

/// Previous/Cancel on the left, Next/Create on the right.
pub fn footer_spans(wizard: &CreateDraftWizard) -> Vec<Span<'static>> {
    let back = if wizard.can_cancel() { "[Esc] Cancel" } else { "[p] Previous" };
    let forward = if wizard.can_submit() { "[s] Create Draft" } else { "[n] Next" };
    vec![
        Span::styled(format!(" {}", back), Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled(
            forward,
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]
}

fn field_lines(state: &ViewState) -> Vec<Line<'static>> {
    let wizard = &state.wizard;
    let config = wizard.config();
    let templates: &[DraftTemplate] = &state.session.data.templates;
    let focused = state.focused_wizard_field();

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", wizard.step().description()),
        Style::default().fg(Color::Gray),
    ))];
    if !wizard.errors().is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {} field(s) need attention before the draft can be created", wizard.errors().len()),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));

    for field in state.wizard_fields() {
        let is_focused = focused == Some(field);
        let is_editing = state.editing == Some(EditTarget::Wizard(field));
        let label_style = if is_focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let value = config.display_value(field, templates);

        match field.kind() {
            FieldKind::Toggle => {
                let checkbox = if value == "On" { "[x] " } else { "[ ] " };
                lines.push(Line::from(vec![
                    marker(is_focused),
                    Span::styled(checkbox, Style::default().fg(Color::Cyan)),
                    Span::styled(field.label(), label_style),
                ]));
            }
            FieldKind::Choice => {
                lines.push(Line::from(vec![
                    marker(is_focused),
                    Span::styled(format!("{}: ", field.label()), label_style),
                    Span::styled(format!("< {} >", value), Style::default().fg(Color::Cyan)),
                ]));
                let description = match field {
                    DraftField::Format => Some(config.format.description()),
                    DraftField::Privacy => Some(config.privacy.description()),
                    _ => None,
                };
                if let Some(text) = description {
                    lines.push(Line::from(Span::styled(
                        format!("     {}", text),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }
            FieldKind::MultilineText => {
                lines.push(Line::from(vec![marker(is_focused), Span::styled(field.label(), label_style)]));
                let items: Vec<&str> = value.split('\n').collect();
                let last = items.len() - 1;
                for (i, item) in items.iter().enumerate() {
                    let mut spans = vec![Span::raw("     ")];
                    spans.extend(input_spans(item, "One item per line", is_editing && i == last));
                    lines.push(Line::from(spans));
                }
            }
            FieldKind::Text | FieldKind::Number => {
                lines.push(Line::from(vec![marker(is_focused), Span::styled(field.label(), label_style)]));
                let mut spans = vec![Span::raw("     ")];
                spans.extend(input_spans(&value, placeholder(field), is_editing));
                lines.push(Line::from(spans));
            }
            FieldKind::Selection => {}
        }

        if let Some(hint) = field.hint() {
            lines.push(Line::from(Span::styled(
                format!("     {}", hint),
                Style::default().fg(Color::DarkGray),
            )));
        }
        if let Some(message) = wizard.errors().message(field) {
            lines.push(Line::from(Span::styled(
                format!("     {}", message),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " ↑/↓ field  Enter edit  Space toggle  ←/→ choose",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn placeholder(field: DraftField) -> &'static str {
    match field {
        DraftField::Title => "e.g., Fantasy Football 2023",
        DraftField::Description => "Describe what this draft is about",
        DraftField::ImportFile => "path/to/items.csv",
        _ => "",
    }
}

/// Share link, invite code and the friend checklist. `rows` bounds the
/// checklist so the cursor stays visible.
fn invitation_lines(state: &ViewState, rows: usize) -> Vec<Line<'static>> {
    let config = state.wizard.config();
    let mut note = "Anyone with this link can join your draft".to_string();
    if config.require_approval {
        note.push_str(" (approval required)");
    }

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", WizardStep::Invitations.description()),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Share Link: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(config.share_link(&state.share_base), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled(" Invite Code: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(config.invite_code(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(format!(" {}", note), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                " Invite Friends: {}",
                config.display_value(DraftField::InvitedUsers, &state.session.data.templates)
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let friends = &state.session.data.friends;
    if friends.is_empty() {
        lines.push(Line::from(Span::styled(
            "   You don't have any friends to invite yet",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    let selected = state.cursor(CURSOR_INVITES).min(friends.len() - 1);
    let visible = rows.saturating_sub(lines.len() + 1).max(1);
    let offset = scroll_offset(selected, friends.len(), visible);
    for (i, friend) in friends.iter().enumerate().skip(offset).take(visible) {
        lines.push(invite_line(friend, config.invited_users.contains(&friend.id), i == selected));
    }
    lines.push(Line::from(Span::styled(
        " ↑/↓ friend  Space invite",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn invite_line(friend: &Friend, invited: bool, selected: bool) -> Line<'static> {
    let checkbox = if invited { "[x] " } else { "[ ] " };
    let name_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        marker(selected),
        Span::styled(checkbox, Style::default().fg(Color::Cyan)),
        Span::styled(friend.name.clone(), name_style),
        Span::styled(format!("  {}", friend.presence_line()), Style::default().fg(Color::Gray)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::{render_text, signed_in_state};

    fn render_state(state: &ViewState) -> String {
        render_text(110, 34, |frame| render(frame, frame.area(), state))
    }

    fn text_of(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn markers_track_the_current_step() {
        let mut wizard = CreateDraftWizard::new();
        wizard.next();
        let text = text_of(&step_marker_spans(&wizard));
        assert!(text.contains("✓ Basic Info"));
        assert!(text.contains("● Item Pool"));
        assert!(text.contains("○ Invitations"));
    }

    #[test]
    fn footer_offers_cancel_then_create() {
        let mut wizard = CreateDraftWizard::new();
        let first = text_of(&footer_spans(&wizard));
        assert!(first.contains("Cancel"));
        assert!(first.contains("Next"));
        while wizard.next() {}
        let last = text_of(&footer_spans(&wizard));
        assert!(last.contains("Previous"));
        assert!(last.contains("Create Draft"));
    }

    #[test]
    fn first_step_shows_fields_and_format_description() {
        let state = signed_in_state();
        let text = render_state(&state);
        assert!(text.contains("Step 1 of 5: Basic Info"));
        assert!(text.contains("Draft Title"));
        assert!(text.contains("< Snake Draft >"));
        assert!(text.contains("Draft order reverses each round"));
    }

    #[test]
    fn break_duration_only_with_round_breaks() {
        let mut state = signed_in_state();
        state.wizard.next();
        state.wizard.next();
        assert!(!render_state(&state).contains("Break Duration"));
        state.wizard.config_mut().round_breaks = true;
        let text = render_state(&state);
        assert!(text.contains("Break Duration"));
        assert!(text.contains("[x] Round Breaks"));
    }

    #[test]
    fn invitations_step_shows_link_and_approval_note() {
        let mut state = signed_in_state();
        state.wizard.config_mut().title = "Road Trip".into();
        state.wizard.config_mut().require_approval = true;
        state.wizard.config_mut().toggle_invite("user2");
        while state.wizard.next() {}
        let text = render_state(&state);
        let code = state.wizard.config().invite_code();
        assert!(text.contains(&code));
        assert!(text.contains("https://draft-platform.example/join/"));
        assert!(text.contains("(approval required)"));
        assert!(text.contains("[x] Maria Garcia"));
        assert!(text.contains("1 friends selected"));
    }

    #[test]
    fn failed_submission_shows_messages() {
        let mut state = signed_in_state();
        while state.wizard.next() {}
        assert!(state.wizard.submit().is_err());
        while state.wizard.previous() {}
        let text = render_state(&state);
        assert!(text.contains("Title must be at least 3 characters"));
        assert!(text.contains("need attention"));
    }

    #[test]
    fn every_step_renders_in_tiny_area() {
        let mut state = signed_in_state();
        loop {
            render_text(12, 4, |frame| render(frame, frame.area(), &state));
            if !state.wizard.next() {
                break;
            }
        }
    }
}

// Active drafts tab: search box over a scrollable list of draft cards.
//
// Each card shows the title, a status badge, the format, a progress bar,
// the current picker and countdown while in progress, up to three
// participant initials with an overflow count, and the card's action.

use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use drafthub_core::avatar::initials;
use drafthub_core::model::{DraftStatus, DraftSummary};

use crate::tui::widgets::{input_spans, marker, scroll_offset, selected_style};
use crate::tui::{EditTarget, ViewState, CURSOR_DRAFTS};

/// Rows per card, including the spacer.
const CARD_HEIGHT: usize = 5;
const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [search_area, list_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let editing = state.editing == Some(EditTarget::DraftSearch);
    let mut search = vec![Span::styled(" / ", Style::default().fg(Color::Cyan))];
    search.extend(input_spans(&state.draft_query, "Search drafts...", editing));
    frame.render_widget(Paragraph::new(Line::from(search)), search_area);

    let drafts = state.filtered_drafts();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Active Drafts ({})", drafts.len()));

    if drafts.is_empty() {
        let lines = if state.session.data.active_drafts.is_empty() {
            vec![
                Line::from(Span::styled("  No Active Drafts", Style::default().add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(
                    "  You're not participating in any drafts right now.",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    "  Press 3 to create a draft or 2 to join one.",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        } else {
            vec![Line::from(Span::styled(
                "  No drafts match your search. Esc clears it.",
                Style::default().fg(Color::DarkGray),
            ))]
        };
        frame.render_widget(Paragraph::new(lines).block(block), list_area);
        return;
    }

    let selected = state.cursor(CURSOR_DRAFTS).min(drafts.len() - 1);
    let visible_cards = (usize::from(list_area.height).saturating_sub(2) / CARD_HEIGHT).max(1);
    let offset = scroll_offset(selected, drafts.len(), visible_cards);

    let items: Vec<ListItem> = drafts
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_cards)
        .map(|(i, draft)| draft_card(draft, i == selected))
        .collect();

    frame.render_widget(List::new(items).block(block), list_area);

    if drafts.len() > visible_cards {
        let mut scrollbar_state =
            ScrollbarState::new(drafts.len().saturating_sub(visible_cards)).position(offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            list_area.inner(Margin { vertical: 1, horizontal: 0 }),
            &mut scrollbar_state,
        );
    }
}

/// Badge colour for a draft status.
pub fn status_color(status: DraftStatus) -> Color {
    match status {
        DraftStatus::YourTurn => Color::Red,
        DraftStatus::InProgress => Color::Blue,
        DraftStatus::Waiting => Color::Cyan,
        DraftStatus::Paused => Color::Gray,
    }
}

/// Text progress bar, e.g. "██████░░░░ 60%".
pub fn progress_bar(percent: u16, width: usize) -> String {
    let filled = usize::from(percent.min(100)) * width / 100;
    format!("{}{} {}%", "█".repeat(filled), "░".repeat(width - filled), percent.min(100))
}

/// Participant initials, e.g. "AJ MG JW +2".
pub fn participant_line(draft: &DraftSummary) -> String {
    let (shown, rest) = draft.participant_preview();
    let mut parts: Vec<String> = shown.iter().map(|p| initials(&p.name)).collect();
    if rest > 0 {
        parts.push(format!("+{}", rest));
    }
    parts.join(" ")
}

fn draft_card(draft: &DraftSummary, selected: bool) -> ListItem<'static> {
    let title_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(vec![
        marker(selected),
        Span::styled(draft.title.clone(), title_style),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", draft.status.label()),
            Style::default().fg(Color::Black).bg(status_color(draft.status)),
        ),
        Span::styled(format!("  {}", draft.format.label()), Style::default().fg(Color::Gray)),
    ])];

    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled(progress_bar(draft.progress(), BAR_WIDTH), Style::default().fg(Color::Green)),
    ]));

    let detail = match (draft.picker_line(), draft.turn_line()) {
        (Some(picker), Some(turn)) => format!("{}   {}", picker, turn),
        (Some(picker), None) => picker,
        (None, Some(turn)) => turn,
        (None, None) => String::new(),
    };
    lines.push(Line::from(Span::styled(format!("   {}", detail), Style::default().fg(Color::Yellow))));

    let action_style = if draft.status == DraftStatus::YourTurn {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled(participant_line(draft), Style::default().fg(Color::Magenta)),
        Span::styled(
            format!("  {} participants   ", draft.participants.len()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(format!("[Enter] {}", draft.action_label()), action_style),
    ]));
    lines.push(Line::from(""));

    let item = ListItem::new(lines);
    if selected {
        item.style(selected_style())
    } else {
        item
    }
}

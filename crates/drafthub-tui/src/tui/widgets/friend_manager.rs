// Friends view: the friend list with search and add-friend input, and the
// incoming/outgoing request lists.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use drafthub_core::avatar::initials;
use drafthub_core::model::{Friend, FriendRequest, Presence, RequestDirection};

use crate::tui::widgets::{input_spans, marker, scroll_offset, selected_style, tabs};
use crate::tui::{EditTarget, FriendsTab, ViewState, CURSOR_FRIENDS, CURSOR_REQUESTS};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [header_area, tabs_area, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(" Connections", Style::default().add_modifier(Modifier::BOLD))),
        header_area,
    );

    let active = match state.friends_tab {
        FriendsTab::Friends => 0,
        FriendsTab::Requests => 1,
    };
    tabs::render(frame, tabs_area, &tab_labels(state.session.data.friend_requests.len()), active);

    match state.friends_tab {
        FriendsTab::Friends => render_friends(frame, body, state),
        FriendsTab::Requests => render_requests(frame, body, state),
    }
}

/// "Requests" carries a count badge only when something is pending.
pub fn tab_labels(request_count: usize) -> [String; 2] {
    let requests = if request_count > 0 {
        format!("Requests ({})", request_count)
    } else {
        "Requests".to_string()
    };
    ["Friends".to_string(), requests]
}

/// Presence dot colour: online green, in a draft blue, offline gray.
pub fn presence_color(status: Presence) -> Color {
    match status {
        Presence::Online => Color::Green,
        Presence::InDraft => Color::Blue,
        Presence::Offline => Color::Gray,
    }
}

fn render_friends(frame: &mut Frame, area: Rect, state: &ViewState) {
    let [search_area, add_area, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let searching = state.editing == Some(EditTarget::FriendSearch);
    let mut search = vec![Span::styled(" / ", Style::default().fg(Color::Cyan))];
    search.extend(input_spans(&state.friend_query, "Search friends...", searching));
    frame.render_widget(Paragraph::new(Line::from(search)), search_area);

    let adding = state.editing == Some(EditTarget::AddFriend);
    let mut add = vec![Span::styled(" a ", Style::default().fg(Color::Cyan)), Span::raw("Add New Friend: ")];
    add.extend(input_spans(&state.add_friend, "Enter username", adding));
    frame.render_widget(Paragraph::new(Line::from(add)), add_area);

    let friends = state.filtered_friends();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Your Friends ({})", friends.len()));

    if friends.is_empty() {
        let message = if state.friend_query.is_empty() {
            "  You don't have any friends yet"
        } else {
            "  No friends match your search"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray))).block(block),
            list_area,
        );
        return;
    }

    let selected = state.cursor(CURSOR_FRIENDS).min(friends.len() - 1);
    let visible = (usize::from(list_area.height).saturating_sub(2) / 2).max(1);
    let offset = scroll_offset(selected, friends.len(), visible);
    let items: Vec<ListItem> = friends
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, f)| friend_item(f, i == selected))
        .collect();
    frame.render_widget(List::new(items).block(block), list_area);
}

fn friend_item(friend: &Friend, selected: bool) -> ListItem<'static> {
    let lines = vec![
        Line::from(vec![
            marker(selected),
            Span::styled("● ", Style::default().fg(presence_color(friend.status))),
            Span::styled(format!("{} ", initials(&friend.name)), Style::default().fg(Color::Magenta)),
            Span::styled(friend.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled("   [x] Remove", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            format!("     {}", friend.presence_line()),
            Style::default().fg(Color::Gray),
        )),
    ];
    let item = ListItem::new(lines);
    if selected {
        item.style(selected_style())
    } else {
        item
    }
}

fn render_requests(frame: &mut Frame, area: Rect, state: &ViewState) {
    let requests = state.ordered_requests();
    let block = Block::default().borders(Borders::ALL).title("Friend Requests");

    if requests.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  No pending friend requests",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block),
            area,
        );
        return;
    }

    let incoming = requests
        .iter()
        .filter(|r| r.direction == RequestDirection::Incoming)
        .count();
    let outgoing = requests.len() - incoming;
    let selected = state.cursor(CURSOR_REQUESTS).min(requests.len() - 1);

    // Section headers are list rows too; map the request cursor onto them.
    let mut items = Vec::new();
    let mut selected_row = 0;
    for (i, request) in requests.iter().enumerate() {
        if i == 0 && incoming > 0 {
            items.push(section_header("Incoming Requests", incoming));
        }
        if i == incoming && outgoing > 0 {
            items.push(section_header("Outgoing Requests", outgoing));
        }
        if i == selected {
            selected_row = items.len();
        }
        items.push(request_item(request, i == selected));
    }

    let visible = usize::from(area.height).saturating_sub(2).max(1);
    let offset = scroll_offset(selected_row, items.len(), visible);
    let items: Vec<ListItem> = items.into_iter().skip(offset).take(visible).collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn section_header(title: &str, count: usize) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(format!(" {} ", title), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {} ", count), Style::default().fg(Color::Black).bg(Color::White)),
    ]))
}

fn request_item(request: &FriendRequest, selected: bool) -> ListItem<'static> {
    let actions = match request.direction {
        RequestDirection::Incoming => vec![
            Span::styled("[r] Reject ", Style::default().fg(Color::Red)),
            Span::styled("[a] Accept", Style::default().fg(Color::Green)),
        ],
        RequestDirection::Outgoing => vec![Span::styled("[c] Cancel", Style::default().fg(Color::Yellow))],
    };
    let mut spans = vec![
        marker(selected),
        Span::styled(format!("{} ", initials(&request.name)), Style::default().fg(Color::Magenta)),
        Span::styled(request.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}   ", request.timestamp), Style::default().fg(Color::Gray)),
    ];
    spans.extend(actions);
    let item = ListItem::new(Line::from(spans));
    if selected {
        item.style(selected_style())
    } else {
        item
    }
}

// Help bar: key hints for the current mode, then the latest status message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{DashboardTab, FriendsTab, JoinTab, Screen, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(format!(" {}", hints(state)), Style::default().fg(Color::Gray))];
    if let Some(toast) = &state.toast {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(toast.clone(), Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
        area,
    );
}

/// Key hints for whatever currently receives input.
pub fn hints(state: &ViewState) -> &'static str {
    if state.confirm_quit {
        return "y: quit  n: stay";
    }
    if state.editing.is_some() {
        return "Type to edit  Enter: done  Esc: cancel";
    }
    if state.show_notifications {
        return "↑/↓: select  Enter: open  m: mark all read  Esc: close";
    }
    if state.show_account_menu {
        return "↑/↓: select  Enter: choose  Esc: close";
    }
    if !state.is_authenticated() {
        return "t: switch tab  ↑/↓: field  Enter: edit  s: submit  q: quit";
    }
    match state.screen {
        Screen::Dashboard => match state.dashboard_tab {
            DashboardTab::ActiveDrafts => "1-4: screens  Tab: options  /: search  Enter: open  i: alerts  u: account  q: quit",
            DashboardTab::DraftOptions => "1-4: screens  Tab: active drafts  ↑/↓: select  Enter: choose  q: quit",
        },
        Screen::JoinDraft => match state.join_tab {
            JoinTab::Code => "Tab: next tab  e: edit code  Enter: join  q: quit",
            JoinTab::Public => "Tab: next tab  /: search  Esc: clear  Enter: join  q: quit",
            JoinTab::Invitations => "Tab: next tab  a: accept  d: decline  q: quit",
        },
        Screen::CreateDraft => "n: next  p: previous  s: create  Esc: cancel  q: quit",
        Screen::Friends => match state.friends_tab {
            FriendsTab::Friends => "Tab: requests  /: search  a: add friend  x: remove  q: quit",
            FriendsTab::Requests => "Tab: friends  a: accept  r: reject  c: cancel  q: quit",
        },
    }
}

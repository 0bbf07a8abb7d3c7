// Sign-in view: Login and Sign Up tabs in one centered card.
//
// Each input shows its label, the value (or placeholder), and the message from
// the last failed submission underneath. Secret inputs are masked unless
// show_password is on.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use drafthub_core::config::AuthTab;

use crate::tui::layout::centered_rect;
use crate::tui::widgets::{input_spans, marker, tabs};
use crate::tui::{AuthField, AuthView, EditTarget, ViewState};

const CARD_WIDTH: u16 = 60;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = form_lines(&state.auth, state.editing);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let card = centered_rect(CARD_WIDTH, height, area);

    frame.render_widget(Clear, card);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Welcome to DraftHub ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(Paragraph::new(lines).block(block), card);
}

/// Card contents for the active tab.
pub fn form_lines(auth: &AuthView, editing: Option<EditTarget>) -> Vec<Line<'static>> {
    let labels = ["Login".to_string(), "Sign Up".to_string()];
    let active = match auth.tab {
        AuthTab::Login => 0,
        AuthTab::Signup => 1,
    };

    let mut lines = vec![Line::from(tabs::tab_spans(&labels, active)), Line::from("")];

    for (i, field) in auth.fields().iter().enumerate() {
        let focused = i == auth.focus;
        let is_editing = editing == Some(EditTarget::Auth(*field));
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(vec![marker(focused), Span::styled(field.label(), label_style)]));

        let value = display_value(auth, *field);
        let mut input = vec![Span::raw("   ")];
        input.extend(input_spans(&value, field.placeholder(), is_editing));
        lines.push(Line::from(input));

        if let Some(message) = auth.error(*field) {
            lines.push(Line::from(Span::styled(
                format!("   {}", message),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let action = match auth.tab {
        AuthTab::Login => "Login",
        AuthTab::Signup => "Create Account",
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled(
            format!("[s] {}", action),
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]));
    let toggle = if auth.show_password { "hide" } else { "show" };
    lines.push(Line::from(Span::styled(
        format!("   t: switch tab  Enter: edit  v: {} password", toggle),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Field value as displayed; secrets become one bullet per character.
pub fn display_value(auth: &AuthView, field: AuthField) -> String {
    let value = auth.value(field);
    if field.is_secret() && !auth.show_password {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::render_text;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn login_tab_has_two_inputs_with_placeholders() {
        let auth = AuthView::new(AuthTab::Login);
        let text = text_of(&form_lines(&auth, None));
        assert!(text.contains("Email"));
        assert!(text.contains("email@example.com"));
        assert!(text.contains("[s] Login"));
        assert!(!text.contains("Full Name"));
    }

    #[test]
    fn signup_tab_has_four_inputs() {
        let auth = AuthView::new(AuthTab::Signup);
        let text = text_of(&form_lines(&auth, None));
        assert!(text.contains("Full Name"));
        assert!(text.contains("Confirm Password"));
        assert!(text.contains("[s] Create Account"));
    }

    #[test]
    fn password_is_masked_until_shown() {
        let mut auth = AuthView::new(AuthTab::Login);
        auth.login.password = "abc123".into();
        assert_eq!(display_value(&auth, AuthField::Password), "••••••");
        auth.show_password = true;
        assert_eq!(display_value(&auth, AuthField::Password), "abc123");
    }

    #[test]
    fn submission_errors_are_listed_under_fields() {
        let mut auth = AuthView::new(AuthTab::Login);
        auth.login.email = "nope".into();
        assert!(auth.submit().is_none());
        let text = text_of(&form_lines(&auth, None));
        assert!(text.contains("Please enter a valid email address"));
    }

    #[test]
    fn render_shows_both_tabs() {
        let state = ViewState::default();
        let text = render_text(80, 24, |frame| render(frame, frame.area(), &state));
        assert!(text.contains("Login"));
        assert!(text.contains("Sign Up"));
    }

    #[test]
    fn render_tiny_area_does_not_panic() {
        let state = ViewState::default();
        render_text(12, 3, |frame| render(frame, frame.area(), &state));
    }
}

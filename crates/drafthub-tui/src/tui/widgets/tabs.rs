// Tab strip shared by the dashboard, join and friends views.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Render `labels` as a single row with `active` highlighted.
pub fn render(frame: &mut Frame, area: Rect, labels: &[String], active: usize) {
    let mut spans = tab_spans(labels, active);
    spans.push(Span::styled("  (Tab to switch)", Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// One span per tab, each followed by a separator.
pub fn tab_spans(labels: &[String], active: usize) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let style = if i == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }
    spans
}

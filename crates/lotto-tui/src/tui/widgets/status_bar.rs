// Status bar widget: title, round counter, last-updated date.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

const TITLE: &str = " 로또 번호 생성기 ";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(build_spans(state)))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

fn build_spans(state: &ViewState) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        TITLE,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];

    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
    spans.push(Span::styled(
        format!("{}회차", state.round()),
        Style::default().fg(Color::White),
    ));

    let updated = state
        .snapshot
        .as_ref()
        .and_then(|s| s.page.updated_at.as_ref())
        .map(|u| u.text().to_string());
    if let Some(date) = updated {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("업데이트 {date}"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Partner form widget: field list, submit control, status line.
//
// Layout inside the bordered block:
//   name     │ Kim_
//   email    │
//   ...
//   [ 보내기 ]  전송 중입니다...

use lotto_core::page::{Button, PartnerForm, TextElement};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::ViewState;

const SUBMIT_LABEL: &str = "[ 보내기 ]";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(page) = state.snapshot.as_ref().map(|s| &s.page) else {
        return;
    };
    let Some(form) = page.partner_form.as_ref() else {
        return;
    };

    let lines = build_form_lines(
        form,
        page.submit_button.as_ref(),
        page.form_status.as_ref(),
        state.form_focus,
    );

    let border = if state.form_focus.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("제휴 문의"),
        );
    frame.render_widget(paragraph, area);
}

pub fn build_form_lines(
    form: &PartnerForm,
    submit: Option<&Button>,
    status: Option<&TextElement>,
    focus: Option<usize>,
) -> Vec<Line<'static>> {
    let label_width = form
        .fields()
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(form.fields().len() + 2);
    for (i, field) in form.fields().iter().enumerate() {
        let focused = focus == Some(i);
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut value = field.value.clone();
        if focused {
            value.push('_');
        }
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<label_width$} ", field.name), label_style),
            Span::styled("│ ", Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(Color::White)),
        ]));
    }

    lines.push(Line::raw(""));

    let mut bottom = Vec::new();
    if let Some(button) = submit {
        let style = if button.is_enabled() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        };
        bottom.push(Span::raw(" "));
        bottom.push(Span::styled(SUBMIT_LABEL, style));
    }
    if let Some(status) = status.filter(|s| !s.text().is_empty()) {
        bottom.push(Span::raw("  "));
        bottom.push(Span::styled(
            status.text().to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
    lines.push(Line::from(bottom));

    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Balls widget: the current draw as colored number chips.
//
// Balls appear one by one; each is hidden until its reveal delay has passed
// since the round started.

use std::time::{Duration, Instant};

use lotto_core::draw::{Ball, ColorCategory};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, now: Instant) {
    let Some(numbers) = state.snapshot.as_ref().and_then(|s| s.page.numbers.as_ref()) else {
        return;
    };

    let visible = visible_balls(numbers.balls(), state.reveal_elapsed(now));
    let paragraph = Paragraph::new(vec![Line::raw(""), ball_line(visible)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("추첨 번호"));
    frame.render_widget(paragraph, area);
}

/// The leading balls whose delay has elapsed. Delays increase by position,
/// so the visible set is always a prefix.
pub fn visible_balls(balls: &[Ball], elapsed: Duration) -> &[Ball] {
    let shown = balls.iter().take_while(|b| b.delay <= elapsed).count();
    &balls[..shown]
}

fn ball_line(balls: &[Ball]) -> Line<'static> {
    let mut spans = Vec::with_capacity(balls.len() * 2);
    for (i, ball) in balls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!(" {:02} ", ball.number),
            Style::default()
                .fg(Color::Black)
                .bg(category_color(ball.category))
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

pub fn category_color(category: ColorCategory) -> Color {
    match category {
        ColorCategory::Yellow => Color::Yellow,
        ColorCategory::Blue => Color::LightBlue,
        ColorCategory::Red => Color::LightRed,
        ColorCategory::Gray => Color::Gray,
        ColorCategory::Green => Color::LightGreen,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Round note widget: the summary line for the current draw.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(note) = state.snapshot.as_ref().and_then(|s| s.page.round_note.as_ref()) else {
        return;
    };

    let paragraph = Paragraph::new(format!(" {}", note.text()))
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::snapshot;

    #[test]
    fn renders_note_text() {
        let mut snap = snapshot(1);
        snap.page
            .round_note
            .as_mut()
            .unwrap()
            .set("1회차 추첨 결과: 1, 2, 3, 4, 5, 6");
        let state = ViewState {
            snapshot: Some(snap),
            ..ViewState::default()
        };

        let backend = ratatui::backend::TestBackend::new(60, 3);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..60u16)
            .map(|x| buffer[(x, 1u16)].symbol().to_string())
            .collect();
        assert!(row.contains("1, 2, 3, 4, 5, 6"), "row was {row:?}");
    }
}

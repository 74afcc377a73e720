// Screen layout: region arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Balls (5 rows)                                    |
// +--------------------------------------------------+
// | Round Note (3 rows)                               |
// +--------------------------------------------------+
// | Partner Form (fill)                               |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each page region.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Title, round counter, updated-at date.
    pub status_bar: Rect,
    pub balls: Rect,
    pub round_note: Rect,
    pub partner_form: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(5), // balls
            Constraint::Length(3), // round note
            Constraint::Min(8),    // partner form
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        balls: vertical[1],
        round_note: vertical[2],
        partner_form: vertical[3],
        help_bar: vertical[4],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_heights_and_order() {
        let layout = build_layout(Rect::new(0, 0, 100, 40));
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.balls.height, 5);
        assert_eq!(layout.round_note.height, 3);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.partner_form.height, 40 - 1 - 5 - 3 - 1);

        assert!(layout.status_bar.y < layout.balls.y);
        assert!(layout.balls.y < layout.round_note.y);
        assert!(layout.round_note.y < layout.partner_form.y);
        assert!(layout.partner_form.y < layout.help_bar.y);
    }

    #[test]
    fn layout_spans_full_width() {
        let layout = build_layout(Rect::new(0, 0, 120, 30));
        for rect in [
            layout.status_bar,
            layout.balls,
            layout.round_note,
            layout.partner_form,
            layout.help_bar,
        ] {
            assert_eq!(rect.width, 120);
        }
    }
}

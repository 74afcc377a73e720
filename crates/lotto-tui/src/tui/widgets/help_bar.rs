// Help bar widget: key hints for the current mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Hints only mention keys that do something on this page.
pub fn help_text(state: &ViewState) -> String {
    if state.form_focus.is_some() {
        return " Tab:Next field | Enter:Send | Ctrl+U:Clear field | Esc:Leave form".to_string();
    }

    let mut hints = Vec::new();
    if state.has_generate_button() {
        hints.push("g:Generate");
    }
    if state.has_partner_form() {
        hints.push("f:Edit form");
        hints.push("s:Send");
    }
    hints.push("q:Quit");
    format!(" {}", hints.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::snapshot;
    use lotto_core::page::ElementId;

    #[test]
    fn full_page_lists_all_actions() {
        let state = ViewState {
            snapshot: Some(snapshot(1)),
            ..ViewState::default()
        };
        assert_eq!(help_text(&state), " g:Generate | f:Edit form | s:Send | q:Quit");
    }

    #[test]
    fn missing_elements_drop_hints() {
        let mut snap = snapshot(1);
        snap.page.remove(ElementId::GenerateButton);
        snap.page.remove(ElementId::PartnerForm);
        let state = ViewState {
            snapshot: Some(snap),
            ..ViewState::default()
        };
        assert_eq!(help_text(&state), " q:Quit");
    }

    #[test]
    fn form_mode_hints() {
        let state = ViewState {
            snapshot: Some(snapshot(1)),
            form_focus: Some(0),
            ..ViewState::default()
        };
        assert!(help_text(&state).contains("Esc:Leave form"));
    }
}

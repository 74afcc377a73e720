// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState changes (form focus, quit dialog).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lotto_core::protocol::{FieldEdit, UserCommand};

use super::ViewState;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should reach the
/// orchestrator, `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if let Some(focus) = view_state.form_focus {
        return handle_form_mode(key_event, focus, view_state);
    }

    match key_event.code {
        // The generate listener only exists when the page has the button.
        KeyCode::Char('g') | KeyCode::Char(' ') => {
            view_state.has_generate_button().then_some(UserCommand::Generate)
        }

        KeyCode::Char('f') | KeyCode::Tab => {
            if view_state.field_count() > 0 {
                view_state.form_focus = Some(0);
            }
            None
        }

        KeyCode::Char('s') => view_state.has_partner_form().then_some(UserCommand::Submit),

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// Key events while the quit dialog is showing.
///
/// `y`/`q` confirm, `n`/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Key events while a form field has focus.
///
/// Printable characters edit the focused field, Tab/Down and BackTab/Up move
/// between fields, Enter submits, Esc leaves the form.
fn handle_form_mode(
    key_event: KeyEvent,
    focus: usize,
    view_state: &mut ViewState,
) -> Option<UserCommand> {
    let count = view_state.field_count();
    if count == 0 {
        view_state.form_focus = None;
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('u') => Some(UserCommand::EditField {
                index: focus,
                edit: FieldEdit::Clear,
            }),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Esc => {
            view_state.form_focus = None;
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            view_state.form_focus = Some((focus + 1) % count);
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            view_state.form_focus = Some((focus + count - 1) % count);
            None
        }
        KeyCode::Enter => Some(UserCommand::Submit),
        KeyCode::Backspace => Some(UserCommand::EditField {
            index: focus,
            edit: FieldEdit::Backspace,
        }),
        KeyCode::Char(c) => Some(UserCommand::EditField {
            index: focus,
            edit: FieldEdit::Insert(c),
        }),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

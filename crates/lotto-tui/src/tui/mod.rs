// TUI front end: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest `PageSnapshot` from the app
// orchestrator plus purely local state (form focus, quit confirmation, ball
// reveal clock). It re-renders at ~30 fps so staggered ball reveals animate.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use lotto_core::protocol::{PageSnapshot, UiUpdate, UserCommand};
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{info, warn};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ViewState {
    /// Latest page from the orchestrator. `None` until the first update.
    pub snapshot: Option<PageSnapshot>,
    /// When the current round's balls started revealing.
    pub revealed_at: Option<Instant>,
    /// Index of the focused form field while editing the form.
    pub form_focus: Option<usize>,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl ViewState {
    pub fn round(&self) -> u64 {
        self.snapshot.as_ref().map_or(0, |s| s.round)
    }

    /// Number of fields in the partner form, 0 when the page has no form.
    pub fn field_count(&self) -> usize {
        self.snapshot
            .as_ref()
            .and_then(|s| s.page.partner_form.as_ref())
            .map_or(0, |form| form.fields().len())
    }

    pub fn has_generate_button(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| s.page.generate_button.is_some())
    }

    pub fn has_partner_form(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|s| s.page.partner_form.is_some())
    }

    /// Time since the current round started revealing.
    pub fn reveal_elapsed(&self, now: Instant) -> Duration {
        match self.revealed_at {
            Some(at) => now.saturating_duration_since(at),
            None => Duration::MAX,
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
///
/// A new round restarts the reveal clock; any other snapshot leaves the
/// animation where it is.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate, now: Instant) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            if snapshot.round != state.round() {
                state.revealed_at = Some(now);
            }
            state.snapshot = Some(*snapshot);

            let fields = state.field_count();
            if let Some(focus) = state.form_focus {
                if fields == 0 {
                    state.form_focus = None;
                } else if focus >= fields {
                    state.form_focus = Some(fields - 1);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

pub fn render_frame(frame: &mut Frame, state: &ViewState, now: Instant) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::balls::render(frame, layout.balls, state, now);
    widgets::round_note::render(frame, layout.round_note, state);
    widgets::partner_form::render(frame, layout.partner_form, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook that restores the terminal.
/// 3. Runs an async select loop: snapshots, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(update) => apply_ui_update(&mut view_state, update, Instant::now()),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse, resize, focus: the next tick redraws anyway.
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                let now = Instant::now();
                terminal.draw(|frame| render_frame(frame, &view_state, now))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_core::form::SubmissionState;
    use lotto_core::page::{ElementId, Page, PartnerForm};

    pub(crate) fn snapshot(round: u64) -> PageSnapshot {
        PageSnapshot {
            page: Page::full(PartnerForm::new("https://x.test/f", ["name", "email"])),
            round,
            submission: SubmissionState::Idle,
        }
    }

    #[test]
    fn view_state_default_is_empty() {
        let state = ViewState::default();
        assert!(state.snapshot.is_none());
        assert!(state.revealed_at.is_none());
        assert!(state.form_focus.is_none());
        assert!(!state.confirm_quit);
        assert_eq!(state.round(), 0);
        assert_eq!(state.field_count(), 0);
        assert!(!state.has_generate_button());
    }

    #[test]
    fn new_round_restarts_reveal_clock() {
        let mut state = ViewState::default();
        let t0 = Instant::now();
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(snapshot(1))), t0);
        assert_eq!(state.revealed_at, Some(t0));

        let t1 = t0 + Duration::from_secs(1);
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(snapshot(1))), t1);
        assert_eq!(state.revealed_at, Some(t0), "same round keeps the clock");

        let t2 = t0 + Duration::from_secs(2);
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(snapshot(2))), t2);
        assert_eq!(state.revealed_at, Some(t2));
        assert_eq!(state.round(), 2);
    }

    #[test]
    fn focus_cleared_when_form_disappears() {
        let mut state = ViewState::default();
        state.form_focus = Some(1);
        let mut snap = snapshot(1);
        snap.page.remove(ElementId::PartnerForm);
        apply_ui_update(&mut state, UiUpdate::Snapshot(Box::new(snap)), Instant::now());
        assert!(state.form_focus.is_none());
    }

    #[test]
    fn focus_clamped_to_field_count() {
        let mut state = ViewState::default();
        state.form_focus = Some(7);
        apply_ui_update(
            &mut state,
            UiUpdate::Snapshot(Box::new(snapshot(1))),
            Instant::now(),
        );
        assert_eq!(state.form_focus, Some(1));
    }

    #[test]
    fn reveal_elapsed_without_clock_shows_everything() {
        let state = ViewState::default();
        assert_eq!(state.reveal_elapsed(Instant::now()), Duration::MAX);
    }

    #[test]
    fn render_frame_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();

        let empty = ViewState::default();
        terminal
            .draw(|frame| render_frame(frame, &empty, Instant::now()))
            .unwrap();

        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::Snapshot(Box::new(snapshot(1))),
            Instant::now(),
        );
        state.confirm_quit = true;
        terminal
            .draw(|frame| render_frame(frame, &state, Instant::now()))
            .unwrap();
    }
}

// Application state and orchestration logic.
//
// The central event loop owns the page, the draw controller and the form
// submitter. It reacts to user commands from the front end and to submission
// outcomes from spawned POST tasks, and pushes a page snapshot after every
// change.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::Config;
use crate::draw::{Draw, DrawController};
use crate::form::{spawn_submission, FormSubmitter, FormTransport, SubmitOutcome};
use crate::page::Page;
use crate::protocol::{FieldEdit, PageSnapshot, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub page: Page,
    pub draws: DrawController,
    pub submitter: FormSubmitter,
    pub transport: Arc<dyn FormTransport>,
    /// Sender handed to each submission task; the receiving half is passed
    /// to `run`.
    pub outcome_tx: mpsc::Sender<SubmitOutcome>,
    pub current_submission: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(
        config: Config,
        page: Page,
        draws: DrawController,
        transport: Arc<dyn FormTransport>,
        outcome_tx: mpsc::Sender<SubmitOutcome>,
    ) -> Self {
        AppState {
            config,
            page,
            draws,
            submitter: FormSubmitter::new(),
            transport,
            outcome_tx,
            current_submission: None,
        }
    }

    /// Load-time work: stamp the updated-at date and make the first draw.
    pub fn start(&mut self, today: NaiveDate) {
        self.page.stamp_updated_at(today);
        self.draws.generate(&mut self.page);
    }

    /// Handle the generate button. Ignored when the page has no button to
    /// press.
    pub fn generate(&mut self) -> Option<Draw> {
        if self.page.generate_button.is_none() {
            debug!("No generate button on page, ignoring generate");
            return None;
        }
        Some(self.draws.generate(&mut self.page))
    }

    /// Handle the submit action. Returns true when a POST was started.
    pub fn submit(&mut self) -> bool {
        let Some(submission) = self.submitter.begin(&mut self.page) else {
            return false;
        };
        let handle = spawn_submission(
            Arc::clone(&self.transport),
            submission,
            self.outcome_tx.clone(),
        );
        self.current_submission = Some(handle);
        true
    }

    /// Apply a finished submission's outcome.
    pub fn settle(&mut self, outcome: SubmitOutcome) {
        self.current_submission = None;
        self.submitter.settle(&mut self.page, outcome);
    }

    pub fn edit_field(&mut self, index: usize, edit: FieldEdit) {
        let Some(field) = self
            .page
            .partner_form
            .as_mut()
            .and_then(|form| form.field_mut(index))
        else {
            debug!("No form field at index {}", index);
            return;
        };
        match edit {
            FieldEdit::Insert(c) => field.value.push(c),
            FieldEdit::Backspace => {
                field.value.pop();
            }
            FieldEdit::Clear => field.value.clear(),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            page: self.page.clone(),
            round: self.draws.round(),
            submission: self.submitter.state(),
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the front end
/// 2. Submission outcomes from spawned POST tasks
///
/// Sends an initial snapshot, then one after every handled event.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut outcome_rx: mpsc::Receiver<SubmitOutcome>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    push_snapshot(&state, &ui_tx).await;

    // Replace the outcome recv with a disabled branch once the channel closes
    // so tokio::select! never spins on it.
    let mut outcomes_open = true;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd);
                        push_snapshot(&state, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            outcome = outcome_rx.recv(), if outcomes_open => {
                match outcome {
                    Some(outcome) => {
                        state.settle(outcome);
                        push_snapshot(&state, &ui_tx).await;
                    }
                    None => {
                        info!("Outcome channel closed");
                        outcomes_open = false;
                    }
                }
            }
        }
    }

    // Quitting is the only way to cancel a pending submission.
    if let Some(handle) = state.current_submission.take() {
        info!("Abandoning in-flight submission");
        handle.abort();
    }

    Ok(())
}

fn handle_user_command(state: &mut AppState, cmd: UserCommand) {
    match cmd {
        UserCommand::Generate => {
            state.generate();
        }
        UserCommand::EditField { index, edit } => {
            state.edit_field(index, edit);
        }
        UserCommand::Submit => {
            state.submit();
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

async fn push_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.snapshot();
    if ui_tx
        .send(UiUpdate::Snapshot(Box::new(snapshot)))
        .await
        .is_err()
    {
        debug!("UI channel closed, dropping snapshot");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

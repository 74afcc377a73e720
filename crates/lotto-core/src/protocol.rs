// Messages between the front end and the app orchestrator.

use crate::form::SubmissionState;
use crate::page::Page;

/// Commands sent from the front end to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// The generate button was pressed.
    Generate,
    /// Edit a partner form field, addressed by position.
    EditField { index: usize, edit: FieldEdit },
    /// The partner form was submitted.
    Submit,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Backspace,
    Clear,
}

/// Updates pushed from the orchestrator to the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    Snapshot(Box<PageSnapshot>),
}

/// Everything the front end needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub page: Page,
    /// Rounds drawn so far.
    pub round: u64,
    pub submission: SubmissionState,
}

// Partner form submission: endpoint validation, the submission state
// machine, and the task that performs the POST.
//
// A submission runs in two halves. `begin` validates, locks the submit
// control and hands back what to send; `settle` applies the outcome and
// unlocks the control. The POST itself runs on a spawned task between the
// two so the rest of the page stays responsive.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::page::Page;

use super::transport::{FormTransport, SubmitError, SubmitOutcome};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Marker left in the default endpoint until the real form id is filled in.
pub const PLACEHOLDER_SENTINEL: &str = "YOUR_FORM_ID";

pub const STATUS_NOT_CONFIGURED: &str =
    "폼 전송 주소가 설정되지 않았습니다. 관리자에게 문의해 주세요.";
pub const STATUS_SENDING: &str = "전송 중입니다...";
pub const STATUS_SUCCESS: &str = "문의가 접수되었습니다. 감사합니다!";
pub const STATUS_FAILURE: &str = "전송에 실패했습니다. 잠시 후 다시 시도해 주세요.";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Sending,
    Success,
    Failure,
}

/// What `begin` decided to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
}

/// Check that the endpoint is set and no longer the placeholder.
///
/// Returns the endpoint verbatim on success.
pub fn validate_endpoint(action: &str) -> Result<&str, SubmitError> {
    if action.trim().is_empty() || action.contains(PLACEHOLDER_SENTINEL) {
        return Err(SubmitError::NotConfigured);
    }
    Ok(action)
}

// ---------------------------------------------------------------------------
// FormSubmitter
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FormSubmitter {
    state: SubmissionState,
}

impl FormSubmitter {
    pub fn new() -> Self {
        FormSubmitter::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == SubmissionState::Sending
    }

    /// Start a submission.
    ///
    /// Returns `None` when nothing should go over the network: no form on
    /// the page, a submission already in flight, or an unconfigured endpoint
    /// (which also sets the configuration-error status). Otherwise the
    /// submit control is disabled, the status reads "sending", and the
    /// caller must eventually pass the outcome to `settle`.
    pub fn begin(&mut self, page: &mut Page) -> Option<Submission> {
        if self.is_sending() {
            debug!("Submission already in flight, ignoring submit");
            return None;
        }
        if page.submit_button.as_ref().is_some_and(|b| !b.is_enabled()) {
            debug!("Submit control disabled, ignoring submit");
            return None;
        }
        let Some(form) = page.partner_form.as_ref() else {
            debug!("No partner form on page, ignoring submit");
            return None;
        };

        let endpoint = match validate_endpoint(form.action()) {
            Ok(endpoint) => endpoint.to_string(),
            Err(e) => {
                warn!("Form submit refused: {}", e);
                page.set_status(STATUS_NOT_CONFIGURED);
                self.state = SubmissionState::Failure;
                return None;
            }
        };
        let fields = form.serialize();

        if let Some(button) = page.submit_button.as_mut() {
            button.disable();
        }
        page.set_status(STATUS_SENDING);
        self.state = SubmissionState::Sending;
        info!("Submitting partner form ({} fields)", fields.len());

        Some(Submission { endpoint, fields })
    }

    /// Finish the in-flight submission. Re-enabling the submit control is
    /// always the last step.
    pub fn settle(&mut self, page: &mut Page, outcome: SubmitOutcome) {
        if !self.is_sending() {
            debug!("Outcome arrived with no submission in flight");
        }

        match outcome {
            Ok(()) => {
                info!("Partner form submitted");
                if let Some(form) = page.partner_form.as_mut() {
                    form.reset();
                }
                page.set_status(STATUS_SUCCESS);
                self.state = SubmissionState::Success;
            }
            Err(e) => {
                match &e {
                    SubmitError::Status {
                        status,
                        detail: Some(detail),
                    } => warn!("Partner form rejected ({}): {}", status, detail),
                    _ => warn!("Partner form submission failed: {}", e),
                }
                page.set_status(STATUS_FAILURE);
                self.state = SubmissionState::Failure;
            }
        }

        if let Some(button) = page.submit_button.as_mut() {
            button.enable();
        }
    }
}

// ---------------------------------------------------------------------------
// Submission task
// ---------------------------------------------------------------------------

/// Reports a submission's outcome exactly once.
///
/// If it is dropped without `report` having run (the task panicked or was
/// aborted mid-request) it reports `SubmitError::Interrupted`, so whoever
/// owns the page always gets to call `settle`.
pub struct SettleGuard {
    tx: Option<mpsc::Sender<SubmitOutcome>>,
}

impl SettleGuard {
    pub fn new(tx: mpsc::Sender<SubmitOutcome>) -> Self {
        SettleGuard { tx: Some(tx) }
    }

    pub async fn report(mut self, outcome: SubmitOutcome) {
        if let Some(tx) = self.tx.take() {
            if tx.send(outcome).await.is_err() {
                debug!("Outcome receiver dropped");
            }
        }
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            if tx.try_send(Err(SubmitError::Interrupted)).is_err() {
                warn!("Could not report interrupted submission");
            }
        }
    }
}

/// Perform `submission` on its own task and report the outcome on `tx`.
///
/// The guard is created before spawning, so a task aborted before its first
/// poll still reports.
pub fn spawn_submission(
    transport: Arc<dyn FormTransport>,
    submission: Submission,
    tx: mpsc::Sender<SubmitOutcome>,
) -> JoinHandle<()> {
    let guard = SettleGuard::new(tx);
    tokio::spawn(async move {
        let outcome = transport
            .post_form(&submission.endpoint, &submission.fields)
            .await;
        guard.report(outcome).await;
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Partner form submission.

pub mod submitter;
pub mod transport;

pub use submitter::{
    spawn_submission, validate_endpoint, FormSubmitter, SettleGuard, Submission,
    SubmissionState, PLACEHOLDER_SENTINEL,
};
pub use transport::{FormTransport, HttpTransport, SubmitError, SubmitOutcome};

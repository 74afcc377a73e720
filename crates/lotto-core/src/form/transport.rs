// Network side of the partner form: the transport seam and its reqwest
// implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form endpoint is not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint responded with status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("submission ended before reporting an outcome")]
    Interrupted,
}

/// Result of one submission attempt.
pub type SubmitOutcome = Result<(), SubmitError>;

/// Delivers serialized form fields to an endpoint.
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn post_form(&self, endpoint: &str, fields: &[(String, String)]) -> SubmitOutcome;
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// POSTs fields as `multipart/form-data` and asks for a JSON reply.
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpTransport { http })
    }
}

#[async_trait]
impl FormTransport for HttpTransport {
    async fn post_form(&self, endpoint: &str, fields: &[(String, String)]) -> SubmitOutcome {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }

        let response = self
            .http
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "form accepted");
            return Ok(());
        }

        let detail = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| error_detail(&body));
        Err(SubmitError::Status {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Pull a readable message out of a JSON error body.
///
/// Handles `{"errors": [{"message": ..}, ..]}` (joined with "; ") and
/// `{"error": ".."}`.
pub(crate) fn error_detail(body: &Value) -> Option<String> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        let messages: Vec<&str> = errors
            .iter()
            .filter_map(|e| e.get("message").and_then(Value::as_str))
            .collect();
        if !messages.is_empty() {
            return Some(messages.join("; "));
        }
    }
    body.get("error")
        .and_then(Value::as_str)
        .map(|s| s.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

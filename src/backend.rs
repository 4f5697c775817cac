use serde::Serialize;
use serde_json::Value;
use reqwest::Client;
use crate::api::models::ProcessingResult;
use crate::error::{AppError, Result};

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    url: &'a str,
    prompt: &'a str,
}

/// Client for the remote transcription/summarization service.
pub struct BackendClient {
    client: Client,
    endpoint: String,
}

impl BackendClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        BackendClient {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one summarize call. Transport faults surface as
    /// `AppError::Internal`, non-success statuses as `AppError::Backend`.
    pub async fn summarize(&self, url: &str, prompt: &str) -> Result<ProcessingResult> {
        let res = self
            .client
            .post(&self.endpoint)
            .json(&SummarizeRequest { url, prompt })
            .send()
            .await?;

        let status = res.status().as_u16();
        if !res.status().is_success() {
            let body = res.bytes().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::warn!(status, %message, "processing backend rejected request");
            return Err(AppError::Backend(message));
        }

        let body = res.bytes().await?;
        ProcessingResult::from_json(&body)
    }
}

/// Pulls the `detail` message out of an error body, falling back to a
/// generic message carrying the status code.
pub fn error_message(status: u16, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|body| body.get("detail").cloned());

    match detail {
        Some(Value::String(msg)) if !msg.is_empty() => msg,
        Some(other) if !is_falsy(&other) => other.to_string(),
        _ => format!("Backend error: {}", status),
    }
}

// `""`, `0` and `false` carry no message.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

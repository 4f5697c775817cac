use std::time::Instant;

use reqwest::{Client, ClientBuilder};

use crate::api::models::{SummaryRequest, SummaryResponse};
use crate::backend::BackendClient;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::metadata::MetadataFetcher;

pub const URL_REQUIRED_MESSAGE: &str = "YouTube URL is required";

/// Validates a summary request, calls the processing backend and attaches
/// best-effort video metadata to its result.
pub struct Orchestrator {
    backend: BackendClient,
    metadata: MetadataFetcher,
}

impl Orchestrator {
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client()?;

        Ok(Orchestrator {
            backend: BackendClient::new(client.clone(), config.summarize_endpoint()),
            metadata: MetadataFetcher::new(client, config.oembed_endpoint.clone()),
        })
    }

    pub async fn summarize(&self, req: &SummaryRequest) -> Result<SummaryResponse> {
        let url = validate(req)?;
        let prompt = req.effective_prompt();

        tracing::info!(url, endpoint = self.backend.endpoint(), "calling processing backend");
        let backend_start = Instant::now();
        let result = self.backend.summarize(url, prompt).await?;
        tracing::info!(elapsed = ?backend_start.elapsed(), "processing backend succeeded");

        // Metadata is only looked up once there is a successful result to attach it to.
        let metadata = self.metadata.fetch(url).await;
        if metadata.is_none() {
            tracing::debug!(url, "responding without metadata");
        }

        Ok(SummaryResponse::new(result, metadata))
    }
}

fn validate(req: &SummaryRequest) -> Result<&str> {
    match req.url.as_deref() {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(AppError::Validation(URL_REQUIRED_MESSAGE.to_string())),
    }
}

// Idle connections are not kept, so no connection outlives the request that opened it.
fn build_client() -> Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(0)
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))
}

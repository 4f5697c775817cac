//! Best-effort oEmbed lookup. Every failure on this path is logged and
//! collapsed to `None`; nothing here can fail a request.

use reqwest::Client;
use url::Url;

use crate::api::models::VideoMetadata;
use crate::error::{AppError, Result};
use crate::resolver::{resolve_video_id, VideoId};

pub struct MetadataFetcher {
    client: Client,
    endpoint: String,
}

impl MetadataFetcher {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        MetadataFetcher {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Looks up metadata for the video behind `raw_url`. Returns `None`
    /// without touching the network when the link cannot be resolved.
    pub async fn fetch(&self, raw_url: &str) -> Option<VideoMetadata> {
        let Some(video_id) = resolve_video_id(raw_url) else {
            tracing::debug!(url = raw_url, "no video id, skipping metadata lookup");
            return None;
        };
        tracing::debug!(%video_id, "resolved video id");

        match self.try_fetch(&video_id).await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(%video_id, error = %e, "metadata lookup failed");
                None
            }
        }
    }

    async fn try_fetch(&self, video_id: &VideoId) -> Result<Option<VideoMetadata>> {
        let lookup_url = self.lookup_url(video_id)?;

        let res = self
            .client
            .get(lookup_url)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!(%video_id, status = res.status().as_u16(), "metadata service returned non-success");
            return Ok(None);
        }

        let body = res.bytes().await?;
        let metadata = serde_json::from_slice(&body)?;
        Ok(Some(metadata))
    }

    pub fn lookup_url(&self, video_id: &VideoId) -> Result<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[("format", "json"), ("url", video_id.watch_url().as_str())],
        )
        .map_err(|e| AppError::internal(format!("invalid oEmbed endpoint {}: {}", self.endpoint, e)))
    }
}

//! Video title lookup via an oEmbed endpoint.

use serde::Deserialize;
use tracing::{debug, warn};

/// Base URL of the oEmbed lookup service.
pub const OEMBED_BASE_URL: &str = "https://noembed.com";

/// oEmbed response; everything except the title is ignored.
#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: Option<String>,
}

/// Looks up human-readable video titles through a third-party oEmbed service.
#[derive(Debug, Clone)]
pub struct OembedClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for OembedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OembedClient {
    /// Create a client against the public oEmbed service.
    pub fn new() -> Self {
        Self::with_base_url(OEMBED_BASE_URL)
    }

    /// Create a client against a custom host (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the title for a video URL, soft-failing to `None`.
    pub async fn fetch_title(&self, video_url: &str) -> Option<String> {
        let url = format!(
            "{}/embed?url={}",
            self.base_url,
            urlencoding::encode(video_url)
        );

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("oEmbed lookup failed for {}: {}", video_url, e);
                return None;
            }
        };

        match response.json::<OembedResponse>().await {
            Ok(body) => {
                if let Some(ref title) = body.title {
                    debug!("oEmbed title for {}: {}", video_url, title);
                }
                body.title
            }
            Err(e) => {
                warn!("oEmbed response parse failed for {}: {}", video_url, e);
                None
            }
        }
    }
}

//! Remote thumbnail fetching.

use tracing::{debug, warn};

use vidsmart_models::youtube::{thumbnail_path, ThumbnailQuality, THUMBNAIL_BASE_URL};
use vidsmart_models::ImageSignal;

/// Downloads video thumbnails from the public image host.
///
/// Every fetch fails soft: network, HTTP, and decode problems all come back
/// as `None` so the pipeline can treat a missing thumbnail as "no visual
/// signal available" rather than a fatal error.
#[derive(Debug, Clone)]
pub struct ThumbnailFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl Default for ThumbnailFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailFetcher {
    /// Create a fetcher against the public thumbnail host.
    pub fn new() -> Self {
        Self::with_base_url(THUMBNAIL_BASE_URL)
    }

    /// Create a fetcher against a custom host (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Thumbnail URL for a video ID at the given quality tier.
    pub fn url_for(&self, video_id: &str, quality: ThumbnailQuality) -> String {
        format!("{}{}", self.base_url, thumbnail_path(video_id, quality))
    }

    /// Download the image at `url`, soft-failing to `None`.
    pub async fn fetch_image(&self, url: &str) -> Option<ImageSignal> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Thumbnail fetch failed for {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Thumbnail fetch for {} returned {}", url, response.status());
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => {
                debug!("Fetched thumbnail {} ({} bytes)", url, bytes.len());
                Some(ImageSignal::from_jpeg(&bytes))
            }
            Err(e) => {
                warn!("Thumbnail body read failed for {}: {}", url, e);
                None
            }
        }
    }
}

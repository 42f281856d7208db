//! Pipeline orchestration.

use std::fmt;
use std::path::Path;

use tracing::{info, warn};

use vidsmart_analysis::GeminiClient;
use vidsmart_media::{extract_frame, OembedClient, ThumbnailFetcher};
use vidsmart_models::youtube::{extract_youtube_id, ThumbnailQuality};
use vidsmart_models::{CatalogEntry, SourceKind};

use crate::error::IngestResult;

/// Context handed to the analysis client for uploaded files.
pub const LOCAL_FILE_CONTEXT: &str = "تحليل محتوى الفيديو المرفق";

/// Stages of a single ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    ExtractingSignal,
    Analyzing,
    Completed,
}

impl IngestStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestStage::ExtractingSignal => "extracting_signal",
            IngestStage::Analyzing => "analyzing",
            IngestStage::Completed => "completed",
        }
    }
}

impl fmt::Display for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Orchestrates extractor → analysis client → entry construction.
///
/// One ingestion in flight per instance is the supported contract; runs
/// cannot be cancelled once started.
pub struct IngestionPipeline {
    analysis: GeminiClient,
    thumbnails: ThumbnailFetcher,
    oembed: OembedClient,
}

impl IngestionPipeline {
    /// Create a pipeline against the production endpoints.
    pub fn new(analysis: GeminiClient) -> Self {
        Self {
            analysis,
            thumbnails: ThumbnailFetcher::new(),
            oembed: OembedClient::new(),
        }
    }

    /// Create a pipeline with custom fetchers (used by tests).
    pub fn with_fetchers(
        analysis: GeminiClient,
        thumbnails: ThumbnailFetcher,
        oembed: OembedClient,
    ) -> Self {
        Self {
            analysis,
            thumbnails,
            oembed,
        }
    }

    /// Ingest a local video file.
    ///
    /// Frame extraction is fatal on decode failure: the operation errors and
    /// nothing is constructed. The captured frame serves as both the image
    /// signal and the entry thumbnail.
    pub async fn ingest_local(&self, path: impl AsRef<Path>) -> IngestResult<CatalogEntry> {
        let path = path.as_ref();
        info!(stage = %IngestStage::ExtractingSignal, "Ingesting local file {}", path.display());

        let frame = extract_frame(path).await?;

        info!(stage = %IngestStage::Analyzing, "Frame captured, requesting analysis");
        let analysis = self.analysis.analyze(Some(&frame), LOCAL_FILE_CONTEXT).await?;

        let entry = CatalogEntry::new(
            SourceKind::LocalFile,
            analysis,
            frame.to_data_uri(),
            None,
        );
        info!(stage = %IngestStage::Completed, entry_id = %entry.id, "Local ingestion completed");
        Ok(entry)
    }

    /// Ingest a remote video URL.
    ///
    /// For recognized YouTube URLs the thumbnail tiers are tried high-res
    /// first, then the title lookup substitutes when no image came back; a
    /// generic URL is analyzed from its text alone. There is no fatal branch:
    /// the analysis client absorbs every service failure.
    pub async fn ingest_remote(&self, url: &str) -> IngestResult<CatalogEntry> {
        let url = url.trim();

        let Some(video_id) = extract_youtube_id(url) else {
            info!(stage = %IngestStage::Analyzing, "Generic URL, analyzing from context only");
            let analysis = self.analysis.analyze(None, url).await?;
            let entry = CatalogEntry::new(SourceKind::RemoteUrl, analysis, "", Some(url.to_string()));
            info!(stage = %IngestStage::Completed, entry_id = %entry.id, "Remote ingestion completed");
            return Ok(entry);
        };

        info!(stage = %IngestStage::ExtractingSignal, video_id = %video_id, "Resolving remote signal");

        // High-res tier first; the entry keeps the last URL attempted even
        // when that fetch also failed, so remote entries stay displayable.
        let mut thumbnail = self.thumbnails.url_for(&video_id, ThumbnailQuality::Max);
        let mut image = self.thumbnails.fetch_image(&thumbnail).await;
        if image.is_none() {
            thumbnail = self.thumbnails.url_for(&video_id, ThumbnailQuality::High);
            image = self.thumbnails.fetch_image(&thumbnail).await;
        }

        let mut context = url.to_string();
        if image.is_none() {
            warn!(video_id = %video_id, "No thumbnail available, falling back to title lookup");
            if let Some(title) = self.oembed.fetch_title(url).await {
                context.push_str(&format!("\nVideo Title/Context: {}", title));
            }
        }

        info!(stage = %IngestStage::Analyzing, video_id = %video_id, has_image = image.is_some(), "Requesting analysis");
        let analysis = self.analysis.analyze(image.as_ref(), &context).await?;

        let entry = CatalogEntry::new(
            SourceKind::RemoteUrl,
            analysis,
            thumbnail,
            Some(url.to_string()),
        );
        info!(stage = %IngestStage::Completed, entry_id = %entry.id, "Remote ingestion completed");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn analysis_body(title: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": { "parts": [{
                    "text": format!(
                        "{{\"title\":\"{}\",\"description\":\"d\",\"fullAnalysis\":\"f\"}}",
                        title
                    )
                }] }
            }]
        })
    }

    async fn gemini_server(title: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body(title)))
            .mount(&server)
            .await;
        server
    }

    fn pipeline(gemini: &MockServer, thumbs: &MockServer, oembed: &MockServer) -> IngestionPipeline {
        IngestionPipeline::with_fetchers(
            GeminiClient::new("test-key").with_base_url(gemini.uri()),
            ThumbnailFetcher::with_base_url(thumbs.uri()),
            OembedClient::with_base_url(oembed.uri()),
        )
    }

    #[tokio::test]
    async fn test_remote_youtube_uses_maxres_thumbnail() {
        let gemini = gemini_server("عنوان").await;

        let thumbs = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vi/dQw4w9WgXcQ/maxresdefault.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8]))
            .expect(1)
            .mount(&thumbs)
            .await;

        let oembed = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&oembed).await;

        let pipeline = pipeline(&gemini, &thumbs, &oembed);
        let entry = pipeline.ingest_remote("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        assert_eq!(entry.source, SourceKind::RemoteUrl);
        assert_eq!(entry.title, "عنوان");
        assert!(entry.thumbnail.ends_with("/vi/dQw4w9WgXcQ/maxresdefault.jpg"));
        assert_eq!(entry.remote_url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
    }

    #[tokio::test]
    async fn test_remote_falls_back_hq_then_title() {
        let gemini = gemini_server("عنوان").await;

        let thumbs = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/vi/dQw4w9WgXcQ/.*\.jpg$"))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&thumbs)
            .await;

        let oembed = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/embed"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"title": "Some Title"})),
            )
            .expect(1)
            .mount(&oembed)
            .await;

        let pipeline = pipeline(&gemini, &thumbs, &oembed);
        let entry = pipeline.ingest_remote("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        // maxres attempted first, then hq; entry keeps the hq reference
        let requests = thumbs.received_requests().await.unwrap();
        assert_eq!(requests[0].url.path(), "/vi/dQw4w9WgXcQ/maxresdefault.jpg");
        assert_eq!(requests[1].url.path(), "/vi/dQw4w9WgXcQ/hqdefault.jpg");
        assert!(entry.thumbnail.ends_with("/vi/dQw4w9WgXcQ/hqdefault.jpg"));
    }

    #[tokio::test]
    async fn test_remote_always_yields_entry_when_everything_fails() {
        // Gemini down too: the entry is degraded but still constructed.
        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&gemini)
            .await;

        let thumbs = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&thumbs)
            .await;

        let oembed = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&oembed)
            .await;

        let pipeline = pipeline(&gemini, &thumbs, &oembed);
        let entry = pipeline.ingest_remote("https://youtu.be/dQw4w9WgXcQ").await.unwrap();

        assert_eq!(entry.title, "الخدمة مشغولة");
        assert!(!entry.description.is_empty());
        assert!(!entry.full_analysis.is_empty());
    }

    #[tokio::test]
    async fn test_generic_url_analyzed_from_context_only() {
        let gemini = gemini_server("عنوان عام").await;

        let thumbs = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&thumbs).await;
        let oembed = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&oembed).await;

        let pipeline = pipeline(&gemini, &thumbs, &oembed);
        let entry = pipeline
            .ingest_remote("https://example.com/videos/42")
            .await
            .unwrap();

        assert_eq!(entry.title, "عنوان عام");
        assert!(entry.thumbnail.is_empty());
        assert_eq!(
            entry.remote_url.as_deref(),
            Some("https://example.com/videos/42")
        );
    }

    #[tokio::test]
    async fn test_local_undecodable_file_fails_whole_operation() {
        if vidsmart_media::check_ffmpeg().is_err() {
            return; // environment without ffmpeg
        }

        let gemini = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&gemini)
            .await;
        let thumbs = MockServer::start().await;
        let oembed = MockServer::start().await;

        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("broken.mp4");
        tokio::fs::write(&bogus, b"not a video").await.unwrap();

        let pipeline = pipeline(&gemini, &thumbs, &oembed);
        let err = pipeline.ingest_local(&bogus).await.unwrap_err();
        assert!(err.is_decode_failure());
    }
}

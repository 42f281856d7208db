//! Ingestion error types.

use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that abort an ingestion run.
///
/// Only these two surface to callers; classified analysis-service failures
/// are absorbed into degraded entries by the analysis client.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Media error: {0}")]
    Media(#[from] vidsmart_media::MediaError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] vidsmart_analysis::AnalysisError),
}

impl IngestError {
    /// True when the input video could not be decoded.
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            IngestError::Media(vidsmart_media::MediaError::DecodeFailed { .. })
        )
    }

    /// True when the submission carried no analyzable signal.
    pub fn is_no_content(&self) -> bool {
        matches!(
            self,
            IngestError::Analysis(vidsmart_analysis::AnalysisError::NoContent)
        )
    }
}

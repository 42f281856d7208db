//! Analysis error types.

use thiserror::Error;

/// The only failure `analyze` surfaces to callers.
///
/// Every other problem — transport, auth, quota, malformed responses — is
/// converted into a degraded [`vidsmart_models::AnalysisResult`] instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("No content to analyze")]
    NoContent,
}

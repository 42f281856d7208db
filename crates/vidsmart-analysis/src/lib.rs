//! Gemini content analysis client.
//!
//! Sends an image signal and/or text context to Google's Gemini API and
//! normalizes the answer into an [`vidsmart_models::AnalysisResult`]. Apart
//! from the no-content precondition, this client never fails outward: parse
//! problems and every transport/auth/quota failure are absorbed into a
//! degraded-but-valid result carrying explanatory Arabic text.

pub mod client;
pub mod error;
pub mod failure;
pub mod parse;

pub use client::{CredentialStatus, GeminiClient, GEMINI_BASE_URL, GEMINI_MODEL};
pub use error::AnalysisError;
pub use failure::{FailureKind, ServiceFailure};
pub use parse::ParsedAnalysis;

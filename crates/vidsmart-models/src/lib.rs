//! Shared data models for the VidSmart catalog.
//!
//! This crate provides Serde-serializable types for:
//! - Catalog entries and groups (playlists)
//! - AI analysis results and image signals
//! - YouTube URL parsing and thumbnail templating

pub mod analysis;
pub mod entry;
pub mod signal;
pub mod youtube;

// Re-export common types
pub use analysis::AnalysisResult;
pub use entry::{CatalogEntry, EntryId, Group, GroupId, SourceKind};
pub use signal::ImageSignal;
pub use youtube::{extract_youtube_id, thumbnail_path, thumbnail_url, watch_url, ThumbnailQuality};

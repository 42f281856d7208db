//! Video ingestion pipeline.
//!
//! Orchestrates signal extraction → content analysis → entry construction.
//! Every terminal state yields either a fully-analyzed or a
//! gracefully-degraded [`vidsmart_models::CatalogEntry`]; the only fatal
//! paths are an undecodable local file and a submission with no signal at
//! all.

pub mod error;
pub mod pipeline;

pub use error::{IngestError, IngestResult};
pub use pipeline::{IngestStage, IngestionPipeline, LOCAL_FILE_CONTEXT};

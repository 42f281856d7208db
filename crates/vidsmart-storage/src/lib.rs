//! Persisted catalog store.
//!
//! Two collections — entries and groups — are each serialized as one JSON
//! document under a fixed key, loaded once at startup and rewritten in full
//! on every mutation. Last-writer-wins, no transactions: that is the given
//! consistency model, kept explicit behind [`DocumentStore`].

pub mod catalog;
pub mod document;
pub mod error;

pub use catalog::{Catalog, EntryFilter, GROUPS_KEY, VIDEOS_KEY};
pub use document::{DocumentStore, FileStore};
pub use error::{StorageError, StorageResult};

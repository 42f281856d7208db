//! Whole-document key-value persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::StorageResult;

/// A key-value store of whole JSON documents.
///
/// `save` rewrites the document in full; there are no partial updates and no
/// transactions. Concurrent writers race with last-writer-wins semantics.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the document stored under `key`, if any.
    async fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the document stored under `key`.
    async fn save(&self, key: &str, document: &str) -> StorageResult<()>;
}

/// File-backed document store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn load(&self, key: &str) -> StorageResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, document: &str) -> StorageResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.path_for(key);
        tokio::fs::write(&path, document).await?;
        debug!("Wrote {} ({} bytes)", path.display(), document.len());
        Ok(())
    }
}

//! The catalog: entries and groups over a document store.

use tracing::{info, warn};

use vidsmart_models::{CatalogEntry, EntryId, Group, GroupId};

use crate::document::DocumentStore;
use crate::error::{StorageError, StorageResult};

/// Storage key for the entry collection.
pub const VIDEOS_KEY: &str = "vidSmart_videos";
/// Storage key for the group collection.
pub const GROUPS_KEY: &str = "vidSmart_playlists";

/// Filter applied when listing entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Only entries in this group; `None` means all
    pub group: Option<GroupId>,
    /// Case-insensitive substring match over title and description
    pub search: Option<String>,
}

/// In-memory catalog synchronized to a [`DocumentStore`] on every mutation.
///
/// Single-writer by contract: all mutating methods take `&mut self` and each
/// one rewrites the affected document in full before returning.
pub struct Catalog<S: DocumentStore> {
    store: S,
    entries: Vec<CatalogEntry>,
    groups: Vec<Group>,
}

/// Groups a fresh catalog starts with.
fn default_groups() -> Vec<Group> {
    vec![
        Group {
            id: GroupId::from("1"),
            name: "شروحات برمجية".to_string(),
        },
        Group {
            id: GroupId::from("2"),
            name: "تصميم جرافيك".to_string(),
        },
    ]
}

impl<S: DocumentStore> Catalog<S> {
    /// Load both collections from the store.
    ///
    /// Missing documents start empty (groups get the default seed); corrupt
    /// documents are logged and treated as empty rather than failing startup.
    pub async fn open(store: S) -> StorageResult<Self> {
        let entries = match store.load(VIDEOS_KEY).await? {
            Some(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Failed to load entries from storage: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut seeded = false;
        let groups = match store.load(GROUPS_KEY).await? {
            Some(text) => match serde_json::from_str(&text) {
                Ok(groups) => groups,
                Err(e) => {
                    warn!("Failed to load groups from storage: {}", e);
                    Vec::new()
                }
            },
            None => {
                seeded = true;
                default_groups()
            }
        };

        let catalog = Self {
            store,
            entries,
            groups,
        };

        if seeded {
            catalog.save_groups().await?;
        }

        info!(
            "Catalog opened: {} entries, {} groups",
            catalog.entries.len(),
            catalog.groups.len()
        );
        Ok(catalog)
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// All groups.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Look up a group by id.
    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// Look up an entry by id.
    pub fn entry(&self, id: &EntryId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Entries matching a filter, preserving catalog order.
    pub fn filtered(&self, filter: &EntryFilter) -> Vec<&CatalogEntry> {
        let query = filter
            .search
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        self.entries
            .iter()
            .filter(|entry| {
                let matches_group = match &filter.group {
                    Some(group) => entry.group_id.as_ref() == Some(group),
                    None => true,
                };
                let matches_search = query.is_empty()
                    || entry.title.to_lowercase().contains(&query)
                    || entry.description.to_lowercase().contains(&query);
                matches_group && matches_search
            })
            .collect()
    }

    /// Prepend a new entry and persist.
    ///
    /// A `group_id` on the entry must reference an existing group.
    pub async fn add_entry(&mut self, entry: CatalogEntry) -> StorageResult<()> {
        if let Some(ref group_id) = entry.group_id {
            if self.group(group_id).is_none() {
                return Err(StorageError::invalid_group(group_id.as_str()));
            }
        }

        self.entries.insert(0, entry);
        self.save_entries().await
    }

    /// Delete exactly one entry by id and persist.
    ///
    /// Returns `false` (without writing) when the id is unknown. The order of
    /// the remaining entries is unchanged.
    pub async fn delete_entry(&mut self, id: &EntryId) -> StorageResult<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);

        if self.entries.len() == before {
            return Ok(false);
        }

        self.save_entries().await?;
        Ok(true)
    }

    /// Create a group with a fresh id and persist.
    pub async fn create_group(&mut self, name: &str) -> StorageResult<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::EmptyGroupName);
        }

        let group = Group::new(name);
        self.groups.push(group.clone());
        self.save_groups().await?;
        Ok(group)
    }

    /// Move an entry into a group (or back to ungrouped) and persist.
    ///
    /// Returns `false` when the entry id is unknown.
    pub async fn assign_group(
        &mut self,
        entry_id: &EntryId,
        group: Option<GroupId>,
    ) -> StorageResult<bool> {
        if let Some(ref group_id) = group {
            if self.group(group_id).is_none() {
                return Err(StorageError::invalid_group(group_id.as_str()));
            }
        }

        let Some(entry) = self.entries.iter_mut().find(|e| &e.id == entry_id) else {
            return Ok(false);
        };

        entry.group_id = group;
        self.save_entries().await?;
        Ok(true)
    }

    async fn save_entries(&self) -> StorageResult<()> {
        let document = serde_json::to_string(&self.entries)?;
        self.store.save(VIDEOS_KEY, &document).await
    }

    async fn save_groups(&self) -> StorageResult<()> {
        let document = serde_json::to_string(&self.groups)?;
        self.store.save(GROUPS_KEY, &document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FileStore;
    use vidsmart_models::{AnalysisResult, SourceKind};

    fn entry(title: &str) -> CatalogEntry {
        CatalogEntry::new(
            SourceKind::RemoteUrl,
            AnalysisResult {
                title: title.to_string(),
                description: format!("ملخص {}", title),
                full_analysis: "تحليل".to_string(),
            },
            "",
            Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
        )
    }

    async fn open_catalog(dir: &tempfile::TempDir) -> Catalog<FileStore> {
        Catalog::open(FileStore::new(dir.path())).await.unwrap()
    }

    #[tokio::test]
    async fn test_fresh_catalog_seeds_default_groups() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = open_catalog(&dir).await;

        assert!(catalog.entries().is_empty());
        assert_eq!(catalog.groups().len(), 2);

        // Seed is persisted, not just in memory
        let reopened = open_catalog(&dir).await;
        assert_eq!(reopened.groups().len(), 2);
    }

    #[tokio::test]
    async fn test_add_prepends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir).await;

        catalog.add_entry(entry("أول")).await.unwrap();
        catalog.add_entry(entry("ثاني")).await.unwrap();

        assert_eq!(catalog.entries()[0].title, "ثاني");
        assert_eq!(catalog.entries()[1].title, "أول");

        let reopened = open_catalog(&dir).await;
        assert_eq!(reopened.entries().len(), 2);
        assert_eq!(reopened.entries()[0].title, "ثاني");
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_preserving_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir).await;

        catalog.add_entry(entry("a")).await.unwrap();
        catalog.add_entry(entry("b")).await.unwrap();
        catalog.add_entry(entry("c")).await.unwrap();

        let middle = catalog.entries()[1].id.clone();
        assert!(catalog.delete_entry(&middle).await.unwrap());

        let titles: Vec<_> = catalog.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a"]);

        let reopened = open_catalog(&dir).await;
        let titles: Vec<_> = reopened.entries().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir).await;

        catalog.add_entry(entry("a")).await.unwrap();
        assert!(!catalog.delete_entry(&EntryId::from("missing")).await.unwrap());
        assert_eq!(catalog.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_create_group_and_assign() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir).await;

        let group = catalog.create_group("مفضلة").await.unwrap();
        catalog.add_entry(entry("a")).await.unwrap();
        let id = catalog.entries()[0].id.clone();

        assert!(catalog.assign_group(&id, Some(group.id.clone())).await.unwrap());
        assert_eq!(catalog.entries()[0].group_id, Some(group.id.clone()));

        let filter = EntryFilter {
            group: Some(group.id),
            search: None,
        };
        assert_eq!(catalog.filtered(&filter).len(), 1);
    }

    #[tokio::test]
    async fn test_create_group_rejects_blank_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir).await;

        assert!(matches!(
            catalog.create_group("   ").await,
            Err(StorageError::EmptyGroupName)
        ));
    }

    #[tokio::test]
    async fn test_assign_unknown_group_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir).await;

        catalog.add_entry(entry("a")).await.unwrap();
        let id = catalog.entries()[0].id.clone();

        assert!(matches!(
            catalog.assign_group(&id, Some(GroupId::from("nope"))).await,
            Err(StorageError::InvalidGroup(_))
        ));
    }

    #[tokio::test]
    async fn test_add_entry_with_unknown_group_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir).await;

        let bad = entry("a").with_group(Some(GroupId::from("nope")));
        assert!(matches!(
            catalog.add_entry(bad).await,
            Err(StorageError::InvalidGroup(_))
        ));
        assert!(catalog.entries().is_empty());
    }

    #[tokio::test]
    async fn test_search_filter_matches_title_and_description() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = open_catalog(&dir).await;

        catalog.add_entry(entry("Rust Tutorial")).await.unwrap();
        catalog.add_entry(entry("Cooking Show")).await.unwrap();

        let filter = EntryFilter {
            group: None,
            search: Some("rust".to_string()),
        };
        let hits = catalog.filtered(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Rust Tutorial");

        // Description matches too
        let filter = EntryFilter {
            group: None,
            search: Some("ملخص cooking".to_string()),
        };
        assert_eq!(catalog.filtered(&filter).len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_document_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save(VIDEOS_KEY, "{not json").await.unwrap();
        store.save(GROUPS_KEY, "also not json").await.unwrap();

        let catalog = Catalog::open(store).await.unwrap();
        assert!(catalog.entries().is_empty());
        assert!(catalog.groups().is_empty());
    }
}

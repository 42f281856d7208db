//! Catalog entry and group models.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::analysis::AnalysisResult;

/// Unique identifier for a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generate a new random entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a group (playlist).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct GroupId(pub String);

impl GroupId {
    /// Generate a new random group ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Where a catalog entry's video came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Uploaded local video file
    LocalFile,
    /// External video URL (YouTube or generic)
    RemoteUrl,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::LocalFile => "local_file",
            SourceKind::RemoteUrl => "remote_url",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One analyzed video stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogEntry {
    /// Unique entry ID
    pub id: EntryId,

    /// Source of the video
    pub source: SourceKind,

    /// AI-generated title
    pub title: String,

    /// AI-generated brief summary
    pub description: String,

    /// AI-generated detailed analysis
    pub full_analysis: String,

    /// Displayable image reference (data URI or remote URL); empty when no
    /// visual signal was available
    #[serde(default)]
    pub thumbnail: String,

    /// Original video URL, present only for remote entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,

    /// Owning group; `None` means ungrouped
    #[serde(default)]
    pub group_id: Option<GroupId>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl CatalogEntry {
    /// Create a new entry from an analysis result.
    ///
    /// The three analysis text fields are guaranteed non-empty afterwards;
    /// blank fields are replaced with placeholder text.
    pub fn new(
        source: SourceKind,
        analysis: AnalysisResult,
        thumbnail: impl Into<String>,
        remote_url: Option<String>,
    ) -> Self {
        let analysis = analysis.with_fallbacks();

        Self {
            id: EntryId::new(),
            source,
            title: analysis.title,
            description: analysis.description,
            full_analysis: analysis.full_analysis,
            thumbnail: thumbnail.into(),
            remote_url,
            group_id: None,
            created_at: Utc::now(),
        }
    }

    /// Assign the entry to a group (or clear the assignment).
    pub fn with_group(mut self, group_id: Option<GroupId>) -> Self {
        self.group_id = group_id;
        self
    }
}

/// A user-named bucket (playlist) that entries may belong to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Group {
    /// Unique group ID
    pub id: GroupId,

    /// Display name, non-empty
    pub name: String,
}

impl Group {
    /// Create a new group with a fresh ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            title: "عنوان".to_string(),
            description: "ملخص".to_string(),
            full_analysis: "تحليل".to_string(),
        }
    }

    #[test]
    fn test_entry_id_generation() {
        let id1 = EntryId::new();
        let id2 = EntryId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_entry_creation() {
        let entry = CatalogEntry::new(
            SourceKind::RemoteUrl,
            analysis(),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
            Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
        );

        assert_eq!(entry.source, SourceKind::RemoteUrl);
        assert_eq!(entry.title, "عنوان");
        assert!(entry.group_id.is_none());
        assert!(entry.remote_url.is_some());
    }

    #[test]
    fn test_entry_blank_fields_get_placeholders() {
        let entry = CatalogEntry::new(
            SourceKind::LocalFile,
            AnalysisResult {
                title: String::new(),
                description: "  ".to_string(),
                full_analysis: String::new(),
            },
            "",
            None,
        );

        assert!(!entry.title.is_empty());
        assert!(!entry.description.trim().is_empty());
        assert!(!entry.full_analysis.is_empty());
    }

    #[test]
    fn test_entry_serde_roundtrip() {
        let entry = CatalogEntry::new(SourceKind::LocalFile, analysis(), "data:image/jpeg;base64,abc", None)
            .with_group(Some(GroupId::from("g1")));

        let json = serde_json::to_string(&entry).unwrap();
        let back: CatalogEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, entry.id);
        assert_eq!(back.group_id, Some(GroupId::from("g1")));
        assert_eq!(back.thumbnail, entry.thumbnail);
    }

    #[test]
    fn test_local_entry_omits_remote_url() {
        let entry = CatalogEntry::new(SourceKind::LocalFile, analysis(), "", None);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("remote_url"));
    }
}

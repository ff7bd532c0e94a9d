//! Flat records as returned by the Canvas REST API.

use serde::{Deserialize, Serialize};

use cyclops_core::types::{CourseId, FileId, FolderId};

/// A course, as returned by `GET /api/v1/courses/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course ID.
    pub id: CourseId,
    /// Course name.
    pub name: String,
    /// Short course code.
    #[serde(default)]
    pub course_code: Option<String>,
}

/// A folder in a course's file area.
///
/// Exactly one folder per course has no parent: the course root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder, `None` for the course root.
    #[serde(default)]
    pub parent_folder_id: Option<FolderId>,
}

impl FolderRecord {
    /// Create a folder record.
    pub fn new(id: u64, name: impl Into<String>, parent_folder_id: Option<u64>) -> Self {
        Self {
            id: FolderId::new(id),
            name: name.into(),
            parent_folder_id: parent_folder_id.map(FolderId::new),
        }
    }

    /// Whether this is the course root folder.
    pub fn is_root(&self) -> bool {
        self.parent_folder_id.is_none()
    }
}

/// A file in a course's file area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File ID.
    pub id: FileId,
    /// Name shown to users.
    #[serde(rename = "display_name")]
    pub name: String,
    /// Name the file is stored under.
    pub filename: String,
    /// Folder containing the file.
    #[serde(rename = "folder_id")]
    pub parent_folder_id: FolderId,
    /// MIME type reported by the LMS.
    #[serde(rename = "content-type", default)]
    pub content_type: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    /// Authenticated download URL (only populated by single-file lookups
    /// and listings made with a token allowed to download).
    #[serde(default)]
    pub url: Option<String>,
}

impl FileRecord {
    /// Create a file record with no download metadata.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        filename: impl Into<String>,
        parent_folder_id: u64,
    ) -> Self {
        Self {
            id: FileId::new(id),
            name: name.into(),
            filename: filename.into(),
            parent_folder_id: FolderId::new(parent_folder_id),
            content_type: None,
            size: None,
            url: None,
        }
    }
}

//! Folder tree assembled from flat LMS records.

use serde::{Deserialize, Serialize};

use super::record::{FileRecord, FolderRecord};

/// A folder together with its nested children.
///
/// Each node exclusively owns its children; a tree is built per request
/// and discarded after rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// The folder this node represents.
    pub folder: FolderRecord,
    /// Child folders, in input order.
    pub child_folders: Vec<FolderNode>,
    /// Files directly inside this folder, in input order.
    pub child_files: Vec<FileRecord>,
}

impl FolderNode {
    /// Create a node with no children.
    pub fn leaf(folder: FolderRecord) -> Self {
        Self {
            folder,
            child_folders: Vec::new(),
            child_files: Vec::new(),
        }
    }

    /// Folder name.
    pub fn name(&self) -> &str {
        &self.folder.name
    }

    /// Whether the folder holds neither folders nor files.
    pub fn is_empty(&self) -> bool {
        self.child_folders.is_empty() && self.child_files.is_empty()
    }

    /// Number of folders in this subtree, including this one.
    pub fn folder_count(&self) -> usize {
        1 + self
            .child_folders
            .iter()
            .map(FolderNode::folder_count)
            .sum::<usize>()
    }

    /// Number of files in this subtree.
    pub fn file_count(&self) -> usize {
        self.child_files.len()
            + self
                .child_folders
                .iter()
                .map(FolderNode::file_count)
                .sum::<usize>()
    }
}

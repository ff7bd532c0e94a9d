//! Assembles flat LMS folder and file listings into a rooted tree.

use std::collections::HashMap;

use thiserror::Error;

use cyclops_core::error::{AppError, ErrorKind};
use cyclops_core::types::{FileId, FolderId};
use cyclops_entity::lms::{FileRecord, FolderNode, FolderRecord};

/// The folder listing does not describe a single rooted tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedTreeError {
    /// No folder without a parent.
    #[error("The course has no root folder")]
    NoRoot,

    /// Several folders without a parent.
    #[error("The course has more than one root folder ({first} and {second})")]
    MultipleRoots {
        /// First root encountered.
        first: FolderId,
        /// Second root encountered.
        second: FolderId,
    },

    /// Two folder records share an ID.
    #[error("Folder {0} is listed more than once")]
    DuplicateFolder(FolderId),

    /// A folder's parent is not in the listing.
    #[error("Folder {folder} has unknown parent folder {parent}")]
    DanglingFolderParent {
        /// The orphaned folder.
        folder: FolderId,
        /// The missing parent.
        parent: FolderId,
    },

    /// A file's folder is not in the listing.
    #[error("File {file} is in unknown folder {parent}")]
    DanglingFileParent {
        /// The orphaned file.
        file: FileId,
        /// The missing folder.
        parent: FolderId,
    },

    /// A folder whose parent chain never reaches the root.
    #[error("Folder {0} cannot be reached from the root folder")]
    Unreachable(FolderId),
}

impl From<MalformedTreeError> for AppError {
    fn from(err: MalformedTreeError) -> Self {
        AppError::with_source(
            ErrorKind::ExternalService,
            format!("Unable to list course files: {err}"),
            err,
        )
    }
}

/// Build the course tree.
///
/// Child folders and files keep the order they have in the input.
pub fn build_tree(
    folders: Vec<FolderRecord>,
    files: Vec<FileRecord>,
) -> Result<FolderNode, MalformedTreeError> {
    let mut index: HashMap<FolderId, usize> = HashMap::with_capacity(folders.len());
    let mut root: Option<usize> = None;

    for (position, folder) in folders.iter().enumerate() {
        if index.insert(folder.id, position).is_some() {
            return Err(MalformedTreeError::DuplicateFolder(folder.id));
        }
        if folder.is_root() {
            if let Some(first) = root {
                return Err(MalformedTreeError::MultipleRoots {
                    first: folders[first].id,
                    second: folder.id,
                });
            }
            root = Some(position);
        }
    }
    let root = root.ok_or(MalformedTreeError::NoRoot)?;

    let mut child_folders: HashMap<FolderId, Vec<usize>> = HashMap::new();
    for (position, folder) in folders.iter().enumerate() {
        if let Some(parent) = folder.parent_folder_id {
            if !index.contains_key(&parent) {
                return Err(MalformedTreeError::DanglingFolderParent {
                    folder: folder.id,
                    parent,
                });
            }
            child_folders.entry(parent).or_default().push(position);
        }
    }

    let mut child_files: HashMap<FolderId, Vec<FileRecord>> = HashMap::new();
    for file in files {
        if !index.contains_key(&file.parent_folder_id) {
            return Err(MalformedTreeError::DanglingFileParent {
                file: file.id,
                parent: file.parent_folder_id,
            });
        }
        child_files.entry(file.parent_folder_id).or_default().push(file);
    }

    let mut assembler = Assembler {
        slots: folders.into_iter().map(Some).collect(),
        child_folders,
        child_files,
    };
    let tree = assembler.node(root).ok_or(MalformedTreeError::NoRoot)?;

    // Anything left over sits on a parent cycle.
    if let Some(stray) = assembler.slots.iter().flatten().next() {
        return Err(MalformedTreeError::Unreachable(stray.id));
    }

    Ok(tree)
}

struct Assembler {
    slots: Vec<Option<FolderRecord>>,
    child_folders: HashMap<FolderId, Vec<usize>>,
    child_files: HashMap<FolderId, Vec<FileRecord>>,
}

impl Assembler {
    fn node(&mut self, position: usize) -> Option<FolderNode> {
        let folder = self.slots.get_mut(position)?.take()?;
        let children = self.child_folders.remove(&folder.id).unwrap_or_default();
        let child_files = self.child_files.remove(&folder.id).unwrap_or_default();
        let child_folders = children
            .into_iter()
            .filter_map(|child| self.node(child))
            .collect();

        Some(FolderNode {
            folder,
            child_folders,
            child_files,
        })
    }
}

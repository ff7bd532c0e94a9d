//! Image directory store.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use cyclops_core::error::{AppError, ErrorKind};
use cyclops_core::result::AppResult;

use crate::filename::sanitize_filename;

/// Directory of images awaiting recognition.
///
/// Every method takes a raw filename and sanitizes it, so callers can pass
/// names straight from requests or LMS records. [`ImageStore::scoped`]
/// gives each launch its own subdirectory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Open the store, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create image directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The directory images are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store rooted at a subdirectory named after `scope`.
    ///
    /// The subdirectory is created on the first save.
    pub fn scoped(&self, scope: &str) -> AppResult<Self> {
        let dir = sanitize_filename(scope)
            .ok_or_else(|| AppError::validation(format!("Invalid image scope: '{scope}'")))?;
        Ok(Self {
            root: self.root.join(dir),
        })
    }

    /// Sanitize a filename, rejecting names with nothing usable left.
    pub fn stored_name(&self, filename: &str) -> AppResult<String> {
        sanitize_filename(filename)
            .ok_or_else(|| AppError::validation(format!("Invalid filename: '{filename}'")))
    }

    /// Absolute path of an image.
    pub fn path(&self, filename: &str) -> AppResult<PathBuf> {
        Ok(self.root.join(self.stored_name(filename)?))
    }

    /// Write an image, returning the sanitized name it was stored under.
    pub async fn save(&self, filename: &str, data: Bytes) -> AppResult<String> {
        let name = self.stored_name(filename)?;
        let path = self.root.join(&name);

        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create image directory: {}", self.root.display()),
                e,
            )
        })?;
        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write image: {name}"),
                e,
            )
        })?;

        debug!(filename = %name, bytes = data.len(), "Saved image");
        Ok(name)
    }

    /// Read an image.
    pub async fn read(&self, filename: &str) -> AppResult<Bytes> {
        let path = self.path(filename)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Image not found: {filename}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read image: {filename}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    /// Whether an image exists.
    pub async fn exists(&self, filename: &str) -> AppResult<bool> {
        let path = self.path(filename)?;
        fs::try_exists(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat image: {filename}"),
                e,
            )
        })
    }

    /// Delete an image. Deleting a missing image is not an error.
    pub async fn delete(&self, filename: &str) -> AppResult<()> {
        let path = self.path(filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(filename, "Deleted image");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete image: {filename}"),
                e,
            )),
        }
    }

    /// Remove the store's directory if nothing is left in it.
    pub async fn remove_if_empty(&self) {
        match fs::remove_dir(&self.root).await {
            Ok(()) => debug!(dir = %self.root.display(), "Removed empty image directory"),
            Err(e) => debug!(dir = %self.root.display(), error = %e, "Image directory kept"),
        }
    }

    /// Check that the directory is still usable.
    pub async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }
}

//! Uploaded and LMS-hosted images.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use cyclops_core::error::AppError;
use cyclops_core::result::AppResult;
use cyclops_core::types::FileId;
use cyclops_entity::launch::LaunchContext;
use cyclops_lms::CanvasClient;
use cyclops_storage::ImageStore;

/// `fileid` value marking an image that was uploaded rather than picked.
pub const UPLOAD_FILE_ID: &str = "upload";

/// Saves images into the [`ImageStore`] ahead of recognition.
#[derive(Debug, Clone)]
pub struct ImageService {
    lms: Arc<CanvasClient>,
    store: ImageStore,
}

impl ImageService {
    /// Create the service.
    pub fn new(lms: Arc<CanvasClient>, store: ImageStore) -> Self {
        Self { lms, store }
    }

    /// Images belonging to one launch.
    pub fn launch_store(&self, launch: &LaunchContext) -> AppResult<ImageStore> {
        self.store.scoped(&launch.launch_id)
    }

    /// Save an uploaded image for the launch. Returns the name it was
    /// stored under.
    pub async fn upload(
        &self,
        launch: &LaunchContext,
        filename: &str,
        data: Bytes,
    ) -> AppResult<String> {
        if data.is_empty() {
            return Err(AppError::validation("The uploaded file is empty"));
        }
        let name = self.launch_store(launch)?.save(filename, data).await?;
        info!(launch_id = %launch.launch_id, filename = %name, "Image uploaded");
        Ok(name)
    }

    /// Make the selected image available locally.
    ///
    /// Images uploaded during this launch are already in its store.
    /// Anything else is looked up in the launch's course and downloaded.
    /// Returns the stored name.
    pub async fn load(
        &self,
        launch: &LaunchContext,
        filename: &str,
        file_id: &str,
    ) -> AppResult<String> {
        let store = self.launch_store(launch)?;
        if file_id == UPLOAD_FILE_ID {
            let name = store.stored_name(filename)?;
            if !store.exists(&name).await? {
                return Err(AppError::not_found(format!("Image not found: {name}")));
            }
            return Ok(name);
        }

        let file_id: FileId = file_id
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid file id: '{file_id}'")))?;
        let course_id = launch
            .course_id
            .ok_or_else(|| AppError::validation("The launch does not identify a course"))?;

        let (file, data) = self.lms.download_file(course_id, file_id).await?;
        let name = store.save(filename, data).await?;

        info!(launch_id = %launch.launch_id, %course_id, %file_id, lms_name = %file.name, filename = %name, "Image loaded from LMS");
        Ok(name)
    }
}

//! File picker use case.

use std::sync::Arc;

use tracing::info;

use cyclops_core::error::AppError;
use cyclops_core::result::AppResult;
use cyclops_core::types::CourseId;
use cyclops_entity::launch::LaunchContext;
use cyclops_entity::lms::{Course, FolderNode};
use cyclops_lms::CanvasClient;

use super::render::TreeRenderer;
use super::tree::build_tree;

/// A rendered picker for one course.
#[derive(Debug, Clone)]
pub struct Picker {
    /// The course the files belong to.
    pub course: Course,
    /// Tree markup.
    pub markup: String,
}

/// Fetches a course's folders and image files and renders them as a tree.
#[derive(Debug, Clone)]
pub struct PickerService {
    lms: Arc<CanvasClient>,
    load_path: String,
}

impl PickerService {
    /// Create the service. File links target `load_path`.
    pub fn new(lms: Arc<CanvasClient>, load_path: impl Into<String>) -> Self {
        Self {
            lms,
            load_path: load_path.into(),
        }
    }

    /// Fetch and assemble the tree of a course.
    pub async fn course_tree(&self, course_id: CourseId) -> AppResult<(Course, FolderNode)> {
        let (course, folders, files) = tokio::try_join!(
            self.lms.get_course(course_id),
            self.lms.list_folders(course_id),
            self.lms.list_image_files(course_id),
        )?;

        let (folder_count, file_count) = (folders.len(), files.len());
        let tree = build_tree(folders, files)?;

        info!(%course_id, folder_count, file_count, "Built course file tree");
        Ok((course, tree))
    }

    /// Build the picker for the course a launch came from.
    pub async fn picker(&self, launch: &LaunchContext) -> AppResult<Picker> {
        let course_id = launch
            .course_id
            .ok_or_else(|| AppError::validation("The launch does not identify a course"))?;

        let (course, tree) = self.course_tree(course_id).await?;
        let markup = TreeRenderer::new(&self.load_path, &launch.launch_id).render(&tree);

        Ok(Picker { course, markup })
    }
}

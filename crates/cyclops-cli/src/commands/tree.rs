//! Print the file picker of a course.

use std::sync::Arc;

use clap::Args;

use cyclops_core::error::AppError;
use cyclops_core::types::CourseId;
use cyclops_lms::CanvasClient;
use cyclops_service::{PickerService, TreeRenderer};

use crate::output;

/// Arguments for the tree command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Course to list
    pub course_id: u64,

    /// Launch ID to embed in the file links
    #[arg(long, default_value = "cli")]
    pub launch_id: String,
}

/// Execute the tree command
pub async fn execute(args: &TreeArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let load_path = config.server.route_path("load/");

    let lms = Arc::new(CanvasClient::new(&config.lms)?);
    let picker = PickerService::new(lms, load_path.clone());

    let (course, tree) = picker.course_tree(CourseId::new(args.course_id)).await?;

    output::print_kv("Course", &course.name);
    output::print_kv("Folders", &tree.folder_count().to_string());
    output::print_kv("Files", &tree.file_count().to_string());
    println!();
    println!("{}", TreeRenderer::new(&load_path, &args.launch_id).render(&tree));
    Ok(())
}

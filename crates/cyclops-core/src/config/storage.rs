//! Temporary image storage configuration.

use serde::{Deserialize, Serialize};

/// Where selected and uploaded images are kept until recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding images awaiting recognition.
    #[serde(default = "default_image_dir")]
    pub image_dir: String,
    /// Maximum accepted upload size in bytes (default 20 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            image_dir: default_image_dir(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_image_dir() -> String {
    "data/images".to_string()
}

fn default_max_upload() -> u64 {
    20 * 1024 * 1024
}

//! OCR engine configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external OCR engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Executable to invoke.
    #[serde(default = "default_command")]
    pub command: String,
    /// Recognition language(s), e.g. `"eng"` or `"eng+deu"`.
    #[serde(default = "default_language")]
    pub language: String,
    /// Argument template. `{input}` is replaced with the image path and
    /// `{lang}` with the language.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    /// Extra arguments appended after the template.
    #[serde(default)]
    pub extra_args: Vec<String>,
    /// Process timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Expose the `/test/` debugging route.
    #[serde(default)]
    pub enable_test_route: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            language: default_language(),
            args: default_args(),
            extra_args: Vec::new(),
            timeout_seconds: default_timeout(),
            enable_test_route: false,
        }
    }
}

fn default_command() -> String {
    "tesseract".to_string()
}

fn default_args() -> Vec<String> {
    ["{input}", "stdout", "-l", "{lang}"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_timeout() -> u64 {
    60
}

//! Tesseract process execution.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{error, info};

use cyclops_core::config::OcrConfig;
use cyclops_core::result::AppResult;
use cyclops_core::traits::ocr::OcrEngine;

use crate::error::OcrError;
use crate::prepare::prepare_image;

/// OCR engine that shells out to `tesseract` (or a compatible command).
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    /// Create an engine from configuration.
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Substitute `{input}` and `{lang}` in the argument template.
    pub fn build_args(&self, input: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        self.config
            .args
            .iter()
            .map(|arg| {
                arg.replace("{input}", &input)
                    .replace("{lang}", &self.config.language)
            })
            .chain(self.config.extra_args.iter().cloned())
            .collect()
    }

    /// Prepare the image and run the OCR process on it.
    pub async fn run(&self, path: &Path) -> Result<String, OcrError> {
        let source: PathBuf = path.to_path_buf();
        let prepared = tokio::task::spawn_blocking(move || prepare_image(&source))
            .await
            .map_err(|e| OcrError::Task(e.to_string()))??;

        let args = self.build_args(prepared.path());
        let started = Instant::now();

        let mut cmd = Command::new(&self.config.command);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let timeout = Duration::from_secs(self.config.timeout_seconds);
        let output = match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OcrError::CommandNotFound(self.config.command.clone()));
            }
            Ok(Err(e)) => return Err(OcrError::Io(e)),
            Err(_) => {
                error!(
                    command = %self.config.command,
                    timeout_seconds = self.config.timeout_seconds,
                    "OCR process timed out"
                );
                return Err(OcrError::Timeout(self.config.timeout_seconds));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = output.status.code().unwrap_or(-1);
            error!(
                command = %self.config.command,
                code,
                stderr = %stderr.chars().take(500).collect::<String>(),
                "OCR process failed"
            );
            return Err(OcrError::ProcessFailed {
                code,
                stderr: stderr.chars().take(2000).collect(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout)
            .trim_end_matches(['\u{c}', '\n', '\r', ' '])
            .to_string();

        info!(
            image = %path.display(),
            converted = prepared.is_converted(),
            chars = text.chars().count(),
            duration_ms = started.elapsed().as_millis() as u64,
            "OCR completed"
        );

        Ok(text)
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        &self.config.command
    }

    async fn recognize(&self, path: &Path) -> AppResult<String> {
        Ok(self.run(path).await?)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let status = Command::new(&self.config.command)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;
        Ok(matches!(status, Ok(s) if s.success()))
    }
}

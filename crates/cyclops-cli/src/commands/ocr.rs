//! Run OCR on a local image.

use std::path::PathBuf;

use clap::Args;

use cyclops_core::error::AppError;
use cyclops_ocr::TesseractEngine;

/// Arguments for the ocr command
#[derive(Debug, Args)]
pub struct OcrArgs {
    /// Image to recognize
    pub path: PathBuf,

    /// Override the recognition language, e.g. `eng+deu`
    #[arg(short, long)]
    pub language: Option<String>,
}

/// Execute the ocr command
pub async fn execute(args: &OcrArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;
    if let Some(ref language) = args.language {
        config.ocr.language = language.clone();
    }

    if !args.path.is_file() {
        return Err(AppError::not_found(format!(
            "'{}' is not a file",
            args.path.display()
        )));
    }

    let engine = TesseractEngine::new(config.ocr);
    let text = engine.run(&args.path).await?;
    println!("{}", text.trim_end());
    Ok(())
}

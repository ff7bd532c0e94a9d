//! Runs OCR on a stored image and returns the text to the platform.

use std::sync::Arc;

use tracing::{info, warn};

use cyclops_core::error::AppError;
use cyclops_core::html::escape;
use cyclops_core::result::AppResult;
use cyclops_core::traits::OcrEngine;
use cyclops_entity::launch::LaunchContext;
use cyclops_lti::{DeepLinkResource, DeepLinkResponder, RegistrationStore};
use cyclops_storage::ImageStore;

/// Title of the content item carrying the recognized text.
const CONTENT_TITLE: &str = "file";

/// Recognizes images and wraps the text in a deep-linking response.
#[derive(Debug, Clone)]
pub struct EmbedService {
    ocr: Arc<dyn OcrEngine>,
    store: ImageStore,
    registrations: Arc<dyn RegistrationStore>,
    responder: DeepLinkResponder,
}

impl EmbedService {
    /// Create the service.
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        store: ImageStore,
        registrations: Arc<dyn RegistrationStore>,
        responder: DeepLinkResponder,
    ) -> Self {
        Self {
            ocr,
            store,
            registrations,
            responder,
        }
    }

    /// Recognize an image placed directly in the image directory, leaving
    /// it in place. Launch images live in per-launch subdirectories and are
    /// not reachable here.
    pub async fn recognize(&self, filename: &str) -> AppResult<String> {
        self.recognize_in(&self.store, filename).await
    }

    async fn recognize_in(&self, store: &ImageStore, filename: &str) -> AppResult<String> {
        let path = store.path(filename)?;
        if !store.exists(filename).await? {
            return Err(AppError::not_found(format!("Image not found: {filename}")));
        }
        let text = self.ocr.recognize(&path).await?;
        info!(engine = self.ocr.name(), filename, chars = text.len(), "Image recognized");
        Ok(text)
    }

    /// Recognize an image stored for the launch, delete it, and build the
    /// auto-submitting deep-linking response form.
    pub async fn embed(&self, launch: &LaunchContext, filename: &str) -> AppResult<String> {
        let store = self.store.scoped(&launch.launch_id)?;
        let recognized = self.recognize_in(&store, filename).await;
        if let Err(e) = store.delete(filename).await {
            warn!(filename, error = %e, "Failed to delete recognized image");
        }
        store.remove_if_empty().await;
        let text = recognized?;

        let registration = self
            .registrations
            .find_registration_by_id(launch.registration_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "LTI registration {} no longer exists",
                    launch.registration_id
                ))
            })?;

        self.responder.respond(
            &registration,
            launch,
            vec![DeepLinkResource::html(CONTENT_TITLE, escape(&text))],
        )
    }
}

//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use cyclops_cache::CacheManager;
use cyclops_core::config::AppConfig;
use cyclops_core::result::AppResult;
use cyclops_core::traits::OcrEngine;
use cyclops_lms::CanvasClient;
use cyclops_lti::{
    DeepLinkResponder, LaunchValidator, OidcLogin, PlatformKeys, RegistrationStore,
};
use cyclops_service::{EmbedService, ImageService, LaunchStore, PickerService};
use cyclops_storage::ImageStore;

use crate::paths::RoutePaths;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped or cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Public route paths
    pub paths: Arc<RoutePaths>,

    // ── Infrastructure ───────────────────────────────────────
    /// Cache manager (Redis or in-memory)
    pub cache: CacheManager,
    /// Platform registrations
    pub registrations: Arc<dyn RegistrationStore>,
    /// OCR engine
    pub ocr: Arc<dyn OcrEngine>,
    /// Image directory
    pub images_dir: ImageStore,

    // ── LTI ──────────────────────────────────────────────────
    /// OIDC login initiation
    pub login: Arc<OidcLogin>,
    /// Launch validation
    pub launch_validator: Arc<LaunchValidator>,

    // ── Services ─────────────────────────────────────────────
    /// Launch continuity
    pub launches: Arc<LaunchStore>,
    /// Course file picker
    pub picker: Arc<PickerService>,
    /// Image upload and download
    pub images: Arc<ImageService>,
    /// Recognition and deep-linking response
    pub embed: Arc<EmbedService>,
}

impl AppState {
    /// Wire every service from the configuration and the injected
    /// infrastructure.
    pub async fn new(
        config: AppConfig,
        cache: CacheManager,
        registrations: Arc<dyn RegistrationStore>,
        ocr: Arc<dyn OcrEngine>,
    ) -> AppResult<Self> {
        let paths = RoutePaths::new(&config.server);
        let lms = Arc::new(CanvasClient::new(&config.lms)?);
        let images_dir = ImageStore::new(&config.storage.image_dir).await?;

        let login = OidcLogin::new(Arc::clone(&registrations), cache.clone(), &config.lti);
        let keys = PlatformKeys::new(cache.clone(), &config.lti)?;
        let launch_validator = LaunchValidator::new(
            Arc::clone(&registrations),
            login.clone(),
            keys,
            &config.lti,
        );

        let launches = LaunchStore::new(cache.clone(), &config.lti);
        let picker = PickerService::new(Arc::clone(&lms), paths.load.clone());
        let images = ImageService::new(Arc::clone(&lms), images_dir.clone());
        let embed = EmbedService::new(
            Arc::clone(&ocr),
            images_dir.clone(),
            Arc::clone(&registrations),
            DeepLinkResponder::new(&config.lti),
        );

        Ok(Self {
            config: Arc::new(config),
            paths: Arc::new(paths),
            cache,
            registrations,
            ocr,
            images_dir,
            login: Arc::new(login),
            launch_validator: Arc::new(launch_validator),
            launches: Arc::new(launches),
            picker: Arc::new(picker),
            images: Arc::new(images),
            embed: Arc::new(embed),
        })
    }
}

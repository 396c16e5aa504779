//! App Core for the translator.
//!
//! Central struct wiring config, durable storage, the translation API client,
//! clipboard and renderer into one [`InputCoordinator`].

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::database::{Database, DurableStorage};
use crate::managers::history_store::HistoryStore;
use crate::managers::input_coordinator::InputCoordinator;
use crate::services::clipboard::ClipboardAccess;
use crate::services::renderer::Renderer;
use crate::services::translation_api::{HttpTranslationApi, TranslationApi};
use crate::types::config::ClientConfig;
use crate::types::errors::{AppError, StorageError};

/// Central application struct.
pub struct App {
    pub config: ClientConfig,
    pub coordinator: InputCoordinator,
}

impl App {
    /// Creates the App from `config`: opens the SQLite storage, restores the
    /// stored session and builds the HTTP client.
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        let storage_path = config.resolved_storage_path();
        let db = Database::open(&storage_path).map_err(StorageError::from)?;
        info!("Local storage at {}", storage_path);

        let api = HttpTranslationApi::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(Self::with_parts(
            config,
            Box::new(db),
            Arc::new(api),
            default_clipboard(),
            default_renderer(),
        ))
    }

    /// Creates the App from explicit collaborators.
    pub fn with_parts(
        config: ClientConfig,
        storage: Box<dyn DurableStorage>,
        api: Arc<dyn TranslationApi>,
        clipboard: Arc<dyn ClipboardAccess>,
        renderer: Option<Arc<dyn Renderer>>,
    ) -> Self {
        let coordinator = InputCoordinator::new(
            HistoryStore::new(storage),
            api,
            clipboard,
            renderer,
            Duration::from_millis(config.quiet_period_ms),
        );
        Self {
            config,
            coordinator,
        }
    }

    /// Startup sequence: fetch the language list (falls back on failure).
    pub async fn startup(&self) {
        let languages = self.coordinator.load_languages().await;
        info!("{} languages available", languages.len());
    }

    /// Shutdown sequence: drop the pending debounce timer.
    pub fn shutdown(&self) {
        self.coordinator.cancel_pending();
    }
}

#[cfg(feature = "system-clipboard")]
fn default_clipboard() -> Arc<dyn ClipboardAccess> {
    Arc::new(crate::services::clipboard::SystemClipboard)
}

#[cfg(not(feature = "system-clipboard"))]
fn default_clipboard() -> Arc<dyn ClipboardAccess> {
    Arc::new(crate::services::clipboard::MemoryClipboard::new())
}

#[cfg(feature = "markdown")]
fn default_renderer() -> Option<Arc<dyn Renderer>> {
    Some(Arc::new(crate::services::renderer::MarkdownRenderer))
}

#[cfg(not(feature = "markdown"))]
fn default_renderer() -> Option<Arc<dyn Renderer>> {
    None
}

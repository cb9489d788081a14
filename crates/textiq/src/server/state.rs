//! Application state for the ingestion server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::TextIqConfig;
use crate::error::Result;
use crate::ingestion::{IngestPipeline, UploadValidator};
use crate::registry::{ContentStore, InMemoryContentRegistry};
use crate::storage::UploadStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: TextIqConfig,
    /// Upload directory and identifier index
    store: Arc<UploadStore>,
    /// Extracted text by file identifier
    registry: Arc<dyn ContentStore>,
    /// validate -> persist -> extract -> register
    pipeline: IngestPipeline,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create application state with an in-memory content registry
    pub fn new(config: TextIqConfig) -> Result<Self> {
        Self::with_registry(config, Arc::new(InMemoryContentRegistry::new()))
    }

    /// Create application state around a given content registry
    pub fn with_registry(config: TextIqConfig, registry: Arc<dyn ContentStore>) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let store = Arc::new(UploadStore::open(&config.upload.upload_dir)?);
        let validator = UploadValidator::from_config(&config.upload);
        tracing::info!(
            "Accepting {} up to {} bytes",
            validator.allowed_extensions().join(", "),
            validator.max_file_size()
        );

        let pipeline = IngestPipeline::new(validator, Arc::clone(&store), Arc::clone(&registry));
        tracing::info!("Content registry: {}", registry.name());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                registry,
                pipeline,
                ready: RwLock::new(true),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &TextIqConfig {
        &self.inner.config
    }

    /// Get upload store
    pub fn store(&self) -> &Arc<UploadStore> {
        &self.inner.store
    }

    /// Get content registry
    pub fn registry(&self) -> &Arc<dyn ContentStore> {
        &self.inner.registry
    }

    /// Get ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}

//! Ingestion pipeline orchestration
//!
//! validate -> persist -> extract -> register, deleting the stored file
//! when extraction fails.

use bytes::Bytes;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::registry::ContentStore;
use crate::storage::UploadStore;
use crate::types::{FileType, UploadedFile};

use super::parser::FileParser;
use super::validator::UploadValidator;

/// Result of a successful ingestion
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Stored file record
    pub file: UploadedFile,
    /// Full extracted text
    pub text: String,
}

impl IngestOutcome {
    /// File identifier
    pub fn id(&self) -> Uuid {
        self.file.id
    }

    /// Dotted lowercase extension
    pub fn extension(&self) -> &str {
        &self.file.extension
    }

    /// Stored size in bytes
    pub fn size(&self) -> u64 {
        self.file.size
    }
}

/// Main ingestion pipeline
pub struct IngestPipeline {
    validator: UploadValidator,
    store: Arc<UploadStore>,
    registry: Arc<dyn ContentStore>,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    pub fn new(
        validator: UploadValidator,
        store: Arc<UploadStore>,
        registry: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            validator,
            store,
            registry,
        }
    }

    /// Upload validator
    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    /// Ingest one uploaded file
    ///
    /// Validation and persistence failures abort with nothing to undo.
    /// Extraction failures remove the stored file before returning
    /// `ExtractionFailed`. A registry failure is logged and ignored.
    pub async fn ingest(
        &self,
        filename: &str,
        declared_size: u64,
        data: Bytes,
    ) -> Result<IngestOutcome> {
        let validated = self.validator.validate(filename, declared_size)?;
        self.validator.check_size(data.len() as u64)?;

        tracing::info!("Processing file upload: {} ({} bytes)", filename, data.len());

        let (id, path) = self.store.resolve(&validated.extension);
        self.persist(id, path.clone(), data.clone()).await?;
        tracing::info!("File saved: {}", path.display());

        let text = match self.extract(path.clone(), validated.file_type).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Text extraction failed for '{}': {}", filename, e);
                if let Err(cleanup) = self.store.remove(&id, &path).await {
                    tracing::warn!("Failed to clean up {}: {}", path.display(), cleanup);
                }
                return Err(Error::ExtractionFailed(e.to_string()));
            }
        };

        tracing::info!(
            "Extracted {} characters from '{}' ({})",
            text.chars().count(),
            filename,
            id
        );

        if let Err(e) = self.registry.put(id, text.clone()).await {
            tracing::warn!(
                "Failed to store content for {} in {} registry: {}",
                id,
                self.registry.name(),
                e
            );
        }

        Ok(IngestOutcome {
            file: UploadedFile {
                id,
                filename: filename.to_string(),
                file_type: validated.file_type,
                extension: validated.extension,
                size: data.len() as u64,
                path,
                content_hash: hash_content(&data),
                uploaded_at: chrono::Utc::now(),
            },
            text,
        })
    }

    async fn persist(&self, id: Uuid, path: PathBuf, data: Bytes) -> Result<()> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.persist(id, &path, &data))
            .await
            .map_err(|e| Error::persistence(format!("Task join error: {}", e)))?
    }

    async fn extract(&self, path: PathBuf, file_type: FileType) -> Result<String> {
        tokio::task::spawn_blocking(move || FileParser::extract_file(&path, file_type))
            .await
            .map_err(|e| Error::internal(format!("Task join error: {}", e)))?
    }
}

/// Hex SHA-256 of the uploaded bytes
fn hash_content(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

//! Content registry: extracted text kept for question answering
//!
//! The pipeline writes the full text of every successful extraction here;
//! the Q&A side reads it back by file identifier.

mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;

pub use memory::InMemoryContentRegistry;

/// Store mapping file identifiers to extracted text
///
/// Implementations:
/// - `InMemoryContentRegistry`: process-lifetime map, lost on restart
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Insert or replace the text for a file
    async fn put(&self, file_id: Uuid, text: String) -> Result<()>;

    /// Stored text, or `NotFound`
    async fn get(&self, file_id: &Uuid) -> Result<String>;

    /// Whether text is stored for a file
    async fn contains(&self, file_id: &Uuid) -> bool;

    /// Number of stored entries
    async fn len(&self) -> usize;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

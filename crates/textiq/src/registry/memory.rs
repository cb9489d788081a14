//! In-memory content registry

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::ContentStore;
use crate::error::{Error, Result};

/// Process-lifetime registry backed by a concurrent map
///
/// No eviction and no size bound. Entries are never removed.
#[derive(Default)]
pub struct InMemoryContentRegistry {
    entries: DashMap<Uuid, Arc<str>>,
}

impl InMemoryContentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentRegistry {
    async fn put(&self, file_id: Uuid, text: String) -> Result<()> {
        if self.entries.insert(file_id, Arc::from(text)).is_some() {
            tracing::debug!("Replaced stored content for {}", file_id);
        }
        Ok(())
    }

    async fn get(&self, file_id: &Uuid) -> Result<String> {
        self.entries
            .get(file_id)
            .map(|entry| entry.value().to_string())
            .ok_or_else(|| Error::not_found(format!("File content {}", file_id)))
    }

    async fn contains(&self, file_id: &Uuid) -> bool {
        self.entries.contains_key(file_id)
    }

    async fn len(&self) -> usize {
        self.entries.len()
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let registry = InMemoryContentRegistry::new();
        let id = Uuid::new_v4();

        registry.put(id, "Hello\n\nWorld".to_string()).await.unwrap();
        assert_eq!(registry.get(&id).await.unwrap(), "Hello\n\nWorld");
        assert!(registry.contains(&id).await);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let registry = InMemoryContentRegistry::new();
        let id = Uuid::new_v4();

        registry.put(id, "first".to_string()).await.unwrap();
        registry.put(id, "second".to_string()).await.unwrap();

        assert_eq!(registry.get(&id).await.unwrap(), "second");
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_is_not_found() {
        let registry = InMemoryContentRegistry::new();
        let result = registry.get(&Uuid::new_v4()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_and_readers() {
        let registry = Arc::new(InMemoryContentRegistry::new());
        let ids: Vec<Uuid> = (0..64).map(|_| Uuid::new_v4()).collect();

        let mut handles = Vec::new();
        for (i, id) in ids.iter().copied().enumerate() {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry.put(id, format!("text {}", i)).await.unwrap();
                registry.get(&id).await.unwrap()
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.await.unwrap(), format!("text {}", i));
        }
        assert_eq!(registry.len().await, ids.len());
    }
}

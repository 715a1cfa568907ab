//! Session-scoped result cache.
//!
//! Resolved synthesis responses are stored by `request_id` so that a result
//! page only needs the id. Each key is written once and read many times. The
//! cache is best-effort: a miss means "fetch it", never an error.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::SynthesisResponse;
use crate::error::{CacheError, CacheResult};

/// Key/value store of resolved responses.
///
/// Injected into the client so tests and alternative session backends can
/// replace the in-memory map.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Look up a response. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<SynthesisResponse>>;

    /// Store a response under `key`. Fails with [`CacheError::Occupied`] when
    /// the key already holds a value; the stored value is left untouched.
    async fn put(&self, key: &str, value: SynthesisResponse) -> CacheResult<()>;
}

/// In-memory cache living as long as the client session.
#[derive(Debug, Default)]
pub struct MemoryResultCache {
    entries: RwLock<HashMap<String, SynthesisResponse>>,
}

impl MemoryResultCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached responses.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry, ending the session.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        debug!(entries = entries.len(), "Clearing result cache");
        entries.clear();
    }
}

#[async_trait]
impl ResultCache for MemoryResultCache {
    async fn get(&self, key: &str) -> CacheResult<Option<SynthesisResponse>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: SynthesisResponse) -> CacheResult<()> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(key) {
            return Err(CacheError::Occupied {
                key: key.to_string(),
            });
        }
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoGenerator;
    use crate::api::SynthesisRequest;

    fn sample(seed: u64) -> SynthesisResponse {
        let mut generator = DemoGenerator::seeded(seed);
        generator.generate(&SynthesisRequest::new("homo_sapiens", "high bone density"))
    }

    #[tokio::test]
    async fn test_round_trip() {
        let cache = MemoryResultCache::new();
        let response = sample(1);
        let id = response.request_id.clone();

        cache.put(&id, response.clone()).await.unwrap();
        let cached = cache.get(&id).await.unwrap();
        assert_eq!(cached, Some(response));
    }

    #[tokio::test]
    async fn test_miss_is_not_an_error() {
        let cache = MemoryResultCache::new();
        assert!(cache.is_empty().await);
        assert_eq!(cache.get("unknown").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_once() {
        let cache = MemoryResultCache::new();
        let first = sample(1);
        let mut second = sample(2);
        second.request_id = first.request_id.clone();

        cache.put(&first.request_id, first.clone()).await.unwrap();
        let err = cache.put(&first.request_id, second).await.unwrap_err();
        assert!(matches!(err, CacheError::Occupied { .. }));

        let cached = cache.get(&first.request_id).await.unwrap();
        assert_eq!(cached, Some(first));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_ends_session() {
        let cache = MemoryResultCache::new();
        let response = sample(3);
        cache.put(&response.request_id, response.clone()).await.unwrap();

        cache.clear().await;
        assert!(cache.get(&response.request_id).await.unwrap().is_none());
    }
}

//! Process-wide TTL cache for the read-heavy aggregate endpoints.
//!
//! Entries are JSON values keyed by `operation:args`. Writes never
//! invalidate; an entry simply expires after the TTL. Concurrent readers
//! may race to populate the same key, last write wins.

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const MAX_ENTRIES: u64 = 1024;

pub struct ReadCache {
    inner: Cache<String, serde_json::Value>,
}

impl ReadCache {
    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    /// Fetch and decode an entry. A decode mismatch is treated as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.inner.get(key).await?;
        serde_json::from_value(value).ok()
    }

    /// Store an entry. Values that fail to serialize are skipped; the next
    /// reader recomputes.
    pub async fn put<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => self.inner.insert(key.to_string(), json).await,
            Err(err) => tracing::warn!("failed to cache entry {}: {}", key, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_typed_values() {
        let cache = ReadCache::new(Duration::from_secs(60));
        cache.put("airlines:list", &vec![1, 2, 3]).await;
        let hit: Option<Vec<i32>> = cache.get("airlines:list").await;
        assert_eq!(hit, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn entries_expire_after_the_ttl() {
        let cache = ReadCache::new(Duration::from_millis(50));
        cache.put("flights:metrics", &42u32).await;
        assert_eq!(cache.get::<u32>("flights:metrics").await, Some(42));

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(cache.get::<u32>("flights:metrics").await, None);
    }

    #[tokio::test]
    async fn unknown_keys_miss() {
        let cache = ReadCache::new(Duration::from_secs(60));
        assert_eq!(cache.get::<u32>("airports:list").await, None);
    }
}

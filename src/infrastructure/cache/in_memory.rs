//! In-memory store implementation using moka

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::cache::{KeyValueStore, StoreConnector};
use crate::domain::CacheError;

/// Configuration for in-memory store
#[derive(Debug, Clone)]
pub struct InMemoryStoreConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for InMemoryStoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

impl InMemoryStoreConfig {
    /// Sets the maximum number of entries
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }
}

/// Connector producing a fresh in-memory store for any non-blank address
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnector {
    config: InMemoryStoreConfig,
}

impl InMemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InMemoryStoreConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl StoreConnector for InMemoryConnector {
    type Params = String;

    fn parse_address(&self, address: &str) -> Result<String, CacheError> {
        let name = address.trim();
        if name.is_empty() {
            return Err(CacheError::configuration("In-memory store name is blank"));
        }
        Ok(name.to_string())
    }

    async fn open(&self, _name: String) -> Result<Arc<dyn KeyValueStore>, CacheError> {
        Ok(Arc::new(InMemoryStore::with_config(self.config.clone())))
    }
}

/// Entry stored in moka
#[derive(Debug, Clone)]
struct StoredEntry {
    data: Vec<u8>,
    /// Expiration timestamp (millis since epoch), `u64::MAX` for never
    expires_at: u64,
}

/// Thread-safe in-memory key-value store
///
/// Honors a per-entry expiry and evicts when capacity is reached. Once
/// closed, every operation fails with a store error.
#[derive(Debug)]
pub struct InMemoryStore {
    entries: MokaCache<String, StoredEntry>,
    closed: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_config(InMemoryStoreConfig::default())
    }

    pub fn with_config(config: InMemoryStoreConfig) -> Self {
        Self {
            entries: MokaCache::builder()
                .max_capacity(config.max_capacity)
                .build(),
            closed: AtomicBool::new(false),
        }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn ensure_open(&self) -> Result<(), CacheError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(CacheError::store("In-memory store is closed"));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn ping(&self) -> Result<(), CacheError> {
        self.ensure_open()
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.ensure_open()?;

        match self.entries.get(key).await {
            Some(entry) if Self::current_time_millis() > entry.expires_at => {
                self.entries.remove(key).await;
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.data)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), CacheError> {
        self.ensure_open()?;

        let expires_at = match ttl {
            Some(ttl) => Self::current_time_millis()
                .saturating_add(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)),
            None => u64::MAX,
        };

        let entry = StoredEntry {
            data: value.to_vec(),
            expires_at,
        };

        self.entries.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.ensure_open()?;
        self.entries.remove(key).await;
        Ok(())
    }

    async fn close(&self) -> Result<(), CacheError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(CacheError::store("In-memory store already closed"));
        }

        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemoryStore::new();

        store
            .set("key1", b"value1", Some(Duration::from_secs(60)))
            .await
            .unwrap();

        let result = store.get("key1").await.unwrap();
        assert_eq!(result, Some(b"value1".to_vec()));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = InMemoryStore::new();

        let result = store.get("missing").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryStore::new();

        store
            .set("key1", b"value1", Some(Duration::from_secs(60)))
            .await
            .unwrap();
        store.delete("key1").await.unwrap();

        assert!(store.get("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = InMemoryStore::new();

        assert!(store.delete("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_entry_expiration() {
        let store = InMemoryStore::new();

        store
            .set("key1", b"value1", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        assert!(store.get("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(store.get("key1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entry_without_expiry_persists() {
        let store = InMemoryStore::new();

        store.set("key1", b"value1", None).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
    }

    #[tokio::test]
    async fn test_huge_ttl_does_not_overflow() {
        let store = InMemoryStore::new();

        store
            .set("key1", b"value1", Some(Duration::from_secs(u64::MAX)))
            .await
            .unwrap();

        assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
    }

    #[tokio::test]
    async fn test_operations_fail_after_close() {
        let store = InMemoryStore::new();

        store
            .set("key1", b"value1", Some(Duration::from_secs(60)))
            .await
            .unwrap();
        store.close().await.unwrap();

        assert!(store.ping().await.unwrap_err().is_store());
        assert!(store.get("key1").await.unwrap_err().is_store());
        assert!(store.delete("key1").await.unwrap_err().is_store());
        assert!(store.close().await.is_err());
    }

    #[test]
    fn test_connector_rejects_blank_address() {
        let connector = InMemoryConnector::new();

        assert!(connector.parse_address("  ").is_err());
        assert_eq!(connector.parse_address(" local ").unwrap(), "local");
    }

    #[tokio::test]
    async fn test_connector_opens_fresh_store() {
        let connector = InMemoryConnector::with_config(
            InMemoryStoreConfig::default().with_max_capacity(100),
        );

        let store = connector.open("local".to_string()).await.unwrap();
        store.ping().await.unwrap();
    }
}

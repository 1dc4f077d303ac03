//! Redis store implementation

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use tokio::sync::RwLock;

use crate::domain::cache::{KeyValueStore, StoreConnector};
use crate::domain::CacheError;

/// Connector for `redis://` and `rediss://` addresses
#[derive(Debug, Clone, Default)]
pub struct RedisConnector;

impl RedisConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StoreConnector for RedisConnector {
    type Params = Client;

    fn parse_address(&self, address: &str) -> Result<Client, CacheError> {
        // Client::open only validates the URL, no connection is made here
        Client::open(address)
            .map_err(|e| CacheError::configuration(format!("Invalid Redis URL: {}", e)))
    }

    async fn open(&self, client: Client) -> Result<Arc<dyn KeyValueStore>, CacheError> {
        // Reconnection is never wanted: a failed store stays failed
        let config = ConnectionManagerConfig::new().set_number_of_retries(0);

        let connection = ConnectionManager::new_with_config(client, config)
            .await
            .map_err(|e| CacheError::store(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Arc::new(RedisStore::new(connection)))
    }
}

/// Redis-backed key-value store
///
/// Holds a single `ConnectionManager`, which multiplexes commands from all
/// callers. `close` drops it; any command issued afterwards fails.
pub struct RedisStore {
    connection: RwLock<Option<ConnectionManager>>,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self {
            connection: RwLock::new(Some(connection)),
        }
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        self.connection
            .read()
            .await
            .clone()
            .ok_or_else(|| CacheError::store("Redis connection is closed"))
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::store(format!("Failed to ping Redis: {}", e)))?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.connection().await?;

        let result: Option<Vec<u8>> = conn.get(key).await.map_err(|e| {
            CacheError::store(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let result: redis::RedisResult<()> = match ttl {
            // SETEX rejects a zero expiry
            Some(ttl) => conn.set_ex(key, value, ttl.as_secs().max(1)).await,
            None => conn.set(key, value).await,
        };

        result.map_err(|e| CacheError::store(format!("Failed to set key '{}': {}", key, e)))
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;

        let _: i64 = conn.del(key).await.map_err(|e| {
            CacheError::store(format!("Failed to delete key '{}': {}", key, e))
        })?;

        Ok(())
    }

    async fn close(&self) -> Result<(), CacheError> {
        match self.connection.write().await.take() {
            Some(connection) => {
                drop(connection);
                Ok(())
            }
            None => Err(CacheError::store("Redis connection already closed")),
        }
    }
}

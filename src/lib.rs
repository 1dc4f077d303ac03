//! Graceful Cache
//!
//! A cache facade over Redis that never gets in the way of the caller:
//! - Construction always succeeds, degrading to a disabled instance
//! - The first store failure disables the cache for good
//! - Store errors are swallowed, caller data errors are surfaced
//! - Deterministic SHA-256 cache keys from serializable parameters

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{AppConfig, CacheConfig};
pub use domain::{derive_key, CacheError, KeyValueStore, StoreConnector};
pub use infrastructure::cache::{CacheFacade, InMemoryConnector, RedisConnector};
pub use infrastructure::logging::init_logging;

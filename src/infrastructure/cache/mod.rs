//! Cache infrastructure - facade and store implementations

mod facade;
mod in_memory;
mod redis;

pub use facade::{CacheFacade, LIVENESS_TIMEOUT};
pub use in_memory::{InMemoryConnector, InMemoryStore, InMemoryStoreConfig};
pub use self::redis::{RedisConnector, RedisStore};

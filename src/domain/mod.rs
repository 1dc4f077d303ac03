//! Domain layer - Key derivation, store seams and errors

pub mod cache;
pub mod error;

pub use cache::{derive_key, KeyValueStore, StoreConnector};
pub use error::CacheError;

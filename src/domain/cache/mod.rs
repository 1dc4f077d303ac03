//! Cache domain - key derivation and store collaborator seams

mod key;
mod store;

pub use key::{derive_key, FALLBACK_SUFFIX};
pub use store::{KeyValueStore, StoreConnector};

#[cfg(test)]
pub use store::MockKeyValueStore;

//! Cache key derivation

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Suffix used when the parameters cannot be serialized
pub const FALLBACK_SUFFIX: &str = "fallback";

/// Derives a deterministic cache key from a prefix and arbitrary parameters.
///
/// The parameters are encoded as canonical JSON (object keys sorted), hashed
/// with SHA-256 and hex-encoded, giving `"{prefix}:{64 hex chars}"`.
///
/// If the parameters cannot be serialized the key degrades to
/// `"{prefix}:fallback"`. Every unserializable input under the same prefix
/// shares that key. Besides maps with non-string keys this includes 128-bit
/// integers outside the 64-bit range, which a JSON number cannot hold here.
pub fn derive_key<T>(prefix: &str, params: &T) -> String
where
    T: Serialize + ?Sized,
{
    match canonical_json(params) {
        Ok(data) => {
            let digest = Sha256::digest(&data);
            format!("{}:{}", prefix, hex::encode(digest))
        }
        Err(e) => {
            tracing::debug!(prefix = %prefix, error = %e, "Falling back to static cache key");
            format!("{}:{}", prefix, FALLBACK_SUFFIX)
        }
    }
}

// serde_json::Value stores objects in a BTreeMap, so the round trip sorts
// map keys regardless of the source collection's iteration order.
fn canonical_json<T>(params: &T) -> Result<Vec<u8>, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(params)?;
    serde_json::to_vec(&value)
}

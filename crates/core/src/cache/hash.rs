//! Request identity hashing for SQLite row keys.

use sha2::{Digest, Sha256};

use crate::request::RequestKey;

/// Compute the row key for a request identity within a generation.
pub fn compute_cache_key(key: &RequestKey) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.method().as_bytes());
    hasher.update(b"\n");
    hasher.update(key.url().as_bytes());
    hex::encode(hasher.finalize())
}

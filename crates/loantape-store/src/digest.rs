//! Content digests of snapshot source files

use sha2::{Digest, Sha256};

/// SHA256 hex digest of the raw file bytes
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

//! SHA-256 over canonical bytes (§4.1).

use crate::canonical_json;
use pact_types::Result;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// `hash(value) = SHA-256(canonical(value))`, returned as lowercase hex.
pub fn hash_hex<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(hex::encode(hash_bytes(value)?))
}

/// Same as [`hash_hex`] but returns the raw 32-byte digest.
pub fn hash_bytes<T: Serialize + ?Sized>(value: &T) -> Result<[u8; 32]> {
    let canonical = canonical_json(value)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hasher.finalize().into())
}

/// Hash a raw byte string directly (used for non-JSON inputs such as the
/// envelope's signed digest, §4.2 step 3).
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

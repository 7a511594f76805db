//! PACT Codec - canonical JSON serialization and SHA-256 hashing (C1, §4.1).
//!
//! Every other subsystem depends on this crate for a single, deterministic
//! notion of "the bytes of a value": `canonical_json` for the serialization
//! contract, `hash_hex`/`hash_bytes` for hashing over those bytes.

mod canonical;
mod hash;

pub use canonical::{canonical_json, canonicalize};
pub use hash::{hash_bytes, hash_hex, sha256_hex};

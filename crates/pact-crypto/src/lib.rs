//! PACT Crypto - Ed25519 keys, base58 encoding, and envelope sign/verify
//! (C2, §4.2). Kept separate from `pact-types` so the wire-type crate never
//! needs an `ed25519-dalek` dependency.

mod envelope;
mod error;
mod keypair;

pub use envelope::{recompute_envelope_hash, sign, verify};
pub use error::{CryptoError, Result};
pub use keypair::{decode_public_key, verify_signature, Keypair};

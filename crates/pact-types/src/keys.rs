//! Base58-encoded key and signature identifiers.
//!
//! These wrap the *encoded* forms only; decoding to raw bytes and every
//! cryptographic operation lives in `pact-crypto` so this crate stays free
//! of a `ed25519-dalek` dependency. Per §9, `SignerKey` — not `AgentLabel`
//! — is the canonical identity used everywhere transcripts, events, or
//! scores need to group by participant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base58-encoded Ed25519 public key - the canonical signer identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignerKey(pub String);

impl SignerKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SignerKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SignerKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Base58-encoded Ed25519 detached signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureB58(pub String);

impl SignatureB58 {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignatureB58 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SignatureB58 {
    fn from(s: String) -> Self {
        Self(s)
    }
}

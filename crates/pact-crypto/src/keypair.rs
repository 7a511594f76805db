//! Ed25519 key generation and base58 encoding.
//!
//! Grounded on the generate/from_seed/public_key_hex shape of the teacher's
//! `Keypair`, adapted to base58 (§4.2 calls for "base58-encoded key and
//! signature") instead of hex.

use crate::error::{CryptoError, Result};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use pact_types::{SignatureB58, SignerKey};
use rand::rngs::OsRng;

/// A generated or loaded Ed25519 keypair.
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self { signing_key }
    }

    /// Reconstruct a keypair from a 32-byte seed (e.g. stored offline).
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    pub fn public_key_b58(&self) -> SignerKey {
        SignerKey(bs58::encode(self.signing_key.verifying_key().to_bytes()).into_string())
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign raw bytes, returning a base58-encoded detached signature.
    pub fn sign(&self, message: &[u8]) -> SignatureB58 {
        let signature = self.signing_key.sign(message);
        SignatureB58(bs58::encode(signature.to_bytes()).into_string())
    }
}

/// Decode a base58 signer key into a verifying key.
pub fn decode_public_key(key: &SignerKey) -> Result<VerifyingKey> {
    let bytes = bs58::decode(key.as_str()).into_vec()?;
    let array: [u8; 32] = bytes
        .clone()
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength(bytes.len()))?;
    VerifyingKey::from_bytes(&array).map_err(|e| CryptoError::InvalidSigningKey(e.to_string()))
}

/// Verify a base58-encoded detached signature over `message` using `key`.
/// Never panics on malformed input - any decoding failure is treated as a
/// verification failure (`Ok(false)`), matching §4.2's "never throws on
/// normal data" contract.
pub fn verify_signature(
    key: &SignerKey,
    message: &[u8],
    signature: &SignatureB58,
) -> Result<bool> {
    let verifying_key = match decode_public_key(key) {
        Ok(k) => k,
        Err(_) => return Ok(false),
    };
    let sig_bytes = match bs58::decode(signature.as_str()).into_vec() {
        Ok(b) => b,
        Err(_) => return Ok(false),
    };
    let sig_array: [u8; 64] = match sig_bytes.try_into() {
        Ok(a) => a,
        Err(_) => return Ok(false),
    };
    let signature = ed25519_dalek::Signature::from_bytes(&sig_array);
    Ok(verifying_key.verify(message, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trip() {
        let keypair = Keypair::generate();
        let message = b"hello pact";
        let signature = keypair.sign(message);
        assert!(verify_signature(&keypair.public_key_b58(), message, &signature).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_message() {
        let keypair = Keypair::generate();
        let signature = keypair.sign(b"original");
        assert!(!verify_signature(&keypair.public_key_b58(), b"tampered", &signature).unwrap());
    }

    #[test]
    fn verify_rejects_malformed_key_without_panicking() {
        let keypair = Keypair::generate();
        let signature = keypair.sign(b"hello");
        let bad_key = SignerKey("not-valid-base58-!!!".to_string());
        assert!(!verify_signature(&bad_key, b"hello", &signature).unwrap());
    }

    #[test]
    fn from_seed_is_deterministic() {
        let seed = [7u8; 32];
        let a = Keypair::from_seed(&seed);
        let b = Keypair::from_seed(&seed);
        assert_eq!(a.public_key_b58(), b.public_key_b58());
    }
}

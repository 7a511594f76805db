//! Cryptographic error type - distinct from [`pact_types::PactError`] since
//! key/signature failures are a different failure surface than codec shape
//! errors (§7).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("invalid base58 encoding: {0}")]
    InvalidBase58(#[from] bs58::decode::Error),

    #[error("key is not 32 bytes: got {0}")]
    InvalidKeyLength(usize),

    #[error("signature is not 64 bytes: got {0}")]
    InvalidSignatureLength(usize),

    #[error("signing key rejected by ed25519-dalek: {0}")]
    InvalidSigningKey(String),

    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] pact_types::PactError),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

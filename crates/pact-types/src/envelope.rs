//! Signed envelopes wrapping a single message (§3, §4.2).

use crate::{Message, SignatureB58, SignerKey};
use serde::{Deserialize, Serialize};

/// A signed wrapper around one [`Message`].
///
/// `envelope_hash_hex` is optional on the wire for backward compatibility
/// with legacy producers (§4.2) - verifiers recompute it when absent but
/// never write it back onto the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub envelope_version: String,
    pub message: Message,
    pub message_hash_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub envelope_hash_hex: Option<String>,
    pub signer_public_key_b58: SignerKey,
    pub signature_b58: SignatureB58,
    pub signed_at_ms: i64,
}

//! Envelope signing and verification (C2, §4.2).

use crate::error::Result;
use crate::keypair::{verify_signature, Keypair};
use pact_types::{Envelope, Message, ENVELOPE_VERSION};
use serde_json::json;

/// `sign(message, keypair, signed_at_ms) → envelope`, per §4.2 steps 1-4.
pub fn sign(message: Message, keypair: &Keypair, signed_at_ms: i64) -> Result<Envelope> {
    let message_hash_hex = pact_codec::hash_hex(&message)?;
    let envelope_hash_hex = pact_codec::hash_hex(&json!({
        "envelope_version": ENVELOPE_VERSION,
        "message": message,
        "message_hash_hex": message_hash_hex,
    }))?;
    let signature_b58 = keypair.sign(envelope_hash_hex.as_bytes());
    Ok(Envelope {
        envelope_version: ENVELOPE_VERSION.to_string(),
        message,
        message_hash_hex,
        envelope_hash_hex: Some(envelope_hash_hex),
        signer_public_key_b58: keypair.public_key_b58(),
        signature_b58,
        signed_at_ms,
    })
}

/// `verify(envelope)`, per §4.2: any mismatch yields `false`, never an error.
pub fn verify(envelope: &Envelope) -> bool {
    if envelope.envelope_version != ENVELOPE_VERSION {
        return false;
    }
    let Ok(expected_message_hash) = pact_codec::hash_hex(&envelope.message) else {
        return false;
    };
    if expected_message_hash != envelope.message_hash_hex {
        return false;
    }

    let envelope_hash = match &envelope.envelope_hash_hex {
        Some(hash) => {
            let Ok(recomputed) = pact_codec::hash_hex(&json!({
                "envelope_version": envelope.envelope_version,
                "message": envelope.message,
                "message_hash_hex": envelope.message_hash_hex,
            })) else {
                return false;
            };
            if recomputed != *hash {
                return false;
            }
            hash.clone()
        }
        None => {
            let Ok(recomputed) = pact_codec::hash_hex(&json!({
                "envelope_version": envelope.envelope_version,
                "message": envelope.message,
                "message_hash_hex": envelope.message_hash_hex,
            })) else {
                return false;
            };
            recomputed
        }
    };

    verify_signature(
        &envelope.signer_public_key_b58,
        envelope_hash.as_bytes(),
        &envelope.signature_b58,
    )
    .unwrap_or(false)
}

/// Recompute the envelope hash an envelope's signature should cover,
/// regardless of whether `envelope_hash_hex` was present on the wire.
/// Exposed for C3, which needs this to verify a round's embedded envelope.
pub fn recompute_envelope_hash(message_hash_hex: &str, message: &Message) -> Result<String> {
    pact_codec::hash_hex(&json!({
        "envelope_version": ENVELOPE_VERSION,
        "message": message,
        "message_hash_hex": message_hash_hex,
    }))
    .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pact_types::{IntentId, MessageKind};

    fn sample_message() -> Message {
        Message {
            intent_id: IntentId::from("intent-1"),
            sent_at_ms: 1,
            expires_at_ms: 2,
            kind: MessageKind::Bid { price: 10.0 },
        }
    }

    #[test]
    fn sign_then_verify_succeeds() {
        let keypair = Keypair::generate();
        let envelope = sign(sample_message(), &keypair, 100).unwrap();
        assert!(verify(&envelope));
    }

    #[test]
    fn verify_tolerates_missing_envelope_hash() {
        let keypair = Keypair::generate();
        let mut envelope = sign(sample_message(), &keypair, 100).unwrap();
        envelope.envelope_hash_hex = None;
        assert!(verify(&envelope));
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let keypair = Keypair::generate();
        let mut envelope = sign(sample_message(), &keypair, 100).unwrap();
        envelope.message = Message {
            kind: MessageKind::Bid { price: 999.0 },
            ..sample_message()
        };
        assert!(!verify(&envelope));
    }

    #[test]
    fn verify_rejects_wrong_version() {
        let keypair = Keypair::generate();
        let mut envelope = sign(sample_message(), &keypair, 100).unwrap();
        envelope.envelope_version = "pact-envelope/0.9".to_string();
        assert!(!verify(&envelope));
    }
}

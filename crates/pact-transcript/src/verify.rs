//! Transcript integrity verification (C3, §4.3).

use crate::error::{IntegrityError, IntegrityErrorType};
use pact_types::{Transcript, TRANSCRIPT_VERSION};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrityStatus {
    Valid,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrityVerdict {
    pub ok: bool,
    pub integrity_status: IntegrityStatus,
    pub errors: Vec<IntegrityError>,
}

impl IntegrityVerdict {
    fn from_errors(errors: Vec<IntegrityError>) -> Self {
        let ok = errors.is_empty();
        Self {
            ok,
            integrity_status: if ok {
                IntegrityStatus::Valid
            } else {
                IntegrityStatus::Invalid
            },
            errors,
        }
    }
}

/// Verify a transcript's integrity, per §4.3's six-step algorithm. Pure and
/// total: every branch accumulates into `errors` rather than returning early,
/// so a caller always sees the full set of problems in one pass.
pub fn verify_transcript(transcript: &Transcript) -> IntegrityVerdict {
    let mut errors = Vec::new();

    // Step 1: version literal and contiguous round numbers.
    if transcript.transcript_version != TRANSCRIPT_VERSION {
        errors.push(IntegrityError::new(
            IntegrityErrorType::VersionMismatch,
            format!(
                "expected transcript_version {TRANSCRIPT_VERSION}, found {}",
                transcript.transcript_version
            ),
        ));
    }
    for (index, round) in transcript.rounds.iter().enumerate() {
        if round.round_number as usize != index {
            errors.push(IntegrityError::new(
                IntegrityErrorType::NonContiguousRounds,
                format!(
                    "round at position {index} has round_number {}, expected {index}",
                    round.round_number
                ),
            ));
        }
    }

    // Step 2: hash-chain linkage.
    let initial_link = pact_codec::sha256_hex(
        format!("{}:{}", transcript.intent_id, transcript.created_at_ms).as_bytes(),
    );
    let mut expected_previous = initial_link;
    for round in &transcript.rounds {
        if round.previous_round_hash != expected_previous {
            errors.push(IntegrityError::new(
                IntegrityErrorType::BrokenHashChain,
                format!(
                    "round {} previous_round_hash does not match expected link",
                    round.round_number
                ),
            ));
        }
        expected_previous = round.round_hash.clone();
    }

    // Step 3: per-round hash and embedded signature.
    for round in &transcript.rounds {
        let stripped = round.without_round_hash();
        match pact_codec::hash_hex(&stripped) {
            Ok(recomputed) if recomputed == round.round_hash => {}
            _ => {
                errors.push(IntegrityError::new(
                    IntegrityErrorType::RoundHashMismatch,
                    format!("round {} round_hash does not recompute", round.round_number),
                ));
            }
        }

        let signature_ok = pact_crypto::verify_signature(
            &round.public_key_b58,
            round.envelope_hash.as_bytes(),
            &round.signature,
        )
        .unwrap_or(false);
        if !signature_ok {
            errors.push(IntegrityError::new(
                IntegrityErrorType::InvalidSignature,
                format!(
                    "round {} signature does not verify against its envelope hash",
                    round.round_number
                ),
            ));
        }
    }

    // Step 4: failure event hash and known terminality.
    if let Some(failure_event) = &transcript.failure_event {
        let stripped = transcript.without_failure_and_final_hash();
        match pact_codec::hash_hex(&stripped) {
            Ok(recomputed) if recomputed == failure_event.transcript_hash => {}
            _ => {
                errors.push(IntegrityError::new(
                    IntegrityErrorType::FailureHashMismatch,
                    "failure_event.transcript_hash does not recompute",
                ));
            }
        }
        // terminality is a closed enum on the wire type; an unrecognized
        // value fails to deserialize before reaching this function, so the
        // "known value" requirement is already enforced by the type system.
    }

    // Step 5: final hash.
    if let Some(final_hash) = &transcript.final_hash {
        let stripped = transcript.without_final_hash();
        match pact_codec::hash_hex(&stripped) {
            Ok(recomputed) if recomputed == *final_hash => {}
            _ => {
                errors.push(IntegrityError::new(
                    IntegrityErrorType::FinalHashMismatch,
                    "final_hash does not recompute over the sealed transcript",
                ));
            }
        }
    }

    if !errors.is_empty() {
        tracing::debug!(
            transcript_id = %transcript.transcript_id,
            error_count = errors.len(),
            "transcript failed integrity verification"
        );
    }

    IntegrityVerdict::from_errors(errors)
}

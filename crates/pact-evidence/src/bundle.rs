//! Evidence bundle packaging and verification (§6).
//!
//! A bundle is the transcript, its blame judgment, an optional recomputed
//! passport state, and a manifest naming them and listing their hashes.
//! Verifying a bundle is re-running transcript integrity plus checking the
//! manifest's hashes still match - no separate bundle-signing scheme.

use crate::error::Result;
use pact_blame::Judgment;
use pact_transcript::IntegrityVerdict;
use pact_types::{PassportState, Transcript};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const TRANSCRIPT_FILE: &str = "transcript.json";
const JUDGMENT_FILE: &str = "judgment.json";
const PASSPORT_STATE_FILE: &str = "passport_state.json";
const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceManifest {
    pub transcript_file: String,
    pub transcript_hash: String,
    pub judgment_file: String,
    pub judgment_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_state_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_state_hash: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EvidenceBundle {
    pub transcript: Transcript,
    pub judgment: Judgment,
    pub passport_state: Option<PassportState>,
    pub manifest: EvidenceManifest,
}

/// Build a bundle from its parts, computing the manifest's hashes.
pub fn build_bundle(
    transcript: Transcript,
    judgment: Judgment,
    passport_state: Option<PassportState>,
) -> Result<EvidenceBundle> {
    let transcript_hash = pact_codec::hash_hex(&transcript)?;
    let judgment_hash = pact_codec::hash_hex(&judgment)?;
    let passport_state_hash = passport_state
        .as_ref()
        .map(pact_codec::hash_hex)
        .transpose()?;

    let manifest = EvidenceManifest {
        transcript_file: TRANSCRIPT_FILE.to_string(),
        transcript_hash,
        judgment_file: JUDGMENT_FILE.to_string(),
        judgment_hash,
        passport_state_file: passport_state.as_ref().map(|_| PASSPORT_STATE_FILE.to_string()),
        passport_state_hash,
    };

    Ok(EvidenceBundle {
        transcript,
        judgment,
        passport_state,
        manifest,
    })
}

/// Write a bundle to a directory as four JSON files.
pub fn write_bundle(bundle: &EvidenceBundle, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    fs::write(
        dir.join(&bundle.manifest.transcript_file),
        serde_json::to_string_pretty(&bundle.transcript)?,
    )?;
    fs::write(
        dir.join(&bundle.manifest.judgment_file),
        serde_json::to_string_pretty(&bundle.judgment)?,
    )?;
    if let (Some(file), Some(state)) = (&bundle.manifest.passport_state_file, &bundle.passport_state) {
        fs::write(dir.join(file), serde_json::to_string_pretty(state)?)?;
    }
    fs::write(
        dir.join(MANIFEST_FILE),
        serde_json::to_string_pretty(&bundle.manifest)?,
    )?;
    Ok(())
}

/// Load a bundle previously written by [`write_bundle`].
pub fn read_bundle(dir: &Path) -> Result<EvidenceBundle> {
    let manifest: EvidenceManifest =
        serde_json::from_str(&fs::read_to_string(dir.join(MANIFEST_FILE))?)?;
    let transcript: Transcript =
        serde_json::from_str(&fs::read_to_string(dir.join(&manifest.transcript_file))?)?;
    let judgment: Judgment =
        serde_json::from_str(&fs::read_to_string(dir.join(&manifest.judgment_file))?)?;
    let passport_state = manifest
        .passport_state_file
        .as_ref()
        .map(|file| -> Result<PassportState> {
            Ok(serde_json::from_str(&fs::read_to_string(dir.join(file))?)?)
        })
        .transpose()?;

    Ok(EvidenceBundle {
        transcript,
        judgment,
        passport_state,
        manifest,
    })
}

/// Result of verifying a bundle: transcript integrity plus manifest-hash
/// equality checks.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleVerdict {
    pub ok: bool,
    pub integrity: IntegrityVerdict,
    pub hash_mismatches: Vec<String>,
}

/// Verify a bundle: re-run transcript integrity, then recompute each part's
/// hash and compare it against the manifest.
pub fn verify_bundle(bundle: &EvidenceBundle) -> Result<BundleVerdict> {
    let integrity = pact_transcript::verify_transcript(&bundle.transcript);

    let mut hash_mismatches = Vec::new();
    if pact_codec::hash_hex(&bundle.transcript)? != bundle.manifest.transcript_hash {
        hash_mismatches.push("transcript_hash".to_string());
    }
    if pact_codec::hash_hex(&bundle.judgment)? != bundle.manifest.judgment_hash {
        hash_mismatches.push("judgment_hash".to_string());
    }
    if let (Some(state), Some(expected)) =
        (&bundle.passport_state, &bundle.manifest.passport_state_hash)
    {
        if pact_codec::hash_hex(state)? != *expected {
            hash_mismatches.push("passport_state_hash".to_string());
        }
    }

    Ok(BundleVerdict {
        ok: integrity.ok && hash_mismatches.is_empty(),
        integrity,
        hash_mismatches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pact_blame::{Determination, JudgmentStatus, RequiredNextActor};
    use pact_crypto::{sign, Keypair};
    use pact_types::{
        AgentLabel, IntentId, Message, MessageKind, PassportCounters, Round, SignerKey,
        TranscriptId, TRANSCRIPT_VERSION,
    };
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            let id = COUNTER.fetch_add(1, Ordering::SeqCst);
            Self(std::env::temp_dir().join(format!("pact-evidence-test-{id}")))
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn sample_judgment() -> Judgment {
        Judgment {
            status: JudgmentStatus::Ok,
            failure_code: None,
            last_valid_round: 1,
            required_next_actor: RequiredNextActor::None,
            determination: Determination::NoFault,
            passport_impact: 0.0,
            confidence: 1.0,
            evidence_refs: vec![],
        }
    }

    fn signed_round(round_number: u32, previous_round_hash: String, keypair: &Keypair) -> Round {
        let message = Message {
            intent_id: IntentId::from("intent-1"),
            sent_at_ms: 1_000 + round_number as i64,
            expires_at_ms: 2_000,
            kind: MessageKind::Bid {
                price: 10.0 + round_number as f64,
            },
        };
        let envelope = sign(message, keypair, 1_000 + round_number as i64).unwrap();
        let envelope_hash = envelope.envelope_hash_hex.clone().unwrap();
        let mut round = Round {
            round_number,
            round_type: envelope.message.kind.label().to_string(),
            envelope_hash,
            message_hash: envelope.message_hash_hex.clone(),
            signature: envelope.signature_b58.clone(),
            timestamp_ms: envelope.signed_at_ms,
            previous_round_hash,
            round_hash: String::new(),
            agent_id: AgentLabel("buyer".to_string()),
            public_key_b58: keypair.public_key_b58(),
            content_summary: serde_json::json!({}),
        };
        let stripped = round.without_round_hash();
        round.round_hash = pact_codec::hash_hex(&stripped).unwrap();
        round
    }

    fn sample_transcript() -> Transcript {
        let keypair = Keypair::generate();
        let intent_id = "intent-1";
        let created_at_ms = 500;
        let initial_link = pact_codec::sha256_hex(format!("{intent_id}:{created_at_ms}").as_bytes());
        let round0 = signed_round(0, initial_link, &keypair);
        let round1 = signed_round(1, round0.round_hash.clone(), &keypair);
        let mut transcript = Transcript {
            transcript_version: TRANSCRIPT_VERSION.to_string(),
            transcript_id: TranscriptId::from("t1"),
            intent_id: IntentId::from(intent_id),
            intent_type: "purchase".to_string(),
            created_at_ms,
            policy_hash: "p".repeat(64),
            strategy_hash: "s".repeat(64),
            identity_snapshot_hash: "d".repeat(64),
            rounds: vec![round0, round1],
            failure_event: None,
            final_hash: None,
        };
        let sealed_hash = pact_codec::hash_hex(&transcript.without_final_hash()).unwrap();
        transcript.final_hash = Some(sealed_hash);
        transcript
    }

    #[test]
    fn build_write_read_round_trips() {
        let dir = TempDir::new();
        let bundle = build_bundle(sample_transcript(), sample_judgment(), None).unwrap();
        write_bundle(&bundle, &dir.0).unwrap();
        let loaded = read_bundle(&dir.0).unwrap();
        assert_eq!(loaded.manifest, bundle.manifest);
    }

    #[test]
    fn verify_detects_tampered_judgment_hash() {
        let dir = TempDir::new();
        let bundle = build_bundle(sample_transcript(), sample_judgment(), None).unwrap();
        write_bundle(&bundle, &dir.0).unwrap();
        let mut loaded = read_bundle(&dir.0).unwrap();
        loaded.judgment.confidence = 0.1;
        let verdict = verify_bundle(&loaded).unwrap();
        assert!(!verdict.ok);
        assert!(verdict.hash_mismatches.contains(&"judgment_hash".to_string()));
    }

    #[test]
    fn verify_passes_for_an_unmodified_bundle() {
        let dir = TempDir::new();
        let bundle = build_bundle(sample_transcript(), sample_judgment(), None).unwrap();
        write_bundle(&bundle, &dir.0).unwrap();
        let loaded = read_bundle(&dir.0).unwrap();
        let verdict = verify_bundle(&loaded).unwrap();
        assert!(verdict.ok);
    }

    #[test]
    fn passport_state_hash_is_checked_when_present() {
        let dir = TempDir::new();
        let state = PassportState {
            version: "passport/1.0".to_string(),
            signer_key: SignerKey::from("buyer"),
            score: 0.5,
            counters: PassportCounters::default(),
        };
        let bundle = build_bundle(sample_transcript(), sample_judgment(), Some(state)).unwrap();
        write_bundle(&bundle, &dir.0).unwrap();
        let mut loaded = read_bundle(&dir.0).unwrap();
        loaded.passport_state.as_mut().unwrap().score = 0.9;
        let verdict = verify_bundle(&loaded).unwrap();
        assert!(verdict.hash_mismatches.contains(&"passport_state_hash".to_string()));
    }
}

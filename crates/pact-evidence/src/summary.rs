//! Executive-summary ("gc-view") derivation (§6).

use pact_blame::{Determination, Judgment, JudgmentStatus};
use pact_transcript::IntegrityVerdict;
use serde::{Deserialize, Serialize};

/// A short human-facing status for a judged transcript. Not an exhaustive
/// closed set - `status` for a failed transcript is built from the failure
/// code and determination, so new failure codes produce new statuses
/// without a code change here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub status: String,
    pub transcript_id: String,
    pub last_valid_round: i64,
    pub confidence: f64,
}

/// Build the executive summary for one transcript's integrity verdict and
/// blame judgment.
pub fn executive_summary(
    transcript_id: &str,
    integrity: &IntegrityVerdict,
    judgment: &Judgment,
) -> ExecutiveSummary {
    let status = if !integrity.ok {
        "INTEGRITY_INVALID".to_string()
    } else {
        match judgment.status {
            JudgmentStatus::Ok => "VALID_SUCCESS".to_string(),
            JudgmentStatus::Indeterminate => "INDETERMINATE".to_string(),
            JudgmentStatus::Failed => {
                let domain = determination_label(judgment.determination);
                let code = judgment
                    .failure_code
                    .as_deref()
                    .unwrap_or("UNKNOWN")
                    .replace('-', "_");
                format!("FAILED_{domain}_{code}")
            }
        }
    };

    ExecutiveSummary {
        status,
        transcript_id: transcript_id.to_string(),
        last_valid_round: judgment.last_valid_round,
        confidence: judgment.confidence,
    }
}

fn determination_label(determination: Determination) -> &'static str {
    match determination {
        Determination::NoFault => "NO_FAULT",
        Determination::BuyerAtFault => "BUYER",
        Determination::ProviderAtFault => "PROVIDER",
        Determination::BuyerRailAtFault => "BUYER_RAIL",
        Determination::ProviderRailAtFault => "PROVIDER_RAIL",
        Determination::Indeterminate => "INDETERMINATE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pact_blame::RequiredNextActor;
    use pact_transcript::IntegrityStatus;

    fn ok_integrity() -> IntegrityVerdict {
        IntegrityVerdict {
            ok: true,
            integrity_status: IntegrityStatus::Valid,
            errors: vec![],
        }
    }

    #[test]
    fn successful_judgment_is_valid_success() {
        let judgment = Judgment {
            status: JudgmentStatus::Ok,
            failure_code: None,
            last_valid_round: 3,
            required_next_actor: RequiredNextActor::None,
            determination: Determination::NoFault,
            passport_impact: 0.0,
            confidence: 1.0,
            evidence_refs: vec![],
        };
        let summary = executive_summary("t1", &ok_integrity(), &judgment);
        assert_eq!(summary.status, "VALID_SUCCESS");
    }

    #[test]
    fn failed_judgment_includes_determination_and_code() {
        let judgment = Judgment {
            status: JudgmentStatus::Failed,
            failure_code: Some("PACT-430".to_string()),
            last_valid_round: 2,
            required_next_actor: RequiredNextActor::Rail,
            determination: Determination::ProviderRailAtFault,
            passport_impact: -0.7,
            confidence: 0.9,
            evidence_refs: vec![],
        };
        let summary = executive_summary("t1", &ok_integrity(), &judgment);
        assert_eq!(summary.status, "FAILED_PROVIDER_RAIL_PACT_430");
    }

    #[test]
    fn integrity_failure_overrides_judgment_status() {
        let judgment = Judgment {
            status: JudgmentStatus::Ok,
            failure_code: None,
            last_valid_round: 1,
            required_next_actor: RequiredNextActor::None,
            determination: Determination::NoFault,
            passport_impact: 0.0,
            confidence: 1.0,
            evidence_refs: vec![],
        };
        let mut integrity = ok_integrity();
        integrity.ok = false;
        integrity.integrity_status = IntegrityStatus::Invalid;
        let summary = executive_summary("t1", &integrity, &judgment);
        assert_eq!(summary.status, "INTEGRITY_INVALID");
    }
}

//! Credit accounts/exposure/events repository (parallel tables, §4.9, §6).

use crate::PactStore;
use pact_types::{CreditExposure, CreditState, SignerKey};
use std::collections::HashSet;

pub struct CreditRepo<'a> {
    store: &'a PactStore,
}

impl<'a> CreditRepo<'a> {
    pub fn new(store: &'a PactStore) -> Self {
        Self { store }
    }

    pub fn put_state(&self, signer_key: SignerKey, state: CreditState) {
        self.store.credit_accounts.insert(signer_key, state);
    }

    pub fn get_state(&self, signer_key: &SignerKey) -> Option<CreditState> {
        self.store.credit_accounts.get(signer_key).map(|s| s.clone())
    }

    pub fn get_exposure(&self, signer_key: &SignerKey) -> CreditExposure {
        self.store
            .credit_exposure
            .get(signer_key)
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    pub fn put_exposure(&self, signer_key: SignerKey, exposure: CreditExposure) {
        self.store.credit_exposure.insert(signer_key, exposure);
    }

    /// Record `transcript_hash` as applied for a signer's credit events,
    /// idempotently. Returns `true` if newly recorded.
    pub fn mark_credit_event_applied(&self, signer_key: &SignerKey, transcript_hash: &str) -> bool {
        let mut seen = self
            .store
            .credit_events
            .entry(signer_key.clone())
            .or_insert_with(HashSet::new);
        let newly_recorded = seen.insert(transcript_hash.to_string());
        if !newly_recorded {
            tracing::debug!(transcript_hash, "credit event already applied");
        }
        newly_recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposure_round_trips() {
        let store = PactStore::new();
        let repo = CreditRepo::new(&store);
        let key = SignerKey::from("buyer");
        let mut exposure = CreditExposure::default();
        exposure.record(SignerKey::from("seller"), 100.0);
        repo.put_exposure(key.clone(), exposure);
        assert_eq!(repo.get_exposure(&key).outstanding_usd, 100.0);
    }

    #[test]
    fn credit_event_application_is_idempotent() {
        let store = PactStore::new();
        let repo = CreditRepo::new(&store);
        let key = SignerKey::from("buyer");
        assert!(repo.mark_credit_event_applied(&key, "hash-1"));
        assert!(!repo.mark_credit_event_applied(&key, "hash-1"));
    }
}

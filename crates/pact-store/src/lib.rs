//! In-process event store (§4.9): append-only passport events keyed
//! idempotently on `(transcript_hash, signer_key)`, plus the parallel
//! credit-account/exposure/event tables layered on top.
//!
//! The store is the only place in this workspace that owns mutable shared
//! state (§5); everything else is pure and reentrant. Backed by `dashmap`
//! rather than a real database - swapping in a persistent backend means
//! implementing the same repo interfaces against it.

mod error;
mod models;
pub mod repos;

use dashmap::DashMap;
use models::{AgentRecord, StoredEvent};
use pact_types::{CreditExposure, CreditState, SignerKey};
use std::collections::HashSet;

pub use error::{StoreError, StoreResult};
pub use repos::agents::AgentRepo;
pub use repos::credit::CreditRepo;
pub use repos::events::EventRepo;

#[derive(Default)]
pub struct PactStore {
    agents: DashMap<SignerKey, AgentRecord>,
    events: DashMap<SignerKey, Vec<StoredEvent>>,
    credit_accounts: DashMap<SignerKey, CreditState>,
    credit_exposure: DashMap<SignerKey, CreditExposure>,
    credit_events: DashMap<SignerKey, HashSet<String>>,
}

impl PactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agents(&self) -> AgentRepo<'_> {
        AgentRepo::new(self)
    }

    pub fn events(&self) -> EventRepo<'_> {
        EventRepo::new(self)
    }

    pub fn credit(&self) -> CreditRepo<'_> {
        CreditRepo::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pact_types::{PassportEvent, PassportEventKind};

    #[test]
    fn store_wires_repos_over_shared_tables() {
        let store = PactStore::new();
        let key = SignerKey::from("buyer");
        store.agents().upsert(key.clone(), "hash".to_string(), 0);
        assert!(store.agents().exists(&key));

        let event = PassportEvent {
            kind: PassportEventKind::SettlementSuccess,
            ts: 0,
            transcript_hash: "t1".to_string(),
            counterparty_key: SignerKey::from("seller"),
            value: 10.0,
            failure_code: None,
            stage: None,
            fault_domain: None,
            terminality: None,
            dispute_outcome: None,
        };
        assert!(store.events().insert_event(&key, "t1", event).unwrap());
        assert!(store.events().has_transcript_hash("t1", Some(&key)));
    }
}

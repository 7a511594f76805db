//! Agent repository (`agents` table, §4.9's `upsertAgent`).

use crate::models::AgentRecord;
use crate::PactStore;
use pact_types::SignerKey;

pub struct AgentRepo<'a> {
    store: &'a PactStore,
}

impl<'a> AgentRepo<'a> {
    pub fn new(store: &'a PactStore) -> Self {
        Self { store }
    }

    /// Insert or refresh an agent's identity hash. Does not reset
    /// `created_at` on an existing row.
    pub fn upsert(&self, signer_key: SignerKey, identity_hash: String, created_at: i64) {
        self.store
            .agents
            .entry(signer_key)
            .and_modify(|record| record.identity_hash = identity_hash.clone())
            .or_insert(AgentRecord {
                created_at,
                identity_hash,
            });
    }

    pub fn exists(&self, signer_key: &SignerKey) -> bool {
        self.store.agents.contains_key(signer_key)
    }

    pub fn get(&self, signer_key: &SignerKey) -> Option<AgentRecord> {
        self.store.agents.get(signer_key).map(|r| r.clone())
    }
}

//! Passport event repository (`passport_events` table, §4.9).

use crate::error::{StoreError, StoreResult};
use crate::models::StoredEvent;
use crate::PactStore;
use pact_types::{DisputeOutcome, PassportEvent, PassportEventKind, SignerKey};

pub struct EventRepo<'a> {
    store: &'a PactStore,
}

impl<'a> EventRepo<'a> {
    pub fn new(store: &'a PactStore) -> Self {
        Self { store }
    }

    /// Insert an event for `signer_key`, idempotently keyed on
    /// `(transcript_hash, signer_key)`. Returns `Ok(true)` if a new row was
    /// inserted, `Ok(false)` if the hash was already present for this
    /// signer, or `Err` if the signer is unknown (foreign-key integrity).
    pub fn insert_event(
        &self,
        signer_key: &SignerKey,
        transcript_hash: &str,
        event: PassportEvent,
    ) -> StoreResult<bool> {
        if !self.store.agents.contains_key(signer_key) {
            return Err(StoreError::ForeignKey(format!(
                "no agent row for signer {}",
                signer_key.0
            )));
        }

        let mut rows = self.store.events.entry(signer_key.clone()).or_default();
        if rows.iter().any(|r| r.transcript_hash == transcript_hash) {
            tracing::debug!(transcript_hash, "duplicate passport event ignored");
            return Ok(false);
        }
        rows.push(StoredEvent {
            transcript_hash: transcript_hash.to_string(),
            event,
        });
        Ok(true)
    }

    pub fn has_transcript_hash(&self, transcript_hash: &str, signer_key: Option<&SignerKey>) -> bool {
        match signer_key {
            Some(key) => self
                .store
                .events
                .get(key)
                .is_some_and(|rows| rows.iter().any(|r| r.transcript_hash == transcript_hash)),
            None => self.store.events.iter().any(|entry| {
                entry
                    .value()
                    .iter()
                    .any(|r| r.transcript_hash == transcript_hash)
            }),
        }
    }

    /// All events for a signer, ordered by `ts` ascending.
    pub fn get_events_by_agent(&self, signer_key: &SignerKey) -> Vec<PassportEvent> {
        let mut events: Vec<PassportEvent> = self
            .store
            .events
            .get(signer_key)
            .map(|rows| rows.iter().map(|r| r.event.clone()).collect())
            .unwrap_or_default();
        events.sort_by_key(|e| e.ts);
        events
    }

    pub fn get_recent_failures(
        &self,
        signer_key: &SignerKey,
        now_ms: i64,
        window_ms: i64,
        code_prefix: Option<&str>,
    ) -> Vec<PassportEvent> {
        self.get_events_by_agent(signer_key)
            .into_iter()
            .filter(|e| e.kind == PassportEventKind::SettlementFailure)
            .filter(|e| now_ms - e.ts <= window_ms)
            .filter(|e| match (code_prefix, &e.failure_code) {
                (Some(prefix), Some(code)) => code.0.starts_with(prefix),
                (Some(_), None) => false,
                (None, _) => true,
            })
            .collect()
    }

    pub fn get_recent_disputes(
        &self,
        signer_key: &SignerKey,
        now_ms: i64,
        window_ms: i64,
        outcome: Option<DisputeOutcome>,
    ) -> Vec<PassportEvent> {
        self.get_events_by_agent(signer_key)
            .into_iter()
            .filter(|e| e.kind == PassportEventKind::DisputeResolved)
            .filter(|e| now_ms - e.ts <= window_ms)
            .filter(|e| outcome.map_or(true, |wanted| e.dispute_outcome == Some(wanted)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::agents::AgentRepo;

    fn sample_event(ts: i64, kind: PassportEventKind) -> PassportEvent {
        PassportEvent {
            kind,
            ts,
            transcript_hash: "irrelevant".to_string(),
            counterparty_key: SignerKey::from("cp"),
            value: 10.0,
            failure_code: None,
            stage: None,
            fault_domain: None,
            terminality: None,
            dispute_outcome: None,
        }
    }

    #[test]
    fn insert_fails_without_a_known_agent() {
        let store = PactStore::new();
        let repo = EventRepo::new(&store);
        let err = repo
            .insert_event(
                &SignerKey::from("ghost"),
                "hash-1",
                sample_event(0, PassportEventKind::SettlementSuccess),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)));
    }

    #[test]
    fn insert_is_idempotent_on_transcript_hash() {
        let store = PactStore::new();
        AgentRepo::new(&store).upsert(SignerKey::from("buyer"), "h".to_string(), 0);
        let repo = EventRepo::new(&store);
        let key = SignerKey::from("buyer");
        let inserted_first = repo
            .insert_event(&key, "hash-1", sample_event(1, PassportEventKind::SettlementSuccess))
            .unwrap();
        let inserted_second = repo
            .insert_event(&key, "hash-1", sample_event(1, PassportEventKind::SettlementSuccess))
            .unwrap();
        assert!(inserted_first);
        assert!(!inserted_second);
    }

    #[test]
    fn events_by_agent_are_ordered_by_ts() {
        let store = PactStore::new();
        let key = SignerKey::from("buyer");
        AgentRepo::new(&store).upsert(key.clone(), "h".to_string(), 0);
        let repo = EventRepo::new(&store);
        repo.insert_event(&key, "hash-2", sample_event(200, PassportEventKind::SettlementSuccess))
            .unwrap();
        repo.insert_event(&key, "hash-1", sample_event(100, PassportEventKind::SettlementSuccess))
            .unwrap();
        let events = repo.get_events_by_agent(&key);
        assert_eq!(events[0].ts, 100);
        assert_eq!(events[1].ts, 200);
    }
}

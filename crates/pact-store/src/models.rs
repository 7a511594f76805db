//! Row shapes stored by the event store (§4.9, §6's persisted-state layout).

use pact_types::PassportEvent;

/// One row of the `agents` table.
#[derive(Debug, Clone)]
pub struct AgentRecord {
    pub created_at: i64,
    pub identity_hash: String,
}

/// One row of the `passport_events` table, unique on
/// `(transcript_hash, signer_key)`.
#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub transcript_hash: String,
    pub event: PassportEvent,
}

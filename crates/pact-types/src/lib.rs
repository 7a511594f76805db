//! PACT Types - canonical domain types for the agent-commerce evidence core
//!
//! This crate contains every wire-format type shared across the PACT
//! subsystems, with zero dependencies on other `pact-*` crates:
//!
//! - Identity: opaque signer keys and external identifiers (§3)
//! - Messages, envelopes, and rounds (§3, §4.2)
//! - Transcripts and failure events (§3, §4.3, §4.4)
//! - Passport events and state (§3, §4.6)
//! - Credit state (§3, §4.7)
//! - Policy documents, both the v4 rule-tree form and the legacy v1
//!   staged-guard form (§3, §4.5)
//!
//! # Architectural invariant
//!
//! The canonical identity for scoring, credit, and anti-gaming is always the
//! signer's public key, never the human-readable `agent_id` label. Every
//! type below that needs to be grouped or deduplicated carries a
//! `signer_public_key_b58` field for that purpose; `agent_id` is advisory.

pub mod credit;
pub mod envelope;
pub mod error;
pub mod failure;
pub mod ids;
pub mod keys;
pub mod message;
pub mod passport;
pub mod policy;
pub mod round;
pub mod transcript;

pub use credit::*;
pub use envelope::*;
pub use error::*;
pub use failure::*;
pub use ids::*;
pub use keys::*;
pub use message::*;
pub use passport::*;
pub use policy::*;
pub use round::*;
pub use transcript::*;

/// Schema version string for transcripts, normative per §6.
pub const TRANSCRIPT_VERSION: &str = "pact-transcript/4.0";
/// Schema version string for signed envelopes, normative per §6.
pub const ENVELOPE_VERSION: &str = "pact-envelope/1.0";
/// Schema version string for the v4 rule-tree policy form.
pub const POLICY_V4_VERSION: &str = "pact-policy/4.0";
/// Schema version string for the legacy staged-guard policy form.
pub const POLICY_V1_VERSION: &str = "pact-policy/1.0";
/// Schema version string for passport state snapshots.
pub const PASSPORT_VERSION: &str = "passport/1.0";

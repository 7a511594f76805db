//! Identifier newtypes.
//!
//! Unlike the wallet-style identifiers this pattern is borrowed from, PACT
//! identifiers are minted by the external agent runtime, not by this core -
//! transcripts and intents arrive with their IDs already assigned. Each
//! newtype exists only to stop an `intent_id` and a `transcript_id` from
//! being passed to the wrong parameter by accident.

use crate::SignerKey;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_opaque_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_opaque_id!(IntentId, "Identifier of the negotiated intent a transcript resolves");
define_opaque_id!(TranscriptId, "Identifier assigned to a transcript by its producer");
define_opaque_id!(PolicyId, "Identifier of a policy document");

/// A role label carried on a round for human readability only.
///
/// Per §9, this is advisory and reused across agents - it must never be
/// used as a grouping or deduplication key. The only canonical identity is
/// [`crate::SignerKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentLabel(pub String);

impl fmt::Display for AgentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a counterparty in passport/credit bookkeeping by signer key.
pub type CounterpartyKey = SignerKey;

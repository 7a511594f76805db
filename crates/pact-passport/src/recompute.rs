//! Order-independent recompute (§4.6 step 14).

use pact_types::{PassportDelta, PassportState, SignerKey};
use std::collections::{BTreeMap, HashSet};

/// One transcript's contribution to one signer's passport, keyed for
/// deduplication the same way the event store dedupes inserts.
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputeEntry {
    pub stable_id: String,
    pub signer_key: SignerKey,
    pub delta: PassportDelta,
}

/// Recompute a signer's passport state from a set of transcript
/// contributions, independent of the order `entries` is presented in.
///
/// `applyDelta` clamps the running score after every fold step, so fold
/// order matters even though addition itself is commutative; this function
/// fixes that order by sorting on stable id before folding, which is why
/// `recompute(shuffle(entries), target) == recompute(entries, target)`.
pub fn recompute(entries: &[RecomputeEntry], target: Option<&SignerKey>) -> PassportState {
    let target = match target {
        Some(signer) => signer.clone(),
        None => pick_most_frequent_signer(entries),
    };

    let mut filtered: Vec<&RecomputeEntry> = entries
        .iter()
        .filter(|entry| entry.signer_key == target)
        .collect();
    filtered.sort_by(|a, b| a.stable_id.cmp(&b.stable_id));

    let mut seen = HashSet::new();
    let mut state = PassportState::bootstrap(target);
    for entry in filtered {
        if seen.insert(entry.stable_id.clone()) {
            state = entry.delta.apply(&state);
        }
    }
    state
}

fn pick_most_frequent_signer(entries: &[RecomputeEntry]) -> SignerKey {
    let mut counts: BTreeMap<SignerKey, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.signer_key.clone()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(signer, _)| signer)
        .unwrap_or_else(|| SignerKey(String::new()))
}

//! Canonical JSON serialization (§4.1).
//!
//! Grounded on the recursive object-sorting pattern used for decision
//! receipts in the wider corpus: walk the value, sort every object's keys,
//! and recurse into arrays and nested objects. `serde_json`'s default
//! `Map` (no `preserve_order`) is already `BTreeMap`-backed and sorts keys
//! for us; the explicit walk below exists so canonicalization doesn't
//! silently depend on that feature flag remaining off.

use pact_types::{PactError, Result};
use serde::Serialize;
use serde_json::Value;

/// Object keys sort by UTF-16 code unit, not by Rust's default `str::cmp`
/// (UTF-8 byte / Unicode scalar value order). The two diverge for
/// supplementary-plane characters (U+10000+): UTF-16 represents them as a
/// surrogate pair starting at 0xD800, which sorts before the U+E000-U+FFFF
/// BMP range, while scalar-value order sorts them after. Canonical bytes
/// must match byte-for-byte across language implementations, so this has to
/// follow the spec's code-unit rule exactly rather than `Ord` for `String`.
fn utf16_key(key: &str) -> Vec<u16> {
    key.encode_utf16().collect()
}

/// Recursively sort every object's keys and leave arrays in declared order.
fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| utf16_key(&a.0).cmp(&utf16_key(&b.0)));
            let mut canonical = serde_json::Map::with_capacity(entries.len());
            for (key, nested) in entries {
                canonical.insert(key, canonicalize_value(nested));
            }
            Value::Object(canonical)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}

/// Produce the canonical UTF-8 byte string for any JSON-shaped value.
///
/// Fails with [`PactError::InvalidValue`] only if `value` cannot round-trip
/// through `serde_json::Value` at all (e.g. a `NaN`/`infinite` float, which
/// has no JSON representation).
pub fn canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let raw = serde_json::to_value(value).map_err(|e| PactError::InvalidValue {
        message: format!("value is not JSON-representable: {e}"),
    })?;
    let canonical = canonicalize_value(raw);
    serde_json::to_string(&canonical).map_err(|e| PactError::InvalidValue {
        message: format!("canonical value failed to serialize: {e}"),
    })
}

/// Canonicalize an already-parsed [`Value`] directly.
pub fn canonicalize(value: Value) -> Value {
    canonicalize_value(value)
}

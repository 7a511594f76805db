//! Evaluation context lookups.

use serde_json::Value;

/// Fetch a dotted field path (`"counterparty.tier"`) out of a context
/// object. Returns `None` if any segment is missing or the path walks
/// through a non-object.
pub fn get_path<'a>(context: &'a Value, field: &str) -> Option<&'a Value> {
    let mut current = context;
    for segment in field.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

//! Conflict resolution for transform outputs.
//!
//! Invoked when a transform targets an internal path that already holds a
//! value, so independent partial transforms can assemble one entity without
//! knowing about each other. One transform can contribute
//! `metadata.provider_ids` while another contributes `metadata.total_tracks`
//! against the same `metadata` path.

use serde_json::Value;

/// Combine an existing value with a newly produced one.
///
/// Rules, in order:
/// 1. both sequences: concatenation, existing first;
/// 2. both mappings: shallow union, new wins on key conflict;
/// 3. otherwise: new replaces existing.
pub fn merge(existing: Value, new: Value) -> Value {
    match (existing, new) {
        (Value::Array(mut left), Value::Array(right)) => {
            left.extend(right);
            Value::Array(left)
        }
        (Value::Object(mut left), Value::Object(right)) => {
            for (key, value) in right {
                left.insert(key, value);
            }
            Value::Object(left)
        }
        (_, new) => new,
    }
}

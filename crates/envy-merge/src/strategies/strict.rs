use serde_json::Value;

use crate::error::{MergeError, MergeResult};
use crate::strategy::ConflictStrategy;

/// The `error` policy: equal values pass through, anything else fails.
///
/// Equality is structural, so two arrays with the same elements are equal.
/// On success the unchanged value is returned.
pub struct Strict;

impl ConflictStrategy for Strict {
    fn resolve(&self, target: &Value, source: &Value, key: &str) -> MergeResult<Value> {
        if target == source {
            Ok(target.clone())
        } else {
            Err(MergeError::conflict(key))
        }
    }
}

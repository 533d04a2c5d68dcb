//! Built-in conflict strategies.

pub mod combine;
pub mod strict;

pub use combine::Combine;
pub use strict::Strict;

use serde_json::Value;

use crate::error::MergeResult;
use crate::strategy::ConflictStrategy;

/// Keeps the target value; the source value is discarded.
pub struct Ours;

impl ConflictStrategy for Ours {
    fn resolve(&self, target: &Value, _source: &Value, _key: &str) -> MergeResult<Value> {
        Ok(target.clone())
    }
}

/// Takes the source value; the target value is discarded.
pub struct Theirs;

impl ConflictStrategy for Theirs {
    fn resolve(&self, _target: &Value, source: &Value, _key: &str) -> MergeResult<Value> {
        Ok(source.clone())
    }
}

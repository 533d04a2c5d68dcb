//! The `combine` policy.
//!
//! Sequences are concatenated (target first, duplicates kept). A scalar
//! target is promoted to a one-element sequence when the source is a
//! sequence. Scalar sources are added:
//!
//! | target  | source                   | result                 |
//! |---------|--------------------------|------------------------|
//! | number  | number                   | arithmetic sum         |
//! | string  | string/number/bool/null  | textual concatenation  |
//! | any scalar | string                | textual concatenation  |
//!
//! Every other pairing is an unresolved conflict.

use serde_json::{Number, Value};

use crate::error::{MergeError, MergeResult};
use crate::strategy::ConflictStrategy;

/// Concatenates sequences and adds scalars.
pub struct Combine;

impl ConflictStrategy for Combine {
    fn resolve(&self, target: &Value, source: &Value, key: &str) -> MergeResult<Value> {
        match source {
            Value::Array(items) => {
                let mut combined = match target {
                    Value::Array(existing) => existing.clone(),
                    other => vec![other.clone()],
                };
                combined.extend(items.iter().cloned());
                Ok(Value::Array(combined))
            }
            _ => add(target, source).ok_or_else(|| MergeError::conflict(key)),
        }
    }
}

fn add(target: &Value, source: &Value) -> Option<Value> {
    match (target, source) {
        (Value::Number(a), Value::Number(b)) => add_numbers(a, b).map(Value::Number),
        (Value::String(a), b) => Some(Value::String(format!("{a}{}", text(b)?))),
        (a, Value::String(b)) => Some(Value::String(format!("{}{b}", text(a)?))),
        _ => None,
    }
}

/// Textual form of a scalar. Containers have none.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn add_numbers(a: &Number, b: &Number) -> Option<Number> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if let Some(sum) = x.checked_add(y) {
            return Some(sum.into());
        }
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        if let Some(sum) = x.checked_add(y) {
            return Some(sum.into());
        }
    }
    // Non-finite sums have no JSON representation.
    Number::from_f64(a.as_f64()? + b.as_f64()?)
}

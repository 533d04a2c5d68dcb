//! Value classification.
//!
//! The engine only cares about three shapes: scalars, keyed containers
//! (plain objects) and ordered sequences. Plain objects are walked; every
//! other value is an atomic leaf handed to the conflict strategy.

use std::fmt;

use serde_json::Value;

/// The concrete JSON kind of a value, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Determine the kind of a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// The merge classification of this kind.
    pub fn class(self) -> ValueClass {
        match self {
            Self::Null | Self::Bool | Self::Number | Self::String => ValueClass::Scalar,
            Self::Array => ValueClass::Sequence,
            Self::Object => ValueClass::PlainObject,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(s)
    }
}

/// How the merge engine treats a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueClass {
    /// Number, string, boolean or null.
    Scalar,
    /// Keyed container; merged key by key.
    PlainObject,
    /// Ordered container; always an atomic leaf.
    Sequence,
}

impl ValueClass {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        ValueKind::of(value).class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_classify_as_scalar() {
        for v in [json!(null), json!(true), json!(1.5), json!("s")] {
            assert_eq!(ValueClass::of(&v), ValueClass::Scalar, "{v}");
        }
    }

    #[test]
    fn containers_classify_by_shape() {
        assert_eq!(ValueClass::of(&json!([1, 2])), ValueClass::Sequence);
        assert_eq!(ValueClass::of(&json!({})), ValueClass::PlainObject);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ValueKind::of(&json!(false)).to_string(), "boolean");
        assert_eq!(ValueKind::of(&json!({"a": 1})).to_string(), "object");
        assert_eq!(ValueKind::of(&json!(null)).to_string(), "null");
    }
}

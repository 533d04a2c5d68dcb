//! Error types for the merge crate.

use std::fmt;

use crate::value::ValueKind;

/// Which of the two merge inputs an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeArgument {
    Target,
    Source,
}

impl fmt::Display for MergeArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target => write!(f, "target"),
            Self::Source => write!(f, "source"),
        }
    }
}

/// Errors that can occur while merging two documents.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MergeError {
    /// A root argument was not a keyed container. Raised before any mutation.
    #[error("{argument} must be an object, found {found}")]
    TypeMismatch {
        argument: MergeArgument,
        found: ValueKind,
    },

    /// The policy identifier did not name a built-in strategy.
    #[error("invalid merge strategy: {0:?}")]
    InvalidStrategy(String),

    /// A strategy refused to reconcile the two values at `key`.
    #[error("Unresolved merge conflict (key={key})")]
    Conflict { key: String },
}

impl MergeError {
    /// Create a conflict error for the given key.
    pub fn conflict(key: impl Into<String>) -> Self {
        Self::Conflict { key: key.into() }
    }

    /// The key a conflict was raised for, if this is a conflict.
    pub fn conflict_key(&self) -> Option<&str> {
        match self {
            Self::Conflict { key } => Some(key),
            _ => None,
        }
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_is_stable() {
        let err = MergeError::conflict("x");
        assert_eq!(err.to_string(), "Unresolved merge conflict (key=x)");
        assert_eq!(err.conflict_key(), Some("x"));
    }

    #[test]
    fn type_mismatch_names_argument() {
        let err = MergeError::TypeMismatch {
            argument: MergeArgument::Source,
            found: ValueKind::Array,
        };
        assert_eq!(err.to_string(), "source must be an object, found array");
        assert_eq!(err.conflict_key(), None);
    }

    #[test]
    fn invalid_strategy_quotes_input() {
        let err = MergeError::InvalidStrategy("newest".into());
        assert_eq!(err.to_string(), "invalid merge strategy: \"newest\"");
    }
}

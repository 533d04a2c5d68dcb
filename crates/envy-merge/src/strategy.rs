//! Conflict strategies and policy resolution.
//!
//! A [`ConflictStrategy`] decides what a key ends up holding when it exists in
//! both documents and at least one side is not a plain object. Callers select
//! one through [`MergeStrategy`], either by naming a built-in policy or by
//! supplying their own function.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MergeError, MergeResult};
use crate::strategies::{Combine, Ours, Strict, Theirs};

/// Resolves a single leaf conflict.
///
/// Implementations receive the current target value, the incoming source
/// value and the key they live under, and return the value to store. An
/// error aborts the whole merge.
///
/// Any `Fn(&Value, &Value, &str) -> MergeResult<Value>` closure is a
/// strategy.
pub trait ConflictStrategy: Send + Sync {
    fn resolve(&self, target: &Value, source: &Value, key: &str) -> MergeResult<Value>;
}

impl<F> ConflictStrategy for F
where
    F: Fn(&Value, &Value, &str) -> MergeResult<Value> + Send + Sync,
{
    fn resolve(&self, target: &Value, source: &Value, key: &str) -> MergeResult<Value> {
        self(target, source, key)
    }
}

/// Identifier of a built-in policy.
///
/// Serializes as the lowercase identifier; deserializes through [`FromStr`],
/// so config files accept any casing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StrategyName {
    /// Keep the target value.
    #[default]
    Ours,
    /// Take the source value.
    Theirs,
    /// Concatenate sequences, add numbers, join strings.
    Combine,
    /// Fail unless both values are equal.
    Error,
}

impl StrategyName {
    /// Every built-in policy, in documentation order.
    pub const ALL: [StrategyName; 4] = [Self::Ours, Self::Theirs, Self::Combine, Self::Error];

    /// The identifier accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ours => "ours",
            Self::Theirs => "theirs",
            Self::Combine => "combine",
            Self::Error => "error",
        }
    }

    /// One-line description for help output.
    pub fn description(self) -> &'static str {
        match self {
            Self::Ours => "keep the target value on conflict",
            Self::Theirs => "take the source value on conflict",
            Self::Combine => "concatenate arrays, add numbers, join strings",
            Self::Error => "fail on any conflicting value",
        }
    }
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StrategyName {
    type Err = MergeError;

    /// Parse a policy identifier. Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MergeError::InvalidStrategy(s.to_string()))
    }
}

impl TryFrom<String> for StrategyName {
    type Error = MergeError;

    fn try_from(s: String) -> Result<Self, <StrategyName as TryFrom<String>>::Error> {
        s.parse()
    }
}

/// The strategy a merge runs with.
#[derive(Clone, Default)]
pub enum MergeStrategy {
    #[default]
    Ours,
    Theirs,
    Combine,
    Error,
    /// A caller-supplied strategy, used verbatim.
    Custom(Arc<dyn ConflictStrategy>),
}

impl MergeStrategy {
    /// Wrap a caller-supplied resolution function.
    pub fn custom<F>(resolve: F) -> Self
    where
        F: Fn(&Value, &Value, &str) -> MergeResult<Value> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(resolve))
    }

    /// Resolve an optional policy identifier. `None` selects `ours`.
    pub fn resolve_policy(policy: Option<&str>) -> MergeResult<Self> {
        match policy {
            Some(name) => name.parse(),
            None => Ok(Self::default()),
        }
    }

    /// The built-in policy this strategy corresponds to, if any.
    pub fn name(&self) -> Option<StrategyName> {
        match self {
            Self::Ours => Some(StrategyName::Ours),
            Self::Theirs => Some(StrategyName::Theirs),
            Self::Combine => Some(StrategyName::Combine),
            Self::Error => Some(StrategyName::Error),
            Self::Custom(_) => None,
        }
    }

    /// The callable that implements this strategy.
    pub fn as_conflict_strategy(&self) -> &dyn ConflictStrategy {
        match self {
            Self::Ours => &Ours,
            Self::Theirs => &Theirs,
            Self::Combine => &Combine,
            Self::Error => &Strict,
            Self::Custom(strategy) => strategy.as_ref(),
        }
    }
}

impl ConflictStrategy for MergeStrategy {
    fn resolve(&self, target: &Value, source: &Value, key: &str) -> MergeResult<Value> {
        self.as_conflict_strategy().resolve(target, source, key)
    }
}

impl From<StrategyName> for MergeStrategy {
    fn from(name: StrategyName) -> Self {
        match name {
            StrategyName::Ours => Self::Ours,
            StrategyName::Theirs => Self::Theirs,
            StrategyName::Combine => Self::Combine,
            StrategyName::Error => Self::Error,
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<StrategyName>().map(Self::from)
    }
}

impl fmt::Debug for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "MergeStrategy({name})"),
            None => write!(f, "MergeStrategy(custom)"),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::strategy::StrategyName;

/// Configuration for a [`MergeEngine`](crate::MergeEngine).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Policy used to resolve leaf conflicts.
    pub strategy: StrategyName,
}

impl MergeConfig {
    /// A configuration selecting the given policy.
    pub fn with_strategy(strategy: StrategyName) -> Self {
        Self { strategy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ours() {
        assert_eq!(MergeConfig::default().strategy, StrategyName::Ours);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: MergeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, MergeConfig::default());
    }

    #[test]
    fn strategy_deserializes_lowercase() {
        let config: MergeConfig = serde_json::from_str(r#"{"strategy": "combine"}"#).unwrap();
        assert_eq!(config.strategy, StrategyName::Combine);
    }

    #[test]
    fn strategy_deserializes_any_case() {
        let config: MergeConfig = serde_json::from_str(r#"{"strategy": "THEIRS"}"#).unwrap();
        assert_eq!(config.strategy, StrategyName::Theirs);
        let config: MergeConfig = serde_json::from_str(r#"{"strategy": "Combine"}"#).unwrap();
        assert_eq!(config.strategy, StrategyName::Combine);
    }
}

//! Deep-merge engine for nested key-value documents.
//!
//! Merges a `source` document into a `target` document in place. Nested
//! objects are merged key by key; every other collision (scalars, arrays, or
//! an object meeting a non-object) is a leaf conflict settled by a
//! [`ConflictStrategy`].
//!
//! # Key Types
//!
//! - [`MergeEngine`] -- Iterative lock-step walk of both documents
//! - [`MergeStrategy`] / [`StrategyName`] -- Built-in policies or a custom function
//! - [`ConflictStrategy`] -- Resolution of a single leaf conflict
//! - [`MergeError`] -- Type mismatch, invalid policy, unresolved conflict
//!
//! # Quick Start
//!
//! ```rust
//! use envy_merge::{merge, MergeStrategy};
//! use serde_json::json;
//!
//! let mut target = json!({"a": 1, "b": {"c": 2}});
//! let source = json!({"a": 2, "b": {"d": 3}, "e": 4});
//!
//! merge(&mut target, &source, MergeStrategy::Theirs).unwrap();
//! assert_eq!(target, json!({"a": 2, "b": {"c": 2, "d": 3}, "e": 4}));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod strategies;
pub mod strategy;
pub mod value;

pub use config::MergeConfig;
pub use engine::{merge, merge_with_policy, merged, MergeEngine, MergeStats};
pub use error::{MergeArgument, MergeError, MergeResult};
pub use strategy::{ConflictStrategy, MergeStrategy, StrategyName};
pub use value::{ValueClass, ValueKind};

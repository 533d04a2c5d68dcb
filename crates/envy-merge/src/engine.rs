//! The merge engine: an iterative, in-place deep merge of two documents.
//!
//! Both roots must be plain objects. The engine walks `source` and `target`
//! in lock-step using an explicit worklist, so arbitrarily deep documents
//! merge without growing the call stack.
//!
//! Traversal is a deterministic pre-order: every key of a node is handled
//! before any of its child objects are visited, child objects are visited in
//! source key order, and each child subtree is finished before its next
//! sibling starts. Custom strategies with side effects observe conflicts in
//! exactly this order.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::MergeConfig;
use crate::error::{MergeArgument, MergeError, MergeResult};
use crate::strategy::{ConflictStrategy, MergeStrategy};
use crate::value::{ValueClass, ValueKind};

type Object = Map<String, Value>;

/// Counters collected during a single merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Object pairs taken off the worklist, the roots included.
    pub nodes_visited: usize,
    /// Leaf conflicts handed to the strategy.
    pub conflicts_resolved: usize,
    /// Keys copied from source because target lacked them.
    pub keys_adopted: usize,
    /// Non-object target values overwritten by an empty object.
    pub values_replaced: usize,
    /// Deepest object level reached; the roots are level 0.
    pub max_depth: usize,
}

impl MergeStats {
    /// Fold the counters of a later merge into these.
    pub fn absorb(&mut self, other: MergeStats) {
        self.nodes_visited += other.nodes_visited;
        self.conflicts_resolved += other.conflicts_resolved;
        self.keys_adopted += other.keys_adopted;
        self.values_replaced += other.values_replaced;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Deep-merges documents with a fixed conflict strategy.
///
/// The engine holds no per-merge state; one engine can serve any number of
/// merges.
#[derive(Clone, Debug, Default)]
pub struct MergeEngine {
    strategy: MergeStrategy,
}

impl MergeEngine {
    /// Create an engine with the given strategy.
    pub fn new(strategy: MergeStrategy) -> Self {
        Self { strategy }
    }

    /// Create an engine from configuration.
    pub fn from_config(config: &MergeConfig) -> Self {
        Self::new(config.strategy.into())
    }

    /// Create an engine from an optional policy identifier.
    ///
    /// `None` selects `ours`. Unknown identifiers fail with
    /// [`MergeError::InvalidStrategy`].
    pub fn from_policy(policy: Option<&str>) -> MergeResult<Self> {
        MergeStrategy::resolve_policy(policy).map(Self::new)
    }

    /// The strategy this engine resolves conflicts with.
    pub fn strategy(&self) -> &MergeStrategy {
        &self.strategy
    }

    /// Merge `source` into `target` in place and return the same `target`.
    ///
    /// `source` is never modified. Keys only present in `target` are left
    /// alone. If the strategy fails part-way, the error is returned and
    /// `target` keeps whatever was merged up to that point; callers needing
    /// all-or-nothing semantics should use [`Self::merged`].
    pub fn merge<'t>(&self, target: &'t mut Value, source: &Value) -> MergeResult<&'t mut Value> {
        self.merge_with_stats(target, source)?;
        Ok(target)
    }

    /// Merge into a copy of `target`, leaving the original untouched.
    ///
    /// The copy is built iteratively, so this is as stack-safe as [`Self::merge`].
    pub fn merged(&self, target: &Value, source: &Value) -> MergeResult<Value> {
        check_roots(target, source)?;
        let mut copy = deep_copy(target);
        self.merge_with_stats(&mut copy, source)?;
        Ok(copy)
    }

    /// Merge `source` into `target` in place, returning traversal counters.
    pub fn merge_with_stats(&self, target: &mut Value, source: &Value) -> MergeResult<MergeStats> {
        let target_kind = ValueKind::of(target);
        let source_kind = ValueKind::of(source);
        let tgt_root = target
            .as_object_mut()
            .ok_or(MergeError::TypeMismatch {
                argument: MergeArgument::Target,
                found: target_kind,
            })?;
        let src_root = source.as_object().ok_or(MergeError::TypeMismatch {
            argument: MergeArgument::Source,
            found: source_kind,
        })?;

        debug!(strategy = ?self.strategy, keys = src_root.len(), "merge started");

        let strategy = self.strategy.as_conflict_strategy();
        let mut stats = MergeStats::default();
        let mut worklist: Vec<(&mut Object, &Object, usize)> = vec![(tgt_root, src_root, 0)];

        while let Some((tgt, src, depth)) = worklist.pop() {
            stats.nodes_visited += 1;
            stats.max_depth = stats.max_depth.max(depth);

            if let Err(e) = merge_node(tgt, src, strategy, &mut stats) {
                debug!(error = %e, depth, "merge aborted; target is partially merged");
                return Err(e);
            }

            if !src.values().any(|v| ValueClass::of(v) == ValueClass::PlainObject) {
                continue;
            }

            // After merge_node every object-valued source key has an object
            // in the target, so each lookup below succeeds.
            let mut children: HashMap<&str, &mut Object> = tgt
                .iter_mut()
                .filter_map(|(key, value)| value.as_object_mut().map(|obj| (key.as_str(), obj)))
                .collect();

            let mark = worklist.len();
            for (key, value) in src {
                let Value::Object(src_child) = value else {
                    continue;
                };
                if let Some(tgt_child) = children.remove(key.as_str()) {
                    worklist.push((tgt_child, src_child, depth + 1));
                }
            }
            // Popped from the end, so reverse to visit in source order.
            worklist[mark..].reverse();
        }

        debug!(
            nodes = stats.nodes_visited,
            conflicts = stats.conflicts_resolved,
            adopted = stats.keys_adopted,
            replaced = stats.values_replaced,
            depth = stats.max_depth,
            "merge complete"
        );
        Ok(stats)
    }
}

/// Handle every key of one source object against its target counterpart.
fn merge_node(
    tgt: &mut Object,
    src: &Object,
    strategy: &dyn ConflictStrategy,
    stats: &mut MergeStats,
) -> MergeResult<()> {
    for (key, incoming) in src {
        match ValueClass::of(incoming) {
            ValueClass::PlainObject => match tgt.get_mut(key) {
                Some(existing) if ValueClass::of(existing) == ValueClass::PlainObject => {}
                Some(existing) => {
                    debug!(
                        key = %key,
                        found = %ValueKind::of(existing),
                        "replacing value with object"
                    );
                    *existing = Value::Object(Object::new());
                    stats.values_replaced += 1;
                }
                None => {
                    tgt.insert(key.clone(), Value::Object(Object::new()));
                }
            },
            ValueClass::Scalar | ValueClass::Sequence => match tgt.get_mut(key) {
                Some(existing) => {
                    let resolved = strategy.resolve(existing, incoming, key)?;
                    trace!(key = %key, "leaf conflict resolved");
                    *existing = resolved;
                    stats.conflicts_resolved += 1;
                }
                None => {
                    tgt.insert(key.clone(), deep_copy(incoming));
                    stats.keys_adopted += 1;
                }
            },
        }
    }
    Ok(())
}

/// Clone a value without recursion. `Value::clone` descends one stack frame
/// per nesting level.
fn deep_copy(value: &Value) -> Value {
    let mut root = Value::Null;
    let mut worklist: Vec<(&mut Value, &Value)> = vec![(&mut root, value)];
    while let Some((dst, src)) = worklist.pop() {
        match src {
            Value::Object(map) => {
                *dst = Value::Object(map.keys().map(|k| (k.clone(), Value::Null)).collect());
                if let Value::Object(shell) = dst {
                    worklist.extend(shell.values_mut().zip(map.values()));
                }
            }
            Value::Array(items) => {
                *dst = Value::Array(vec![Value::Null; items.len()]);
                if let Value::Array(shell) = dst {
                    worklist.extend(shell.iter_mut().zip(items));
                }
            }
            scalar => *dst = scalar.clone(),
        }
    }
    root
}

fn check_roots(target: &Value, source: &Value) -> MergeResult<()> {
    if !target.is_object() {
        return Err(MergeError::TypeMismatch {
            argument: MergeArgument::Target,
            found: ValueKind::of(target),
        });
    }
    if !source.is_object() {
        return Err(MergeError::TypeMismatch {
            argument: MergeArgument::Source,
            found: ValueKind::of(source),
        });
    }
    Ok(())
}

/// Merge `source` into `target` in place with the given strategy.
pub fn merge<'t>(
    target: &'t mut Value,
    source: &Value,
    strategy: MergeStrategy,
) -> MergeResult<&'t mut Value> {
    MergeEngine::new(strategy).merge(target, source)
}

/// Merge `source` into a copy of `target` with the given strategy.
pub fn merged(target: &Value, source: &Value, strategy: MergeStrategy) -> MergeResult<Value> {
    MergeEngine::new(strategy).merged(target, source)
}

/// Merge with a policy given by name, as read from user input.
///
/// The roots are validated first, then the identifier is resolved; both
/// checks happen before `target` is touched.
pub fn merge_with_policy<'t>(
    target: &'t mut Value,
    source: &Value,
    policy: Option<&str>,
) -> MergeResult<&'t mut Value> {
    check_roots(target, source)?;
    MergeEngine::from_policy(policy)?.merge(target, source)
}

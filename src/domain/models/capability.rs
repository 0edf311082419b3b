//! Capability, strategy, parameter, and metric state for one agent.
//!
//! Capability levels move monotonically toward (never above) 1.0 in fixed
//! +0.1 steps and are never decremented. Strategy sets only grow. These
//! two invariants are what the adaptation loop is allowed to rely on.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Size of a single capability/parameter adjustment step.
pub const CAPABILITY_STEP: f64 = 0.1;

/// Capability level above which a capability counts as "acquired".
pub const ACQUIRED_THRESHOLD: f64 = 0.8;

/// Mapping from capability name to level in [0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityStore {
    levels: BTreeMap<String, f64>,
}

impl CapabilityStore {
    /// Seed the store with a fixed domain vocabulary.
    pub fn seeded(seed: &[(&str, f64)]) -> Self {
        Self {
            levels: seed
                .iter()
                .map(|(name, level)| ((*name).to_string(), level.clamp(0.0, 1.0)))
                .collect(),
        }
    }

    /// Current level for a capability; 0.0 when unknown.
    pub fn level(&self, name: &str) -> f64 {
        self.levels.get(name).copied().unwrap_or(0.0)
    }

    /// Raise a capability by one fixed step, clamped to 1.0. Returns the
    /// (before, after) pair. Unknown names are inserted at one step.
    pub fn raise(&mut self, name: &str) -> (f64, f64) {
        let entry = self.levels.entry(name.to_string()).or_insert(0.0);
        let before = *entry;
        *entry = (*entry + CAPABILITY_STEP).min(1.0);
        (before, *entry)
    }

    /// Mean level across all capabilities; 0.0 for an empty store.
    pub fn mean_level(&self) -> f64 {
        if self.levels.is_empty() {
            return 0.0;
        }
        self.levels.values().sum::<f64>() / self.levels.len() as f64
    }

    /// Iterate over (name, level) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.levels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of tracked capabilities.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the store tracks no capabilities.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Strictly additive set of strategy/framework identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySet {
    entries: BTreeSet<String>,
}

impl StrategySet {
    /// Seed the set with initial identifiers.
    pub fn seeded(seed: &[&str]) -> Self {
        Self {
            entries: seed.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Insert an identifier. Returns true when it was new. There is no
    /// removal operation; the set only grows.
    pub fn adopt(&mut self, identifier: &str) -> bool {
        self.entries.insert(identifier.to_string())
    }

    /// Whether the identifier is present.
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains(identifier)
    }

    /// Number of identifiers in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Tunable parameter store mirroring capability updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TunableParameters {
    values: BTreeMap<String, f64>,
}

impl TunableParameters {
    /// Seed with named parameter values.
    pub fn seeded(seed: &[(&str, f64)]) -> Self {
        Self {
            values: seed
                .iter()
                .map(|(name, value)| ((*name).to_string(), value.clamp(0.0, 1.0)))
                .collect(),
        }
    }

    /// Current value; 0.0 when unknown.
    pub fn value(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    /// Raise a parameter by the fixed step, clamped to 1.0.
    pub fn raise(&mut self, name: &str) -> (f64, f64) {
        let entry = self.values.entry(name.to_string()).or_insert(0.0);
        let before = *entry;
        *entry = (*entry + CAPABILITY_STEP).min(1.0);
        (before, *entry)
    }
}

/// Named performance metrics, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    /// Throughput relative to session duration.
    Efficiency,
    /// Tracks final session confidence.
    Accuracy,
    /// Tracks mean capability level.
    Adaptability,
    /// Idea output quality (creative profiles).
    Creativity,
    /// Collaborator engagement rate.
    Collaboration,
    /// Knowledge retained across sessions (learning extra).
    Retention,
    /// Distance from prior outputs (creative extra).
    Originality,
}

impl MetricName {
    /// Stable string tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Efficiency => "efficiency",
            Self::Accuracy => "accuracy",
            Self::Adaptability => "adaptability",
            Self::Creativity => "creativity",
            Self::Collaboration => "collaboration",
            Self::Retention => "retention",
            Self::Originality => "originality",
        }
    }
}

/// Agent-level metric scores, recomputed from session outcomes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    scores: BTreeMap<MetricName, f64>,
}

impl PerformanceMetrics {
    /// Initialize every named metric at the given starting score.
    pub fn seeded(metrics: &[MetricName], initial: f64) -> Self {
        Self {
            scores: metrics
                .iter()
                .map(|m| (*m, initial.clamp(0.0, 1.0)))
                .collect(),
        }
    }

    /// Current score; 0.0 for untracked metrics.
    pub fn score(&self, metric: MetricName) -> f64 {
        self.scores.get(&metric).copied().unwrap_or(0.0)
    }

    /// Set a score, clamped into [0, 1]. Only tracked metrics are updated.
    pub fn set(&mut self, metric: MetricName, value: f64) {
        if let Some(score) = self.scores.get_mut(&metric) {
            *score = value.clamp(0.0, 1.0);
        }
    }

    /// Iterate over (metric, score) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, f64)> + '_ {
        self.scores.iter().map(|(k, v)| (*k, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_raise_converges_to_one() {
        let mut store = CapabilityStore::seeded(&[("logical_reasoning", 0.55)]);
        for _ in 0..20 {
            store.raise("logical_reasoning");
        }
        assert_eq!(store.level("logical_reasoning"), 1.0);
    }

    #[test]
    fn test_capability_raise_is_fixed_step() {
        let mut store = CapabilityStore::seeded(&[("inference", 0.5)]);
        let (before, after) = store.raise("inference");
        assert_eq!(before, 0.5);
        assert!((after - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_strategy_set_only_grows() {
        let mut set = StrategySet::seeded(&["heuristic_pruning"]);
        assert!(set.adopt("cross_validation"));
        assert!(!set.adopt("cross_validation"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_metrics_clamped() {
        let mut metrics = PerformanceMetrics::seeded(&[MetricName::Accuracy], 0.5);
        metrics.set(MetricName::Accuracy, 1.8);
        assert_eq!(metrics.score(MetricName::Accuracy), 1.0);
        // Untracked metrics are not silently created.
        metrics.set(MetricName::Retention, 0.9);
        assert_eq!(metrics.score(MetricName::Retention), 0.0);
    }
}

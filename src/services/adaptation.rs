//! Capability/strategy adaptation loop.
//!
//! Threshold-driven and table-driven: weak metrics map to fixed strategy
//! identifiers and fixed capability/parameter bumps through static
//! per-profile lookup tables. This is table lookup, not search or
//! optimization, and capability levels only ever move up.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::models::{
    CapabilityStore, MetricName, PerformanceMetrics, SpecializationProfile, StrategySet,
    TunableParameters, ACQUIRED_THRESHOLD,
};

/// Which metrics fell below their profile thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    /// Metrics below threshold, with their current scores.
    pub weak: Vec<(MetricName, f64)>,
}

/// One improvement target derived from a weak metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    /// The weak metric category.
    pub category: MetricName,
    /// The threshold it should reach.
    pub target: f64,
}

/// One capability change made by `update_capabilities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDelta {
    /// Capability name.
    pub capability: String,
    /// Level before the bump.
    pub from: f64,
    /// Level after the bump.
    pub to: f64,
}

/// What one `self_improve` pass changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfImprovementReport {
    /// The improvement targets that drove the pass.
    pub improvements: Vec<Improvement>,
    /// Strategy identifiers newly adopted.
    pub strategies_added: Vec<String>,
    /// Capability level changes.
    pub capability_deltas: Vec<CapabilityDelta>,
    /// Capabilities that crossed the acquired threshold this pass.
    pub newly_acquired: Vec<String>,
}

/// The adaptation loop for one specialization profile.
#[derive(Clone, Copy)]
pub struct AdaptationLoop {
    profile: &'static SpecializationProfile,
}

impl AdaptationLoop {
    /// Build the loop over a profile.
    pub fn new(profile: &'static SpecializationProfile) -> Self {
        Self { profile }
    }

    /// Flag metrics below their fixed per-category thresholds.
    pub fn analyze_performance(&self, metrics: &PerformanceMetrics) -> PerformanceAnalysis {
        let weak = self
            .profile
            .metrics
            .iter()
            .filter_map(|metric| {
                let threshold = self.profile.threshold(*metric)?;
                let score = metrics.score(*metric);
                (score < threshold).then_some((*metric, score))
            })
            .collect();
        PerformanceAnalysis { weak }
    }

    /// One improvement entry per weak metric.
    pub fn identify_improvements(&self, analysis: &PerformanceAnalysis) -> Vec<Improvement> {
        analysis
            .weak
            .iter()
            .filter_map(|(metric, _)| {
                self.profile.threshold(*metric).map(|target| Improvement {
                    category: *metric,
                    target,
                })
            })
            .collect()
    }

    /// Insert the fixed strategy identifier for each improvement
    /// category. Idempotent union: repeated calls never remove entries.
    pub fn adapt_strategies(
        &self,
        improvements: &[Improvement],
        strategies: &mut StrategySet,
    ) -> Vec<String> {
        improvements
            .iter()
            .filter_map(|improvement| self.profile.strategy_for(improvement.category))
            .filter(|identifier| strategies.adopt(identifier))
            .map(str::to_string)
            .collect()
    }

    /// Raise the mapped capability one fixed step per improvement.
    pub fn update_capabilities(
        &self,
        improvements: &[Improvement],
        capabilities: &mut CapabilityStore,
    ) -> Vec<CapabilityDelta> {
        improvements
            .iter()
            .filter_map(|improvement| self.profile.capability_for(improvement.category))
            .map(|capability| {
                let (from, to) = capabilities.raise(capability);
                CapabilityDelta {
                    capability: capability.to_string(),
                    from,
                    to,
                }
            })
            .collect()
    }

    /// Mirror the capability update against the tunable parameter store.
    pub fn adjust_parameters(
        &self,
        improvements: &[Improvement],
        parameters: &mut TunableParameters,
    ) {
        for improvement in improvements {
            if let Some(parameter) = self.profile.parameter_for(improvement.category) {
                parameters.raise(parameter);
            }
        }
    }

    /// Compose the four steps in sequence and report the deltas plus any
    /// capability that crossed the acquired threshold.
    pub fn self_improve(
        &self,
        metrics: &PerformanceMetrics,
        capabilities: &mut CapabilityStore,
        strategies: &mut StrategySet,
        parameters: &mut TunableParameters,
    ) -> SelfImprovementReport {
        let analysis = self.analyze_performance(metrics);
        let improvements = self.identify_improvements(&analysis);
        let strategies_added = self.adapt_strategies(&improvements, strategies);
        let capability_deltas = self.update_capabilities(&improvements, capabilities);
        self.adjust_parameters(&improvements, parameters);

        let newly_acquired = capability_deltas
            .iter()
            .filter(|delta| delta.from < ACQUIRED_THRESHOLD && delta.to >= ACQUIRED_THRESHOLD)
            .map(|delta| delta.capability.clone())
            .collect::<Vec<_>>();

        if !improvements.is_empty() {
            info!(
                improvements = improvements.len(),
                strategies = strategies_added.len(),
                acquired = newly_acquired.len(),
                "self-improvement pass applied"
            );
        }

        SelfImprovementReport {
            improvements,
            strategies_added,
            capability_deltas,
            newly_acquired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Specialization;

    fn reasoning_state() -> (
        AdaptationLoop,
        PerformanceMetrics,
        CapabilityStore,
        StrategySet,
        TunableParameters,
    ) {
        let profile = Specialization::Reasoning.profile();
        (
            AdaptationLoop::new(profile),
            PerformanceMetrics::seeded(profile.metrics, 0.5),
            CapabilityStore::seeded(profile.capability_seeds),
            StrategySet::seeded(profile.strategy_seeds),
            TunableParameters::seeded(profile.parameter_seeds),
        )
    }

    #[test]
    fn test_scenario_d_all_weak_metrics_improve() {
        // All metrics at 0.5 sit below every reasoning threshold.
        let (adaptation, metrics, mut capabilities, mut strategies, mut parameters) =
            reasoning_state();

        let report =
            adaptation.self_improve(&metrics, &mut capabilities, &mut strategies, &mut parameters);

        // Reasoning has 4 thresholded categories.
        assert_eq!(report.improvements.len(), 4);
        for delta in &report.capability_deltas {
            assert!((delta.to - delta.from - 0.1).abs() < 1e-9 || delta.to == 1.0);
        }
        assert_eq!(report.strategies_added.len(), 4);
    }

    #[test]
    fn test_no_improvements_when_all_metrics_healthy() {
        let (adaptation, mut metrics, mut capabilities, mut strategies, mut parameters) =
            reasoning_state();
        for metric in Specialization::Reasoning.profile().metrics {
            metrics.set(*metric, 0.95);
        }

        let report =
            adaptation.self_improve(&metrics, &mut capabilities, &mut strategies, &mut parameters);
        assert!(report.improvements.is_empty());
        assert!(report.capability_deltas.is_empty());
    }

    #[test]
    fn test_repeated_updates_converge_to_one() {
        let (adaptation, metrics, mut capabilities, mut strategies, mut parameters) =
            reasoning_state();

        for _ in 0..30 {
            adaptation.self_improve(&metrics, &mut capabilities, &mut strategies, &mut parameters);
        }
        for (_, level) in capabilities.iter() {
            assert!(level <= 1.0);
        }
        assert_eq!(capabilities.level("logical_reasoning"), 1.0);
    }

    #[test]
    fn test_strategy_adoption_is_idempotent_union() {
        let (adaptation, metrics, mut capabilities, mut strategies, mut parameters) =
            reasoning_state();

        adaptation.self_improve(&metrics, &mut capabilities, &mut strategies, &mut parameters);
        let after_first = strategies.len();
        let report =
            adaptation.self_improve(&metrics, &mut capabilities, &mut strategies, &mut parameters);
        assert_eq!(strategies.len(), after_first);
        assert!(report.strategies_added.is_empty());
    }

    #[test]
    fn test_newly_acquired_reported_at_threshold_crossing() {
        let (adaptation, metrics, mut capabilities, mut strategies, mut parameters) =
            reasoning_state();

        let mut acquired = Vec::new();
        for _ in 0..5 {
            let report = adaptation.self_improve(
                &metrics,
                &mut capabilities,
                &mut strategies,
                &mut parameters,
            );
            acquired.extend(report.newly_acquired);
        }
        // logical_reasoning starts at 0.6 and crosses 0.8 on the second pass.
        assert!(acquired.contains(&"logical_reasoning".to_string()));
        // Each capability is reported as acquired at most once.
        let unique: std::collections::BTreeSet<_> = acquired.iter().collect();
        assert_eq!(unique.len(), acquired.len());
    }

    #[test]
    fn test_parameters_mirror_capability_bumps() {
        let (adaptation, metrics, mut capabilities, mut strategies, mut parameters) =
            reasoning_state();
        let before = parameters.value("inference_depth");
        adaptation.self_improve(&metrics, &mut capabilities, &mut strategies, &mut parameters);
        assert!(parameters.value("inference_depth") > before);
    }
}

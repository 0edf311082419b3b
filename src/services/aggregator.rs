//! Rolls session outcomes into agent-level named metrics.
//!
//! Deterministic exponential-moving updates; every score stays in [0, 1].

use crate::domain::models::{
    CapabilityStore, MetricName, PerformanceMetrics, SessionOutcome, Specialization,
};

/// Weight given to history when blending in a new observation.
const CARRY: f64 = 0.8;
/// Weight given to the new observation.
const BLEND: f64 = 0.2;

/// Session-outcome metric aggregator for one specialization.
#[derive(Clone, Copy)]
pub struct PerformanceAggregator {
    specialization: Specialization,
}

impl PerformanceAggregator {
    /// Build an aggregator for a specialization.
    pub fn new(specialization: Specialization) -> Self {
        Self { specialization }
    }

    /// Blend one session outcome into the agent metrics.
    ///
    /// Accuracy tracks final confidence, efficiency tracks duration,
    /// adaptability tracks the mean capability level, and the
    /// specialization extras are nudged from session signals.
    pub fn record_outcome(
        &self,
        metrics: &mut PerformanceMetrics,
        outcome: &SessionOutcome,
        capabilities: &CapabilityStore,
        collaborator_engaged: bool,
        idea_count: Option<usize>,
    ) {
        blend(metrics, MetricName::Accuracy, outcome.confidence);

        // Sub-second sessions score near 1.0; the score halves every
        // extra ten seconds of wall-clock time.
        let efficiency_obs = 1.0 / (1.0 + outcome.duration_seconds / 10.0);
        blend(metrics, MetricName::Efficiency, efficiency_obs);

        blend(metrics, MetricName::Adaptability, capabilities.mean_level());

        let collaboration_obs = if collaborator_engaged { 1.0 } else { 0.0 };
        blend(metrics, MetricName::Collaboration, collaboration_obs);

        match self.specialization {
            Specialization::Creative => {
                // Idea output in 2..=6 maps onto [0.33, 1.0].
                if let Some(count) = idea_count {
                    let idea_obs = (count as f64 / 6.0).min(1.0);
                    blend(metrics, MetricName::Creativity, idea_obs);
                    blend(metrics, MetricName::Originality, outcome.confidence);
                }
            }
            Specialization::Learning => {
                // Retention tracks how much confidence survives a session.
                blend(metrics, MetricName::Retention, outcome.confidence);
            }
            Specialization::Reasoning => {
                blend(metrics, MetricName::Creativity, outcome.confidence * 0.5);
            }
        }
    }
}

fn blend(metrics: &mut PerformanceMetrics, metric: MetricName, observation: f64) {
    let current = metrics.score(metric);
    metrics.set(metric, CARRY * current + BLEND * observation.clamp(0.0, 1.0));
}

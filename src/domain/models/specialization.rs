//! Specialization profiles.
//!
//! The system this core models had three near-duplicate agent subclasses
//! (reasoning, learning, creative) sharing one pipeline shape. Here a
//! single orchestration engine is parameterized by a per-specialization
//! profile: the closed task-type set and its tie-break order, the marker
//! and domain vocabularies, the method table, capability seeds, metric
//! thresholds, and the static category-to-strategy lookup tables. All of
//! it is data; none of it is search or optimization.

use serde::{Deserialize, Serialize};

use super::capability::MetricName;
use super::input::TaskInput;
use super::task::TaskType;

/// The three agent specializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    /// Logical inference over premises.
    Reasoning,
    /// Pattern acquisition from examples.
    Learning,
    /// Idea generation and recombination.
    Creative,
}

impl Specialization {
    /// Stable string tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reasoning => "reasoning",
            Self::Learning => "learning",
            Self::Creative => "creative",
        }
    }

    /// The static profile for this specialization.
    pub fn profile(&self) -> &'static SpecializationProfile {
        match self {
            Self::Reasoning => &REASONING,
            Self::Learning => &LEARNING,
            Self::Creative => &CREATIVE,
        }
    }
}

/// A factor the priority scorer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityFactor {
    /// The task's computed complexity score.
    Complexity,
    /// A named context factor; missing values default to 0.5.
    Context(&'static str),
}

/// How a classification rule decides whether an input matches.
#[derive(Debug, Clone, Copy)]
pub enum RuleMatcher {
    /// Text input contains any of these keywords (case-insensitive).
    Keyword(&'static [&'static str]),
    /// Input is a sequence.
    SequenceShape,
    /// Input is a structured record with at least this many keys.
    StructuredKeys(usize),
}

impl RuleMatcher {
    /// Whether the input satisfies this matcher.
    pub fn matches(&self, input: &TaskInput) -> bool {
        match self {
            Self::Keyword(keywords) => input.as_text().is_some_and(|text| {
                let lower = text.to_lowercase();
                keywords.iter().any(|k| lower.contains(k))
            }),
            Self::SequenceShape => matches!(input, TaskInput::Sequence(_)),
            Self::StructuredKeys(min) => {
                matches!(input, TaskInput::Structured(fields) if fields.len() >= *min)
            }
        }
    }
}

/// One ordered classification rule: first match in profile order wins.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    /// The type this rule classifies into.
    pub task_type: TaskType,
    /// The condition under which it fires.
    pub matcher: RuleMatcher,
}

/// Per-specialization vocabulary, tables, and thresholds.
///
/// Rule order is the tie-break policy and must be preserved verbatim per
/// specialization: reasoning checks deduction before creative problem
/// solving, so an input plausibly both is classified as deduction.
pub struct SpecializationProfile {
    /// Which specialization this profile describes.
    pub specialization: Specialization,
    /// Ordered classification rules; first match wins.
    pub type_rules: &'static [TypeRule],
    /// Returned when no rule fires.
    pub default_type: TaskType,
    /// Terms whose presence raises text complexity.
    pub domain_terms: &'static [&'static str],
    /// Surface markers the pattern-recognition stage scans for.
    pub markers: &'static [&'static str],
    /// Task type to method label. Lookup and bookkeeping only.
    pub methods: &'static [(TaskType, &'static str)],
    /// Task type to expected-output descriptor.
    pub expected_outputs: &'static [(TaskType, &'static str)],
    /// Capability vocabulary and seed levels.
    pub capability_seeds: &'static [(&'static str, f64)],
    /// Initial strategy identifiers.
    pub strategy_seeds: &'static [&'static str],
    /// Tunable parameter vocabulary and seed values.
    pub parameter_seeds: &'static [(&'static str, f64)],
    /// Metrics this specialization tracks.
    pub metrics: &'static [MetricName],
    /// Per-metric improvement thresholds (0.6 - 0.8 band).
    pub thresholds: &'static [(MetricName, f64)],
    /// Metric category to the strategy adopted when it is weak.
    pub strategy_table: &'static [(MetricName, &'static str)],
    /// Metric category to the capability raised when it is weak.
    pub capability_table: &'static [(MetricName, &'static str)],
    /// Metric category to the parameter adjusted when it is weak.
    pub parameter_table: &'static [(MetricName, &'static str)],
    /// Fixed priority weights; they sum to 1.0.
    pub priority_weights: &'static [(PriorityFactor, f64)],
}

impl SpecializationProfile {
    /// Classify an input: first matching rule wins, else the default type.
    pub fn classify(&self, input: &TaskInput) -> TaskType {
        self.type_rules
            .iter()
            .find(|rule| rule.matcher.matches(input))
            .map_or(self.default_type, |rule| rule.task_type)
    }

    /// Method label for a task type. Every type in the profile's closed
    /// set has an entry; unknown types fall back to the default's label.
    pub fn method_label(&self, task_type: TaskType) -> &'static str {
        lookup(self.methods, task_type)
            .unwrap_or_else(|| lookup(self.methods, self.default_type).unwrap_or("unspecified"))
    }

    /// Expected-output descriptor for a task type.
    pub fn expected_output(&self, task_type: TaskType) -> &'static str {
        lookup(self.expected_outputs, task_type).unwrap_or("result")
    }

    /// Improvement threshold for a metric; metrics without an entry never
    /// flag as weak.
    pub fn threshold(&self, metric: MetricName) -> Option<f64> {
        lookup(self.thresholds, metric)
    }

    /// Strategy adopted when the given metric is weak.
    pub fn strategy_for(&self, metric: MetricName) -> Option<&'static str> {
        lookup(self.strategy_table, metric)
    }

    /// Capability raised when the given metric is weak.
    pub fn capability_for(&self, metric: MetricName) -> Option<&'static str> {
        lookup(self.capability_table, metric)
    }

    /// Parameter adjusted when the given metric is weak.
    pub fn parameter_for(&self, metric: MetricName) -> Option<&'static str> {
        lookup(self.parameter_table, metric)
    }
}

fn lookup<K: PartialEq, V: Copy>(table: &[(K, V)], key: K) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

static REASONING: SpecializationProfile = SpecializationProfile {
    specialization: Specialization::Reasoning,
    // Deduction is checked before creative problem solving: when both are
    // plausible, deduction wins.
    type_rules: &[
        TypeRule {
            task_type: TaskType::Deduction,
            matcher: RuleMatcher::Keyword(&["prove", "therefore", "deduce", "if ", "implies"]),
        },
        TypeRule {
            task_type: TaskType::Induction,
            matcher: RuleMatcher::Keyword(&["pattern", "trend", "generalize", "instances"]),
        },
        TypeRule {
            task_type: TaskType::Abduction,
            matcher: RuleMatcher::Keyword(&["explain", "why", "cause", "hypothesis"]),
        },
        TypeRule {
            task_type: TaskType::Analogy,
            matcher: RuleMatcher::Keyword(&["like", "similar", "analogy", "compare"]),
        },
        TypeRule {
            task_type: TaskType::CreativeProblemSolving,
            matcher: RuleMatcher::Keyword(&["imagine", "invent", "novel", "creative"]),
        },
        TypeRule {
            task_type: TaskType::Induction,
            matcher: RuleMatcher::SequenceShape,
        },
        TypeRule {
            task_type: TaskType::Abduction,
            matcher: RuleMatcher::StructuredKeys(3),
        },
    ],
    default_type: TaskType::Deduction,
    domain_terms: &["premise", "conclusion", "logic", "valid", "argument", "inference"],
    markers: &["if", "then", "because", "therefore", "all", "some", "not"],
    methods: &[
        (TaskType::Deduction, "syllogistic reasoning"),
        (TaskType::Induction, "generalization from observed instances"),
        (TaskType::Abduction, "inference to the best explanation"),
        (TaskType::Analogy, "structural mapping"),
        (TaskType::CreativeProblemSolving, "lateral recombination"),
    ],
    expected_outputs: &[
        (TaskType::Deduction, "conclusion"),
        (TaskType::Induction, "generalization"),
        (TaskType::Abduction, "explanation"),
        (TaskType::Analogy, "mapping"),
        (TaskType::CreativeProblemSolving, "solution"),
    ],
    capability_seeds: &[
        ("logical_reasoning", 0.6),
        ("pattern_recognition", 0.55),
        ("problem_solving", 0.5),
        ("analytical_thinking", 0.6),
        ("inference", 0.5),
    ],
    strategy_seeds: &["stepwise_derivation"],
    parameter_seeds: &[
        ("premise_weight", 0.5),
        ("inference_depth", 0.5),
        ("counterexample_search", 0.4),
    ],
    metrics: &[
        MetricName::Efficiency,
        MetricName::Accuracy,
        MetricName::Adaptability,
        MetricName::Creativity,
        MetricName::Collaboration,
    ],
    thresholds: &[
        (MetricName::Efficiency, 0.7),
        (MetricName::Accuracy, 0.8),
        (MetricName::Adaptability, 0.6),
        (MetricName::Collaboration, 0.6),
    ],
    strategy_table: &[
        (MetricName::Efficiency, "heuristic_pruning"),
        (MetricName::Accuracy, "premise_consistency_check"),
        (MetricName::Adaptability, "frame_shifting"),
        (MetricName::Collaboration, "argument_externalization"),
    ],
    capability_table: &[
        (MetricName::Efficiency, "problem_solving"),
        (MetricName::Accuracy, "logical_reasoning"),
        (MetricName::Adaptability, "analytical_thinking"),
        (MetricName::Collaboration, "inference"),
    ],
    parameter_table: &[
        (MetricName::Efficiency, "inference_depth"),
        (MetricName::Accuracy, "premise_weight"),
        (MetricName::Adaptability, "counterexample_search"),
        (MetricName::Collaboration, "premise_weight"),
    ],
    priority_weights: &[
        (PriorityFactor::Complexity, 0.4),
        (PriorityFactor::Context("urgency"), 0.3),
        (PriorityFactor::Context("importance"), 0.3),
    ],
};

static LEARNING: SpecializationProfile = SpecializationProfile {
    specialization: Specialization::Learning,
    type_rules: &[
        TypeRule {
            task_type: TaskType::Classification,
            matcher: RuleMatcher::Keyword(&["classify", "label", "categorize", "which kind"]),
        },
        TypeRule {
            task_type: TaskType::Clustering,
            matcher: RuleMatcher::Keyword(&["group", "cluster", "similar", "organize"]),
        },
        TypeRule {
            task_type: TaskType::Prediction,
            matcher: RuleMatcher::Keyword(&["predict", "next", "forecast", "future"]),
        },
        TypeRule {
            task_type: TaskType::Association,
            matcher: RuleMatcher::Keyword(&["associate", "relate", "together", "co-occur"]),
        },
        TypeRule {
            task_type: TaskType::Reinforcement,
            matcher: RuleMatcher::Keyword(&["reward", "penalty", "trial", "feedback"]),
        },
        TypeRule {
            task_type: TaskType::Prediction,
            matcher: RuleMatcher::SequenceShape,
        },
        TypeRule {
            task_type: TaskType::Association,
            matcher: RuleMatcher::StructuredKeys(2),
        },
    ],
    default_type: TaskType::Classification,
    domain_terms: &["example", "training", "feature", "label", "accuracy", "model"],
    markers: &["example", "sample", "label", "category", "trend", "repeat"],
    methods: &[
        (TaskType::Classification, "supervised label induction"),
        (TaskType::Clustering, "similarity grouping"),
        (TaskType::Prediction, "sequence extrapolation"),
        (TaskType::Association, "co-occurrence mining"),
        (TaskType::Reinforcement, "reward-guided adjustment"),
    ],
    expected_outputs: &[
        (TaskType::Classification, "labels"),
        (TaskType::Clustering, "groups"),
        (TaskType::Prediction, "forecast"),
        (TaskType::Association, "associations"),
        (TaskType::Reinforcement, "policy_update"),
    ],
    capability_seeds: &[
        ("knowledge_acquisition", 0.6),
        ("pattern_learning", 0.55),
        ("generalization", 0.5),
        ("retention", 0.5),
        ("transfer", 0.45),
    ],
    strategy_seeds: &["incremental_update"],
    parameter_seeds: &[
        ("learning_rate", 0.5),
        ("memory_span", 0.5),
        ("exploration_rate", 0.4),
    ],
    metrics: &[
        MetricName::Efficiency,
        MetricName::Accuracy,
        MetricName::Adaptability,
        MetricName::Collaboration,
        MetricName::Retention,
    ],
    thresholds: &[
        (MetricName::Efficiency, 0.65),
        (MetricName::Accuracy, 0.75),
        (MetricName::Adaptability, 0.7),
        (MetricName::Retention, 0.7),
    ],
    strategy_table: &[
        (MetricName::Efficiency, "batch_consolidation"),
        (MetricName::Accuracy, "example_replay"),
        (MetricName::Adaptability, "curriculum_reordering"),
        (MetricName::Retention, "spaced_rehearsal"),
    ],
    capability_table: &[
        (MetricName::Efficiency, "knowledge_acquisition"),
        (MetricName::Accuracy, "pattern_learning"),
        (MetricName::Adaptability, "generalization"),
        (MetricName::Retention, "retention"),
    ],
    parameter_table: &[
        (MetricName::Efficiency, "learning_rate"),
        (MetricName::Accuracy, "learning_rate"),
        (MetricName::Adaptability, "exploration_rate"),
        (MetricName::Retention, "memory_span"),
    ],
    priority_weights: &[
        (PriorityFactor::Complexity, 0.3),
        (PriorityFactor::Context("urgency"), 0.2),
        (PriorityFactor::Context("importance"), 0.2),
        (PriorityFactor::Context("novelty"), 0.15),
        (PriorityFactor::Context("applicability"), 0.15),
    ],
};

static CREATIVE: SpecializationProfile = SpecializationProfile {
    specialization: Specialization::Creative,
    type_rules: &[
        TypeRule {
            task_type: TaskType::Ideation,
            matcher: RuleMatcher::Keyword(&["brainstorm", "ideas", "generate", "suggest"]),
        },
        TypeRule {
            task_type: TaskType::Synthesis,
            matcher: RuleMatcher::Keyword(&["combine", "merge", "blend", "synthesize"]),
        },
        TypeRule {
            task_type: TaskType::Divergent,
            matcher: RuleMatcher::Keyword(&["alternative", "different", "unusual", "unexpected"]),
        },
        TypeRule {
            task_type: TaskType::Transformation,
            matcher: RuleMatcher::Keyword(&["transform", "reimagine", "reframe", "adapt"]),
        },
        TypeRule {
            task_type: TaskType::Elaboration,
            matcher: RuleMatcher::Keyword(&["expand", "detail", "elaborate", "develop"]),
        },
        TypeRule {
            task_type: TaskType::Synthesis,
            matcher: RuleMatcher::SequenceShape,
        },
        TypeRule {
            task_type: TaskType::Transformation,
            matcher: RuleMatcher::StructuredKeys(2),
        },
    ],
    default_type: TaskType::Ideation,
    domain_terms: &["idea", "concept", "design", "original", "metaphor", "style"],
    markers: &["what if", "could", "imagine", "new", "mix", "instead"],
    methods: &[
        (TaskType::Ideation, "free association"),
        (TaskType::Synthesis, "conceptual blending"),
        (TaskType::Divergent, "constraint relaxation"),
        (TaskType::Transformation, "perspective inversion"),
        (TaskType::Elaboration, "detail expansion"),
    ],
    expected_outputs: &[
        (TaskType::Ideation, "idea_list"),
        (TaskType::Synthesis, "blend"),
        (TaskType::Divergent, "alternatives"),
        (TaskType::Transformation, "reframing"),
        (TaskType::Elaboration, "expanded_concept"),
    ],
    capability_seeds: &[
        ("idea_generation", 0.6),
        ("conceptual_blending", 0.5),
        ("originality", 0.5),
        ("flexibility", 0.55),
        ("elaboration", 0.5),
    ],
    strategy_seeds: &["free_association"],
    parameter_seeds: &[
        ("divergence", 0.5),
        ("association_distance", 0.5),
        ("refinement_passes", 0.4),
    ],
    metrics: &[
        MetricName::Efficiency,
        MetricName::Accuracy,
        MetricName::Adaptability,
        MetricName::Creativity,
        MetricName::Originality,
    ],
    thresholds: &[
        (MetricName::Efficiency, 0.6),
        (MetricName::Adaptability, 0.65),
        (MetricName::Creativity, 0.75),
        (MetricName::Originality, 0.7),
    ],
    strategy_table: &[
        (MetricName::Efficiency, "idea_batching"),
        (MetricName::Adaptability, "medium_switching"),
        (MetricName::Creativity, "random_stimulus_injection"),
        (MetricName::Originality, "remote_association"),
    ],
    capability_table: &[
        (MetricName::Efficiency, "idea_generation"),
        (MetricName::Adaptability, "flexibility"),
        (MetricName::Creativity, "conceptual_blending"),
        (MetricName::Originality, "originality"),
    ],
    parameter_table: &[
        (MetricName::Efficiency, "refinement_passes"),
        (MetricName::Adaptability, "divergence"),
        (MetricName::Creativity, "association_distance"),
        (MetricName::Originality, "association_distance"),
    ],
    priority_weights: &[
        (PriorityFactor::Complexity, 0.35),
        (PriorityFactor::Context("urgency"), 0.2),
        (PriorityFactor::Context("importance"), 0.25),
        (PriorityFactor::Context("resource_availability"), 0.2),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_weights_sum_to_one() {
        for spec in [
            Specialization::Reasoning,
            Specialization::Learning,
            Specialization::Creative,
        ] {
            let total: f64 = spec.profile().priority_weights.iter().map(|(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-9, "{:?} weights sum to {total}", spec);
        }
    }

    #[test]
    fn test_reasoning_favors_deduction_over_creative() {
        // Plausibly both deduction and creative; rule order decides.
        let input = TaskInput::from("prove this novel creative conjecture");
        let task_type = Specialization::Reasoning.profile().classify(&input);
        assert_eq!(task_type, TaskType::Deduction);
    }

    #[test]
    fn test_default_type_when_nothing_matches() {
        let input = TaskInput::from("simple test");
        assert_eq!(
            Specialization::Reasoning.profile().classify(&input),
            TaskType::Deduction
        );
        assert_eq!(
            Specialization::Learning.profile().classify(&input),
            TaskType::Classification
        );
        assert_eq!(
            Specialization::Creative.profile().classify(&input),
            TaskType::Ideation
        );
    }

    #[test]
    fn test_sequence_shape_rules() {
        let input = TaskInput::Sequence(vec![TaskInput::from("a"), TaskInput::from("b")]);
        assert_eq!(
            Specialization::Reasoning.profile().classify(&input),
            TaskType::Induction
        );
        assert_eq!(
            Specialization::Learning.profile().classify(&input),
            TaskType::Prediction
        );
    }

    #[test]
    fn test_every_profile_type_has_a_method() {
        for spec in [
            Specialization::Reasoning,
            Specialization::Learning,
            Specialization::Creative,
        ] {
            let profile = spec.profile();
            for rule in profile.type_rules {
                assert_ne!(profile.method_label(rule.task_type), "unspecified");
            }
        }
    }

    #[test]
    fn test_thresholds_in_expected_band() {
        for spec in [
            Specialization::Reasoning,
            Specialization::Learning,
            Specialization::Creative,
        ] {
            for (metric, threshold) in spec.profile().thresholds {
                assert!(
                    (0.6..=0.8).contains(threshold),
                    "{:?}/{:?} threshold {threshold} out of band",
                    spec,
                    metric
                );
            }
        }
    }
}

//! Task domain model.
//!
//! A task is a classified, scored unit of work derived from raw input.
//! Tasks are created once per orchestration call and never mutated after
//! construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::input::TaskInput;

/// Domain-specific task type. Each specialization classifies into its own
/// closed subset of these; the subset and its tie-break order live in the
/// specialization profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    // Reasoning specialization
    /// Derive conclusions from premises.
    Deduction,
    /// Generalize from observed instances.
    Induction,
    /// Infer the best explanation.
    Abduction,
    /// Map structure between domains.
    Analogy,
    /// Open-ended problem solving.
    CreativeProblemSolving,

    // Learning specialization
    /// Assign labels to inputs.
    Classification,
    /// Group by similarity.
    Clustering,
    /// Extrapolate a sequence.
    Prediction,
    /// Mine co-occurrences.
    Association,
    /// Adjust behavior from reward.
    Reinforcement,

    // Creative specialization
    /// Generate candidate ideas.
    Ideation,
    /// Blend concepts into a new whole.
    Synthesis,
    /// Explore away from constraints.
    Divergent,
    /// Reframe an existing concept.
    Transformation,
    /// Expand an idea with detail.
    Elaboration,
}

impl TaskType {
    /// Stable string tag, suitable for metadata maps and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deduction => "deduction",
            Self::Induction => "induction",
            Self::Abduction => "abduction",
            Self::Analogy => "analogy",
            Self::CreativeProblemSolving => "creative_problem_solving",
            Self::Classification => "classification",
            Self::Clustering => "clustering",
            Self::Prediction => "prediction",
            Self::Association => "association",
            Self::Reinforcement => "reinforcement",
            Self::Ideation => "ideation",
            Self::Synthesis => "synthesis",
            Self::Divergent => "divergent",
            Self::Transformation => "transformation",
            Self::Elaboration => "elaboration",
        }
    }
}

/// Kind of constraint attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Bounded wall-clock budget.
    TimeLimit,
    /// Only the named resources may be used.
    ResourceOnly,
    /// The named approach or material must be avoided.
    Avoidance,
    /// Caller-supplied constraint outside the parsed templates.
    Custom,
}

/// A single constraint descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// What kind of restriction this is.
    pub kind: ConstraintKind,
    /// Constraint payload (duration text, resource list, avoided subject).
    pub value: String,
}

impl Constraint {
    /// Construct a constraint of the given kind.
    pub fn new(kind: ConstraintKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// What shape of output the caller expects back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedOutput {
    /// Free-form descriptor, e.g. "conclusion", "idea_list".
    pub descriptor: String,
}

/// Context supplied by the caller alongside the raw input.
///
/// Urgency, importance and the specialization-specific factors are read
/// from here by the priority scorer; missing fields default to 0.5.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskContext {
    /// Named scalar factors (urgency, importance, novelty, ...), each
    /// expected in [0, 1].
    pub factors: BTreeMap<String, f64>,
    /// Explicit constraints; these win over text-parsed ones.
    pub constraints: BTreeMap<String, Constraint>,
    /// Free-form extra data carried into session metadata.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TaskContext {
    /// Read a named factor, defaulting to 0.5 when absent.
    pub fn factor(&self, name: &str) -> f64 {
        self.factors.get(name).copied().unwrap_or(0.5)
    }

    /// Set a named factor (builder style).
    pub fn with_factor(mut self, name: impl Into<String>, value: f64) -> Self {
        self.factors.insert(name.into(), value);
        self
    }

    /// Attach an explicit constraint (builder style).
    pub fn with_constraint(mut self, key: impl Into<String>, constraint: Constraint) -> Self {
        self.constraints.insert(key.into(), constraint);
        self
    }
}

/// A classified, scored unit of work. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier.
    pub id: Uuid,
    /// Classified task type.
    pub task_type: TaskType,
    /// The raw input the task was built from.
    pub input: TaskInput,
    /// Caller-supplied context.
    pub context: TaskContext,
    /// Constraints, merged from context and parsed text.
    pub constraints: BTreeMap<String, Constraint>,
    /// Expected output descriptor.
    pub expected_output: ExpectedOutput,
    /// Complexity score in [0, 1].
    pub complexity: f64,
    /// Priority score in [0, 1].
    pub priority: f64,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Assemble a task from classifier outputs. Scores are clamped into
    /// [0, 1] so a task can never carry an out-of-range value.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        task_type: TaskType,
        input: TaskInput,
        context: TaskContext,
        constraints: BTreeMap<String, Constraint>,
        expected_output: ExpectedOutput,
        complexity: f64,
        priority: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_type,
            input,
            context,
            constraints,
            expected_output,
            complexity: complexity.clamp(0.0, 1.0),
            priority: priority.clamp(0.0, 1.0),
            created_at: Utc::now(),
        }
    }
}

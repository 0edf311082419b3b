//! Session domain model.
//!
//! A session is the mutable execution record tracking one task's run
//! through the confidence-decay pipeline. Exactly one session exists per
//! task; it is opened, mutated in place while the pipeline runs, then
//! closed exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The five fixed pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Stage 1: record input shape and complexity.
    InputAnalysis,
    /// Stage 2: scan for surface lexical/structural markers.
    PatternRecognition,
    /// Stage 3: look up and record the domain method.
    DomainProcessing,
    /// Stage 4: assemble the result summary.
    Synthesis,
    /// Stage 5: check step-confidence variance.
    Validation,
}

impl PipelineStage {
    /// All stages in execution order.
    pub const ORDER: [Self; 5] = [
        Self::InputAnalysis,
        Self::PatternRecognition,
        Self::DomainProcessing,
        Self::Synthesis,
        Self::Validation,
    ];

    /// One-based stage index (1..=5).
    pub fn index(&self) -> u8 {
        match self {
            Self::InputAnalysis => 1,
            Self::PatternRecognition => 2,
            Self::DomainProcessing => 3,
            Self::Synthesis => 4,
            Self::Validation => 5,
        }
    }

    /// Human-readable stage name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputAnalysis => "input_analysis",
            Self::PatternRecognition => "pattern_recognition",
            Self::DomainProcessing => "domain_processing",
            Self::Synthesis => "synthesis",
            Self::Validation => "validation",
        }
    }
}

/// One stage's output and confidence within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Which stage produced this record.
    pub stage: PipelineStage,
    /// What the stage did, in words.
    pub description: String,
    /// Per-stage confidence. By construction in [0, 0.9].
    pub confidence: f64,
    /// Stage-specific metadata.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl StepRecord {
    /// Build a step record, clamping confidence into the stage ceiling.
    pub fn new(stage: PipelineStage, description: impl Into<String>, confidence: f64) -> Self {
        Self {
            stage,
            description: description.into(),
            confidence: confidence.clamp(0.0, 0.9),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry (builder style).
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// The mutable execution record for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The task this session executes. One session per task.
    pub task_id: Uuid,
    /// When the session was opened.
    pub started_at: DateTime<Utc>,
    /// When the session was closed, if it has been.
    pub ended_at: Option<DateTime<Utc>>,
    /// Ordered step records appended by the pipeline.
    pub steps: Vec<StepRecord>,
    /// Intermediate results recorded between stages.
    pub intermediate: Vec<serde_json::Value>,
    /// Final result copied in at close time.
    pub final_result: Option<serde_json::Value>,
    /// Final confidence in [0, 1]; zero until close.
    pub confidence: f64,
    /// Metadata snapshot (task type, complexity, priority) plus whatever
    /// the pipeline attaches.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Session {
    /// Open a session for a task with an empty step log and zero confidence.
    pub fn open(task_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            started_at: Utc::now(),
            ended_at: None,
            steps: Vec::new(),
            intermediate: Vec::new(),
            final_result: None,
            confidence: 0.0,
            metadata: BTreeMap::new(),
        }
    }

    /// Append a step record.
    pub fn record_step(&mut self, step: StepRecord) {
        self.steps.push(step);
    }

    /// Record an intermediate result.
    pub fn record_intermediate(&mut self, value: serde_json::Value) {
        self.intermediate.push(value);
    }

    /// Whether the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Wall-clock duration in seconds, up to now for open sessions.
    pub fn duration_seconds(&self) -> f64 {
        let end = self.ended_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Compact record of a completed session, appended to the agent history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// The closed session's id.
    pub session_id: Uuid,
    /// The task the session executed.
    pub task_id: Uuid,
    /// Task type tag at classification time.
    pub task_type: String,
    /// Final confidence in [0, 1].
    pub confidence: f64,
    /// Final result payload.
    pub result: serde_json::Value,
    /// Session duration in seconds.
    pub duration_seconds: f64,
    /// When the session was closed.
    pub closed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_session_is_empty() {
        let session = Session::open(Uuid::new_v4());
        assert!(session.steps.is_empty());
        assert_eq!(session.confidence, 0.0);
        assert!(!session.is_closed());
    }

    #[test]
    fn test_step_confidence_never_exceeds_ceiling() {
        let step = StepRecord::new(PipelineStage::InputAnalysis, "analyzed", 1.5);
        assert_eq!(step.confidence, 0.9);
        let step = StepRecord::new(PipelineStage::Validation, "validated", -0.2);
        assert_eq!(step.confidence, 0.0);
    }

    #[test]
    fn test_stage_order_indices() {
        for (i, stage) in PipelineStage::ORDER.iter().enumerate() {
            assert_eq!(stage.index() as usize, i + 1);
        }
    }

    #[test]
    fn test_record_step_preserves_order() {
        let mut session = Session::open(Uuid::new_v4());
        for stage in PipelineStage::ORDER {
            session.record_step(StepRecord::new(stage, stage.as_str(), 0.8));
        }
        let indices: Vec<u8> = session.steps.iter().map(|s| s.stage.index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_step_metadata_builder() {
        let step = StepRecord::new(PipelineStage::Synthesis, "summarized", 0.85)
            .with_metadata("approach", json!("syllogistic reasoning"));
        assert_eq!(step.metadata["approach"], json!("syllogistic reasoning"));
    }
}

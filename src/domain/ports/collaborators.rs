//! External collaborator ports.
//!
//! The core consumes three abstract collaborators and preserves their
//! exact call shapes: a reasoning engine (awaited once per orchestration
//! call in the reasoning specialization), a learning engine (likewise for
//! learning), and a knowledge base (fire-and-forget persistence, failures
//! logged or surfaced per the caller's recovery policy, never retried).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::AgentResult;
use crate::domain::models::{Experience, KnowledgeRecord, TaskInput};

/// Result of one reasoning-engine call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReasoningResult {
    /// Engine confidence in [0, 1].
    pub confidence: f64,
    /// Ordered reasoning steps.
    pub steps: Vec<String>,
    /// Conclusions drawn.
    pub conclusions: Vec<String>,
    /// Free-form uncertainty descriptor.
    pub uncertainty: String,
    /// Alternative conclusions considered.
    pub alternatives: Vec<String>,
}

/// Result of one learning-engine call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningResult {
    /// Whether the engine considered the learning successful.
    pub success: bool,
    /// Improvement descriptions.
    pub improvements: Vec<String>,
    /// New knowledge records produced by the engine.
    pub new_knowledge: Vec<String>,
    /// Named adaptation metrics reported by the engine.
    pub adaptation_metrics: std::collections::BTreeMap<String, f64>,
}

/// External reasoning engine.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Run the engine over the raw input. Awaited once per orchestration
    /// call; failures surface as `AgentError::CollaboratorFailed`.
    async fn reason(&self, input: &TaskInput) -> AgentResult<ReasoningResult>;
}

/// External learning engine.
#[async_trait]
pub trait LearningEngine: Send + Sync {
    /// Learn from one experience. Awaited once per orchestration call.
    async fn learn(&self, experience: &Experience) -> AgentResult<LearningResult>;
}

/// External knowledge base.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Persist a shaped record. The core takes no action on success and
    /// never retries on failure.
    async fn store(&self, record: &KnowledgeRecord) -> AgentResult<()>;
}

/// A reasoning engine that echoes a fixed neutral result.
///
/// Use when reasoning features are not wired up but the type system
/// requires an implementation.
#[derive(Debug, Clone, Default)]
pub struct NullReasoningEngine;

#[async_trait]
impl ReasoningEngine for NullReasoningEngine {
    async fn reason(&self, input: &TaskInput) -> AgentResult<ReasoningResult> {
        Ok(ReasoningResult {
            confidence: 0.5,
            steps: vec![format!("observed {} input", input.shape())],
            conclusions: Vec::new(),
            uncertainty: "no reasoning engine attached".to_string(),
            alternatives: Vec::new(),
        })
    }
}

/// A learning engine that reports success without learning anything.
#[derive(Debug, Clone, Default)]
pub struct NullLearningEngine;

#[async_trait]
impl LearningEngine for NullLearningEngine {
    async fn learn(&self, _experience: &Experience) -> AgentResult<LearningResult> {
        Ok(LearningResult {
            success: true,
            ..LearningResult::default()
        })
    }
}

/// A knowledge base that discards every record.
#[derive(Debug, Clone, Default)]
pub struct NullKnowledgeBase;

#[async_trait]
impl KnowledgeBase for NullKnowledgeBase {
    async fn store(&self, _record: &KnowledgeRecord) -> AgentResult<()> {
        Ok(())
    }
}

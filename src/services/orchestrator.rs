//! The cognitive agent and its end-to-end orchestration flow.
//!
//! One `CognitiveAgent` owns its entire arena: session store, capability
//! levels, strategy set, metrics, experience history, and awareness state
//! all live behind `&mut self`. Distinct agents share nothing, so no
//! locking happens anywhere in this module. Collaborator engines are the
//! only async boundary and each is awaited at most once per call.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::error::AgentResult;
use crate::domain::models::{
    Config, Experience, Specialization, SpecializationProfile, TaskContext, TaskInput, TaskType,
    CapabilityStore, PerformanceMetrics, StrategySet, TunableParameters,
};
use crate::domain::ports::{
    JitterScoreSource, KnowledgeBase, LearningEngine, LearningResult, NullKnowledgeBase,
    ReasoningEngine, ReasoningResult, ScoreSource,
};
use crate::services::adaptation::{AdaptationLoop, SelfImprovementReport};
use crate::services::aggregator::PerformanceAggregator;
use crate::services::classifier::Classifier;
use crate::services::knowledge_shaping::KnowledgeShaper;
use crate::services::pipeline::Pipeline;
use crate::services::session_store::SessionStore;

/// How a single orchestration call treats collaborator failures.
///
/// Chosen per call by the caller, never baked into the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryPolicy {
    /// Surface the failure as an error. State written before the failure
    /// is kept; the session stays open.
    Propagate,
    /// Absorb the failure into a `success = false`, zero-confidence
    /// outcome and carry on with the rest of the flow.
    Degrade,
}

/// What one orchestration call produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationOutcome {
    /// Session that hosted the run.
    pub session_id: Uuid,
    /// The classified task.
    pub task_id: Uuid,
    /// Assigned task type.
    pub task_type: TaskType,
    /// Whether the call completed without a degraded collaborator.
    pub success: bool,
    /// Final confidence, [0, 1].
    pub confidence: f64,
    /// The pipeline's synthesis summary.
    pub summary: String,
    /// Processing method label the pipeline applied.
    pub method: String,
    /// Collaborator reasoning result, when a reasoning engine ran.
    pub reasoning: Option<ReasoningResult>,
    /// Collaborator learning result, when a learning engine ran.
    pub learning: Option<LearningResult>,
    /// Self-improvement report, when the adaptation trigger fired.
    pub improvement: Option<SelfImprovementReport>,
}

/// Bounded awareness signals that ride the orchestration flow.
///
/// Each completed call nudges the levels upward in fixed steps, clamped
/// to 1.0. Nothing in the core ever lowers them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwarenessState {
    /// General awareness level, [0, 1].
    pub awareness: f64,
    /// Attention level, sharpened by high-confidence sessions.
    pub attention: f64,
    /// Focus level, deepened by complex tasks.
    pub focus: f64,
}

impl Default for AwarenessState {
    fn default() -> Self {
        Self {
            awareness: 0.1,
            attention: 0.6,
            focus: 0.3,
        }
    }
}

impl AwarenessState {
    fn step(&mut self, confidence: f64, complexity: f64, trigger: f64) {
        self.awareness = (self.awareness + 0.01).min(1.0);
        if confidence > trigger {
            self.attention = (self.attention + 0.05).min(1.0);
        }
        if complexity > 0.5 {
            self.focus = (self.focus + 0.01).min(1.0);
        }
    }
}

/// Summary statistics over the awareness evolution history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwarenessSummary {
    /// Number of recorded evolution steps.
    pub samples: usize,
    /// Mean awareness across the history.
    pub mean_awareness: f64,
    /// Mean attention across the history.
    pub mean_attention: f64,
}

/// Read-only snapshot of an agent for callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStatus {
    /// Agent identifier.
    pub id: Uuid,
    /// The agent's specialization.
    pub specialization: Specialization,
    /// Sessions currently tracked, open or closed.
    pub sessions_tracked: usize,
    /// Sessions closed over the agent's lifetime (bounded by retention).
    pub sessions_closed: usize,
    /// Mean final confidence across retained history.
    pub mean_confidence: f64,
    /// Current capability levels.
    pub capabilities: BTreeMap<String, f64>,
    /// Adopted strategy identifiers.
    pub strategies: Vec<String>,
    /// Current awareness signals.
    pub awareness: AwarenessState,
}

/// A specialized cognitive agent.
///
/// The specialization is fixed at construction through a static profile;
/// everything type-specific (classification rules, markers, adaptation
/// tables) is data on that profile, not code in this struct.
pub struct CognitiveAgent {
    id: Uuid,
    profile: &'static SpecializationProfile,
    config: Config,
    classifier: Classifier,
    aggregator: PerformanceAggregator,
    shaper: KnowledgeShaper,
    capabilities: CapabilityStore,
    strategies: StrategySet,
    parameters: TunableParameters,
    metrics: PerformanceMetrics,
    sessions: SessionStore,
    experiences: Vec<Experience>,
    awareness: AwarenessState,
    awareness_history: Vec<AwarenessState>,
    scores: Arc<dyn ScoreSource>,
    reasoning: Option<Arc<dyn ReasoningEngine>>,
    learning: Option<Arc<dyn LearningEngine>>,
    knowledge: Arc<dyn KnowledgeBase>,
}

impl CognitiveAgent {
    /// Build an agent with the profile's seed state and no collaborators.
    pub fn new(specialization: Specialization, config: Config) -> Self {
        let id = Uuid::new_v4();
        let profile = specialization.profile();
        Self {
            id,
            profile,
            classifier: Classifier::new(profile),
            aggregator: PerformanceAggregator::new(specialization),
            shaper: KnowledgeShaper::new(
                format!("agent:{id}"),
                config.knowledge.validity_days,
            ),
            capabilities: CapabilityStore::seeded(profile.capability_seeds),
            strategies: StrategySet::seeded(profile.strategy_seeds),
            parameters: TunableParameters::seeded(profile.parameter_seeds),
            metrics: PerformanceMetrics::seeded(profile.metrics, 0.5),
            sessions: SessionStore::new(config.session.history_limit),
            experiences: Vec::new(),
            awareness: AwarenessState::default(),
            awareness_history: Vec::new(),
            scores: Arc::new(JitterScoreSource),
            reasoning: None,
            learning: None,
            knowledge: Arc::new(NullKnowledgeBase),
            config,
        }
    }

    /// Replace the score source. Useful for deterministic runs.
    #[must_use]
    pub fn with_score_source(mut self, scores: Arc<dyn ScoreSource>) -> Self {
        self.scores = scores;
        self
    }

    /// Attach a reasoning engine. Only consulted by reasoning agents.
    #[must_use]
    pub fn with_reasoning_engine(mut self, engine: Arc<dyn ReasoningEngine>) -> Self {
        self.reasoning = Some(engine);
        self
    }

    /// Attach a learning engine. Only consulted by learning agents.
    #[must_use]
    pub fn with_learning_engine(mut self, engine: Arc<dyn LearningEngine>) -> Self {
        self.learning = Some(engine);
        self
    }

    /// Replace the knowledge base the agent stores shaped records into.
    #[must_use]
    pub fn with_knowledge_base(mut self, knowledge: Arc<dyn KnowledgeBase>) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Agent identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The agent's specialization.
    pub fn specialization(&self) -> Specialization {
        self.profile.specialization
    }

    /// Run the full orchestration flow over one input.
    ///
    /// Classify, open a session, run the confidence pipeline, consult the
    /// profile's collaborator once, close the session, fold the outcome
    /// into metrics and experience, shape a knowledge record, and run a
    /// self-improvement pass when confidence clears the configured
    /// trigger. State written before a surfaced failure is kept as-is;
    /// there is no rollback.
    pub async fn orchestrate(
        &mut self,
        input: TaskInput,
        context: TaskContext,
        policy: RecoveryPolicy,
    ) -> AgentResult<OrchestrationOutcome> {
        let task = self.classifier.build_task(input, context)?;
        let session_id = self.sessions.open(&task);
        debug!(
            agent_id = %self.id,
            session_id = %session_id,
            task_type = task.task_type.as_str(),
            "orchestration started"
        );

        let scores = Arc::clone(&self.scores);
        let pipeline = Pipeline::new(self.profile, scores.as_ref());
        let session = self.sessions.get_mut(session_id)?;
        let run = pipeline.run(&task, session);

        let mut success = true;
        let mut confidence = run.confidence;
        let mut experience = Experience::new(task.input.summary(), run.confidence, run.confidence)
            .with_tag(task.task_type.as_str());

        let mut reasoning_result = None;
        let mut learning_result = None;
        match self.profile.specialization {
            Specialization::Reasoning => {
                if let Some(engine) = self.reasoning.clone() {
                    match engine.reason(&task.input).await {
                        Ok(result) => reasoning_result = Some(result),
                        Err(err) => match policy {
                            RecoveryPolicy::Propagate => return Err(err),
                            RecoveryPolicy::Degrade => {
                                warn!(session_id = %session_id, error = %err, "reasoning engine degraded");
                                success = false;
                                confidence = 0.0;
                            }
                        },
                    }
                }
            }
            Specialization::Learning => {
                if let Some(engine) = self.learning.clone() {
                    match engine.learn(&experience).await {
                        Ok(result) => {
                            success = result.success;
                            if !result.adaptation_metrics.is_empty() {
                                let mean = result.adaptation_metrics.values().sum::<f64>()
                                    / result.adaptation_metrics.len() as f64;
                                experience = experience.with_feedback(mean);
                            }
                            learning_result = Some(result);
                        }
                        Err(err) => match policy {
                            RecoveryPolicy::Propagate => return Err(err),
                            RecoveryPolicy::Degrade => {
                                warn!(session_id = %session_id, error = %err, "learning engine degraded");
                                success = false;
                                confidence = 0.0;
                            }
                        },
                    }
                }
            }
            Specialization::Creative => {}
        }

        let payload = json!({
            "summary": run.summary.clone(),
            "method": run.method,
            "success": success,
        });
        let outcome = self.sessions.close(session_id, payload, confidence)?;

        let collaborator_engaged = reasoning_result.is_some() || learning_result.is_some();
        self.aggregator.record_outcome(
            &mut self.metrics,
            &outcome,
            &self.capabilities,
            collaborator_engaged,
            run.idea_count,
        );

        self.experiences.push(experience);

        match self
            .shaper
            .store(self.knowledge.as_ref(), &self.experiences, confidence)
            .await
        {
            Ok(record) => {
                debug!(session_id = %session_id, record_id = %record.id, "knowledge record stored");
            }
            Err(err) => match policy {
                RecoveryPolicy::Propagate => return Err(err),
                RecoveryPolicy::Degrade => {
                    warn!(session_id = %session_id, error = %err, "knowledge store degraded");
                    success = false;
                    confidence = 0.0;
                }
            },
        }

        self.awareness
            .step(confidence, task.complexity, self.config.adaptation.trigger_confidence);
        self.awareness_history.push(self.awareness.clone());

        let improvement = if confidence > self.config.adaptation.trigger_confidence {
            let adaptation = AdaptationLoop::new(self.profile);
            Some(adaptation.self_improve(
                &self.metrics,
                &mut self.capabilities,
                &mut self.strategies,
                &mut self.parameters,
            ))
        } else {
            None
        };

        info!(
            agent_id = %self.id,
            session_id = %session_id,
            confidence,
            success,
            adapted = improvement.is_some(),
            "orchestration finished"
        );

        Ok(OrchestrationOutcome {
            session_id,
            task_id: task.id,
            task_type: task.task_type,
            success,
            confidence,
            summary: run.summary,
            method: run.method.to_string(),
            reasoning: reasoning_result,
            learning: learning_result,
            improvement,
        })
    }

    /// Read-only snapshot of the agent.
    pub fn status(&self) -> AgentStatus {
        let history = self.sessions.history();
        let mean_confidence = if history.is_empty() {
            0.0
        } else {
            history.iter().map(|o| o.confidence).sum::<f64>() / history.len() as f64
        };
        AgentStatus {
            id: self.id,
            specialization: self.profile.specialization,
            sessions_tracked: self.sessions.session_count(),
            sessions_closed: history.len(),
            mean_confidence,
            capabilities: self
                .capabilities
                .iter()
                .map(|(name, level)| (name.to_string(), level))
                .collect(),
            strategies: self.strategies.iter().map(str::to_string).collect(),
            awareness: self.awareness.clone(),
        }
    }

    /// Summary statistics over the awareness evolution history.
    pub fn awareness_summary(&self) -> AwarenessSummary {
        let samples = self.awareness_history.len();
        let (mean_awareness, mean_attention) = if samples == 0 {
            (0.0, 0.0)
        } else {
            let n = samples as f64;
            (
                self.awareness_history.iter().map(|s| s.awareness).sum::<f64>() / n,
                self.awareness_history.iter().map(|s| s.attention).sum::<f64>() / n,
            )
        };
        AwarenessSummary {
            samples,
            mean_awareness,
            mean_attention,
        }
    }

    /// Accumulated experience history, oldest first.
    pub fn experiences(&self) -> &[Experience] {
        &self.experiences
    }

    /// Current performance metric scores.
    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    /// Current capability levels.
    pub fn capabilities(&self) -> &CapabilityStore {
        &self.capabilities
    }

    /// Adopted strategy identifiers.
    pub fn strategies(&self) -> &StrategySet {
        &self.strategies
    }

    /// Closed-session history, oldest first.
    pub fn session_history(&self) -> &[crate::domain::models::SessionOutcome] {
        self.sessions.history()
    }

    /// Drop the experience history. Sessions, capabilities, and metrics
    /// are untouched. Returns how many experiences were discarded.
    pub fn reset_experiences(&mut self) -> usize {
        let discarded = self.experiences.len();
        self.experiences.clear();
        info!(agent_id = %self.id, discarded, "experience history reset");
        discarded
    }
}

impl std::fmt::Debug for CognitiveAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CognitiveAgent")
            .field("id", &self.id)
            .field("specialization", &self.profile.specialization)
            .field("sessions", &self.sessions.session_count())
            .field("experiences", &self.experiences.len())
            .finish_non_exhaustive()
    }
}

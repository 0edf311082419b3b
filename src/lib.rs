//! Noesis - Cognitive Agent Orchestration Core
//!
//! Noesis is the orchestration core for specialized cognitive agents: input
//! classification, task sessions, a five-stage confidence pipeline, and a
//! capability adaptation loop, with pluggable collaborator engines.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, typed errors, and collaborator ports
//! - **Service Layer** (`services`): Classification, sessions, pipeline,
//!   adaptation, knowledge shaping, and the orchestrating agent
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//!
//! # Example
//!
//! ```ignore
//! use noesis::{CognitiveAgent, Config, RecoveryPolicy, Specialization, TaskContext};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut agent = CognitiveAgent::new(Specialization::Reasoning, Config::default());
//!     let outcome = agent
//!         .orchestrate(
//!             "prove the conjecture holds for small cases".into(),
//!             TaskContext::default(),
//!             RecoveryPolicy::Propagate,
//!         )
//!         .await?;
//!     println!("confidence: {:.2}", outcome.confidence);
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::{AgentError, AgentResult};
pub use domain::models::{
    CapabilityStore, Config, Constraint, ConstraintKind, Experience, KnowledgeRecord, MetricName,
    PerformanceMetrics, PipelineStage, Session, SessionOutcome, Specialization, StrategySet, Task,
    TaskContext, TaskInput, TaskType,
};
pub use domain::ports::{
    FixedScoreSource, JitterScoreSource, KnowledgeBase, LearningEngine, LearningResult,
    ReasoningEngine, ReasoningResult, ScoreSource,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    AgentStatus, AwarenessState, CognitiveAgent, OrchestrationOutcome, RecoveryPolicy,
    SelfImprovementReport,
};

//! Core services: classification, sessions, the confidence pipeline,
//! performance aggregation, adaptation, knowledge shaping, and the
//! orchestrator that threads them together.

pub mod adaptation;
pub mod aggregator;
pub mod classifier;
pub mod knowledge_shaping;
pub mod orchestrator;
pub mod pipeline;
pub mod session_store;

pub use adaptation::{
    AdaptationLoop, CapabilityDelta, Improvement, PerformanceAnalysis, SelfImprovementReport,
};
pub use aggregator::PerformanceAggregator;
pub use classifier::Classifier;
pub use knowledge_shaping::KnowledgeShaper;
pub use orchestrator::{
    AgentStatus, AwarenessState, AwarenessSummary, CognitiveAgent, OrchestrationOutcome,
    RecoveryPolicy,
};
pub use pipeline::{Pipeline, PipelineRun};
pub use session_store::SessionStore;

//! Port trait definitions.
//!
//! Async trait interfaces external collaborators must implement, plus the
//! injectable score source. These seams keep the orchestration core
//! independent of any concrete engine or store.

pub mod collaborators;
pub mod score_source;

pub use collaborators::{
    KnowledgeBase, LearningEngine, LearningResult, NullKnowledgeBase, NullLearningEngine,
    NullReasoningEngine, ReasoningEngine, ReasoningResult,
};
pub use score_source::{FixedScoreSource, JitterScoreSource, ScoreSource};

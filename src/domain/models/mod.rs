//! Domain models: pure data with no I/O.

pub mod capability;
pub mod config;
pub mod input;
pub mod knowledge;
pub mod session;
pub mod specialization;
pub mod task;

pub use capability::{
    CapabilityStore, MetricName, PerformanceMetrics, StrategySet, TunableParameters,
    ACQUIRED_THRESHOLD, CAPABILITY_STEP,
};
pub use config::{AdaptationConfig, Config, KnowledgeConfig, LoggingConfig, SessionConfig};
pub use input::TaskInput;
pub use knowledge::{Experience, KnowledgeContent, KnowledgeRecord, Pattern};
pub use session::{PipelineStage, Session, SessionOutcome, StepRecord};
pub use specialization::{
    PriorityFactor, RuleMatcher, Specialization, SpecializationProfile, TypeRule,
};
pub use task::{Constraint, ConstraintKind, ExpectedOutput, Task, TaskContext, TaskType};

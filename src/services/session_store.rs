//! In-process session registry for one agent instance.
//!
//! Sessions are owned exclusively by their agent (no locking, no sharing);
//! callers needing cross-thread access must serialize outside this core.
//! Closing is fail-loud on every path: a missing session and a reclose are
//! both errors, never silent no-ops.

use std::collections::HashMap;

use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::error::{AgentError, AgentResult};
use crate::domain::models::{Session, SessionOutcome, StepRecord, Task};

/// Registry of in-flight sessions plus an append-only history of
/// completed ones.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<Uuid, Session>,
    history: Vec<SessionOutcome>,
    history_limit: Option<usize>,
}

impl SessionStore {
    /// Create a store with the given history retention. `None` keeps
    /// history unbounded.
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            sessions: HashMap::new(),
            history: Vec::new(),
            history_limit,
        }
    }

    /// Open a session for a task: empty step log, zero confidence, and a
    /// metadata snapshot of the task's type, complexity, and priority.
    pub fn open(&mut self, task: &Task) -> Uuid {
        let mut session = Session::open(task.id);
        session
            .metadata
            .insert("task_type".to_string(), json!(task.task_type.as_str()));
        session
            .metadata
            .insert("complexity".to_string(), json!(task.complexity));
        session
            .metadata
            .insert("priority".to_string(), json!(task.priority));

        let id = session.id;
        debug!(session_id = %id, task_id = %task.id, "session opened");
        self.sessions.insert(id, session);
        id
    }

    /// Borrow an open session mutably, for the pipeline to append steps.
    pub fn get_mut(&mut self, id: Uuid) -> AgentResult<&mut Session> {
        self.sessions
            .get_mut(&id)
            .ok_or(AgentError::SessionNotFound(id))
    }

    /// Borrow a session immutably.
    pub fn get(&self, id: Uuid) -> AgentResult<&Session> {
        self.sessions.get(&id).ok_or(AgentError::SessionNotFound(id))
    }

    /// Append a step record to an open session.
    pub fn record_step(&mut self, id: Uuid, step: StepRecord) -> AgentResult<()> {
        self.get_mut(id)?.record_step(step);
        Ok(())
    }

    /// Close a session exactly once: stamp the end time, copy in the
    /// final result and confidence, and append a compact record to the
    /// history. Reclosing is rejected.
    pub fn close(
        &mut self,
        id: Uuid,
        result: serde_json::Value,
        confidence: f64,
    ) -> AgentResult<SessionOutcome> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(AgentError::SessionNotFound(id))?;
        if session.is_closed() {
            return Err(AgentError::SessionAlreadyClosed(id));
        }

        session.ended_at = Some(chrono::Utc::now());
        session.final_result = Some(result.clone());
        session.confidence = confidence.clamp(0.0, 1.0);

        let outcome = SessionOutcome {
            session_id: session.id,
            task_id: session.task_id,
            task_type: session
                .metadata
                .get("task_type")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string(),
            confidence: session.confidence,
            result,
            duration_seconds: session.duration_seconds(),
            closed_at: session.ended_at.unwrap_or_else(chrono::Utc::now),
        };
        debug!(session_id = %id, confidence = outcome.confidence, "session closed");

        self.history.push(outcome.clone());
        if let Some(limit) = self.history_limit {
            while self.history.len() > limit {
                self.history.remove(0);
            }
        }
        Ok(outcome)
    }

    /// Completed-session history, oldest first.
    pub fn history(&self) -> &[SessionOutcome] {
        &self.history
    }

    /// Number of sessions currently registered (open and closed).
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        ExpectedOutput, PipelineStage, TaskContext, TaskInput, TaskType,
    };
    use std::collections::BTreeMap;

    fn sample_task() -> Task {
        Task::new(
            TaskType::Deduction,
            TaskInput::from("prove it"),
            TaskContext::default(),
            BTreeMap::new(),
            ExpectedOutput::default(),
            0.6,
            0.5,
        )
    }

    #[test]
    fn test_open_snapshots_task_metadata() {
        let mut store = SessionStore::new(None);
        let task = sample_task();
        let id = store.open(&task);
        let session = store.get(id).unwrap();
        assert_eq!(session.metadata["task_type"], json!("deduction"));
        assert_eq!(session.metadata["complexity"], json!(0.6));
        assert_eq!(session.confidence, 0.0);
    }

    #[test]
    fn test_close_round_trip() {
        let mut store = SessionStore::new(None);
        let id = store.open(&sample_task());
        let outcome = store.close(id, json!({"conclusion": "valid"}), 0.42).unwrap();
        assert_eq!(outcome.confidence, 0.42);

        // Lookup after close returns exactly what was passed in.
        let session = store.get(id).unwrap();
        assert_eq!(session.final_result, Some(json!({"conclusion": "valid"})));
        assert_eq!(session.confidence, 0.42);
        assert!(session.is_closed());
    }

    #[test]
    fn test_close_missing_session_fails_loudly() {
        let mut store = SessionStore::new(None);
        let err = store.close(Uuid::new_v4(), json!(null), 0.5).unwrap_err();
        assert!(matches!(err, AgentError::SessionNotFound(_)));
    }

    #[test]
    fn test_reclose_is_rejected() {
        let mut store = SessionStore::new(None);
        let id = store.open(&sample_task());
        store.close(id, json!(1), 0.5).unwrap();
        let err = store.close(id, json!(2), 0.9).unwrap_err();
        assert!(matches!(err, AgentError::SessionAlreadyClosed(_)));
        // The first close's values survive.
        assert_eq!(store.get(id).unwrap().final_result, Some(json!(1)));
    }

    #[test]
    fn test_history_retention_drops_oldest() {
        let mut store = SessionStore::new(Some(2));
        for i in 0..3 {
            let id = store.open(&sample_task());
            store.close(id, json!(i), 0.5).unwrap();
        }
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.history()[0].result, json!(1));
    }

    #[test]
    fn test_record_step_on_open_session() {
        let mut store = SessionStore::new(None);
        let id = store.open(&sample_task());
        store
            .record_step(id, StepRecord::new(PipelineStage::InputAnalysis, "x", 0.9))
            .unwrap();
        assert_eq!(store.get(id).unwrap().steps.len(), 1);
    }
}

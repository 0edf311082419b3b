//! Domain errors for the Noesis agent core.
//!
//! The source system this core models had an inconsistent throw-vs-swallow
//! policy across entry points. Here every failure surfaces as a typed
//! `AgentError`; the recovery decision (propagate vs. degrade) belongs to
//! the caller via `RecoveryPolicy`, never to an individual method.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur inside the agent orchestration core.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Input could not be classified or scored.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No session registered under the given id.
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    /// The session was already closed; sessions close exactly once.
    #[error("Session already closed: {0}")]
    SessionAlreadyClosed(Uuid),

    /// A collaborator (reasoning engine, learning engine, knowledge base)
    /// rejected a call. Never retried by this core.
    #[error("Collaborator '{collaborator}' failed: {message}")]
    CollaboratorFailed {
        /// Which collaborator rejected.
        collaborator: &'static str,
        /// Collaborator-supplied failure description.
        message: String,
    },

    /// A metric, confidence, or level left the [0, 1] range.
    #[error("Value out of range for {name}: {value}")]
    OutOfRange {
        /// Name of the offending score.
        name: String,
        /// The offending value.
        value: f64,
    },

    /// Serialization of a result or record failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result alias used throughout the core.
pub type AgentResult<T> = Result<T, AgentError>;

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Serialization(err.to_string())
    }
}

//! Domain layer: core business logic and domain models.

pub mod error;
pub mod models;
pub mod ports;

pub use error::{AgentError, AgentResult};

//! Knowledge domain model.
//!
//! Experiences are historical interaction records the knowledge-shaping
//! stage reads to extract patterns and insights. Knowledge records are the
//! shaped output handed to the external knowledge base and never consumed
//! by this core afterward.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A record of one past interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    /// Unique identifier.
    pub id: Uuid,
    /// Short summary of the interaction's input.
    pub input_summary: String,
    /// Outcome utility in [0, 1].
    pub outcome: f64,
    /// Feedback strength in [0, 1], when feedback was given.
    pub feedback: Option<f64>,
    /// Confidence of the session that produced this experience.
    pub confidence: f64,
    /// Free-form metadata tags.
    pub tags: Vec<String>,
    /// When the experience was recorded.
    pub created_at: DateTime<Utc>,
}

impl Experience {
    /// Record a new experience with scores clamped into [0, 1].
    pub fn new(input_summary: impl Into<String>, outcome: f64, confidence: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            input_summary: input_summary.into(),
            outcome: outcome.clamp(0.0, 1.0),
            feedback: None,
            confidence: confidence.clamp(0.0, 1.0),
            tags: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Attach a feedback strength (builder style).
    pub fn with_feedback(mut self, feedback: f64) -> Self {
        self.feedback = Some(feedback.clamp(0.0, 1.0));
        self
    }

    /// Attach a metadata tag (builder style).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// A pattern descriptor copied out of experience metadata tags. No
/// independent pattern discovery happens in this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// The tag the pattern was copied from.
    pub name: String,
    /// How many experiences carried the tag.
    pub occurrences: usize,
    /// Mean confidence of the experiences carrying the tag.
    pub confidence: f64,
}

/// Content of a shaped knowledge record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeContent {
    /// Extracted pattern descriptors.
    pub patterns: Vec<Pattern>,
    /// Extracted insight sentences.
    pub insights: Vec<String>,
    /// Confidence of the record as a whole, in [0, 1].
    pub confidence: f64,
}

/// A shaped fact handed to the external knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Record type tag, e.g. "session_insight".
    pub record_type: String,
    /// Patterns, insights, and confidence.
    pub content: KnowledgeContent,
    /// Source tag naming the producing agent.
    pub source: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// End of this record's validity window, if bounded.
    pub valid_until: Option<DateTime<Utc>>,
}

impl KnowledgeRecord {
    /// Shape a record with a validity window of `validity_days` from now.
    /// A zero-day window produces an unbounded record.
    pub fn new(
        record_type: impl Into<String>,
        content: KnowledgeContent,
        source: impl Into<String>,
        validity_days: i64,
    ) -> Self {
        let created_at = Utc::now();
        let valid_until = (validity_days > 0).then(|| created_at + Duration::days(validity_days));
        Self {
            id: Uuid::new_v4(),
            record_type: record_type.into(),
            content,
            source: source.into(),
            created_at,
            valid_until,
        }
    }

    /// Whether the record is still within its validity window.
    pub fn is_valid_at(&self, instant: DateTime<Utc>) -> bool {
        self.valid_until.map_or(true, |until| instant <= until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_scores_clamped() {
        let exp = Experience::new("summary", 1.4, -0.2).with_feedback(2.0);
        assert_eq!(exp.outcome, 1.0);
        assert_eq!(exp.confidence, 0.0);
        assert_eq!(exp.feedback, Some(1.0));
    }

    #[test]
    fn test_record_validity_window() {
        let content = KnowledgeContent {
            patterns: vec![],
            insights: vec![],
            confidence: 0.8,
        };
        let record = KnowledgeRecord::new("session_insight", content.clone(), "agent", 30);
        assert!(record.is_valid_at(Utc::now()));
        assert!(!record.is_valid_at(Utc::now() + Duration::days(31)));

        let unbounded = KnowledgeRecord::new("session_insight", content, "agent", 0);
        assert!(unbounded.is_valid_at(Utc::now() + Duration::days(365)));
    }
}

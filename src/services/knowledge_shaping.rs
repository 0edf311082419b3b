//! Shapes session output into knowledge records.
//!
//! Pattern extraction copies pre-existing experience tags; insight
//! extraction emits canned sentences behind fixed threshold checks. No
//! independent discovery happens here. Persistence is delegated to the
//! external knowledge base; this core never reads a stored record back.

use std::collections::BTreeMap;

use crate::domain::error::AgentResult;
use crate::domain::models::{Experience, KnowledgeContent, KnowledgeRecord, Pattern};
use crate::domain::ports::KnowledgeBase;

/// Outcome utility above which an experience yields a utility insight.
const UTILITY_THRESHOLD: f64 = 0.7;
/// Feedback strength above which an experience yields a feedback insight.
const FEEDBACK_THRESHOLD: f64 = 0.8;
/// Confidence above which an experience yields a confidence insight.
const CONFIDENCE_THRESHOLD: f64 = 0.9;

/// Knowledge shaping over an agent's experience history.
#[derive(Debug, Clone)]
pub struct KnowledgeShaper {
    source: String,
    validity_days: i64,
}

impl KnowledgeShaper {
    /// Build a shaper that stamps records with the given source tag and
    /// validity window.
    pub fn new(source: impl Into<String>, validity_days: i64) -> Self {
        Self {
            source: source.into(),
            validity_days,
        }
    }

    /// Copy pre-existing metadata tags into pattern descriptors, counting
    /// occurrences and averaging confidence per tag.
    pub fn extract_patterns(&self, experiences: &[Experience]) -> Vec<Pattern> {
        let mut by_tag: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for experience in experiences {
            for tag in &experience.tags {
                let entry = by_tag.entry(tag.as_str()).or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 += experience.confidence;
            }
        }
        by_tag
            .into_iter()
            .map(|(name, (occurrences, confidence_sum))| Pattern {
                name: name.to_string(),
                occurrences,
                confidence: confidence_sum / occurrences as f64,
            })
            .collect()
    }

    /// Emit a canned sentence per threshold check that passes.
    pub fn extract_insights(&self, experiences: &[Experience]) -> Vec<String> {
        let mut insights = Vec::new();
        for experience in experiences {
            if experience.outcome > UTILITY_THRESHOLD {
                insights.push(format!(
                    "High-utility interaction observed: {}",
                    experience.input_summary
                ));
            }
            if experience.feedback.is_some_and(|f| f > FEEDBACK_THRESHOLD) {
                insights.push(format!(
                    "Strong feedback received on: {}",
                    experience.input_summary
                ));
            }
            if experience.confidence > CONFIDENCE_THRESHOLD {
                insights.push(format!(
                    "High-confidence outcome achieved for: {}",
                    experience.input_summary
                ));
            }
        }
        insights
    }

    /// Shape a record from the experience history and the confidence of
    /// the session that triggered it.
    pub fn shape(&self, experiences: &[Experience], confidence: f64) -> KnowledgeRecord {
        let content = KnowledgeContent {
            patterns: self.extract_patterns(experiences),
            insights: self.extract_insights(experiences),
            confidence: confidence.clamp(0.0, 1.0),
        };
        KnowledgeRecord::new("session_insight", content, &self.source, self.validity_days)
    }

    /// Shape and hand the record to the knowledge base. Failures are
    /// surfaced to the caller; they are never retried here.
    pub async fn store(
        &self,
        knowledge_base: &dyn KnowledgeBase,
        experiences: &[Experience],
        confidence: f64,
    ) -> AgentResult<KnowledgeRecord> {
        let record = self.shape(experiences, confidence);
        knowledge_base.store(&record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaper() -> KnowledgeShaper {
        KnowledgeShaper::new("agent:test", 30)
    }

    #[test]
    fn test_patterns_are_copied_tags_only() {
        let experiences = vec![
            Experience::new("first", 0.5, 0.8).with_tag("recurring_theme"),
            Experience::new("second", 0.5, 0.6).with_tag("recurring_theme"),
            Experience::new("third", 0.5, 0.4),
        ];
        let patterns = shaper().extract_patterns(&experiences);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].name, "recurring_theme");
        assert_eq!(patterns[0].occurrences, 2);
        assert!((patterns[0].confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_untagged_experiences_yield_no_patterns() {
        let experiences = vec![Experience::new("plain", 0.9, 0.9)];
        assert!(shaper().extract_patterns(&experiences).is_empty());
    }

    #[test]
    fn test_insight_thresholds() {
        // Below every threshold: no insights.
        let quiet = vec![Experience::new("quiet", 0.7, 0.9).with_feedback(0.8)];
        assert!(shaper().extract_insights(&quiet).is_empty());

        // Above all three: one insight per check.
        let loud = vec![Experience::new("loud", 0.8, 0.95).with_feedback(0.9)];
        let insights = shaper().extract_insights(&loud);
        assert_eq!(insights.len(), 3);
    }

    #[test]
    fn test_shape_stamps_source_and_validity() {
        let record = shaper().shape(&[], 0.6);
        assert_eq!(record.source, "agent:test");
        assert_eq!(record.record_type, "session_insight");
        assert!(record.valid_until.is_some());
        assert_eq!(record.content.confidence, 0.6);
    }
}

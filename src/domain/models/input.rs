//! Task input as an explicit tagged union.
//!
//! The system this core models inspected raw values at runtime (string vs.
//! array vs. object shape sniffing). Here the three input shapes are a
//! closed enum with exhaustive matching. `Action` models a callable member
//! of a structured record, so the structured-complexity path can count
//! callable members the way the original did.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw input handed to an agent for orchestration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum TaskInput {
    /// Free-form text.
    Text(String),
    /// An ordered sequence of nested inputs.
    Sequence(Vec<TaskInput>),
    /// A keyed record of nested inputs.
    Structured(BTreeMap<String, TaskInput>),
    /// A named executable capability attached to a record.
    Action(String),
}

impl TaskInput {
    /// Short shape tag used in step metadata and logs.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Sequence(_) => "sequence",
            Self::Structured(_) => "structured",
            Self::Action(_) => "action",
        }
    }

    /// Maximum nesting depth. A scalar has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Self::Text(_) | Self::Action(_) => 1,
            Self::Sequence(items) => 1 + items.iter().map(TaskInput::depth).max().unwrap_or(0),
            Self::Structured(fields) => {
                1 + fields.values().map(TaskInput::depth).max().unwrap_or(0)
            }
        }
    }

    /// Number of distinct element shapes among direct children.
    pub fn shape_diversity(&self) -> usize {
        let shapes: std::collections::BTreeSet<&'static str> = match self {
            Self::Text(_) | Self::Action(_) => return 1,
            Self::Sequence(items) => items.iter().map(TaskInput::shape).collect(),
            Self::Structured(fields) => fields.values().map(TaskInput::shape).collect(),
        };
        shapes.len().max(1)
    }

    /// Direct element count for sequences, key count for records,
    /// character count for text.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(s) | Self::Action(s) => s.chars().count(),
            Self::Sequence(items) => items.len(),
            Self::Structured(fields) => fields.len(),
        }
    }

    /// Whether the input carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text content when this input is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// A short human-readable summary for experiences and logs.
    pub fn summary(&self) -> String {
        match self {
            Self::Text(s) => {
                let mut summary: String = s.chars().take(60).collect();
                if s.chars().count() > 60 {
                    summary.push_str("...");
                }
                summary
            }
            Self::Sequence(items) => format!("sequence of {} elements", items.len()),
            Self::Structured(fields) => format!("record with {} keys", fields.len()),
            Self::Action(name) => format!("action '{name}'"),
        }
    }
}

impl From<&str> for TaskInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for TaskInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_of_nested_sequence() {
        let input = TaskInput::Sequence(vec![
            TaskInput::Text("a".into()),
            TaskInput::Sequence(vec![TaskInput::Text("b".into())]),
        ]);
        assert_eq!(input.depth(), 3);
    }

    #[test]
    fn test_shape_diversity() {
        let input = TaskInput::Sequence(vec![
            TaskInput::Text("a".into()),
            TaskInput::Sequence(vec![]),
            TaskInput::Text("b".into()),
        ]);
        assert_eq!(input.shape_diversity(), 2);
    }

    #[test]
    fn test_structured_len_counts_keys() {
        let mut fields = BTreeMap::new();
        fields.insert("k1".to_string(), TaskInput::Text("v".into()));
        fields.insert("k2".to_string(), TaskInput::Action("run".into()));
        let input = TaskInput::Structured(fields);
        assert_eq!(input.len(), 2);
        assert_eq!(input.shape(), "structured");
    }

    #[test]
    fn test_text_summary_truncates() {
        let long = "x".repeat(100);
        let summary = TaskInput::Text(long).summary();
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 63);
    }
}

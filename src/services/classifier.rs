//! Input classification and scoring.
//!
//! Maps raw input to a task type via the profile's ordered rules, computes
//! complexity and priority scores, and merges constraints. All heuristics
//! are surface-level by design; there is no semantic understanding here.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::error::{AgentError, AgentResult};
use crate::domain::models::{
    Constraint, ConstraintKind, ExpectedOutput, PriorityFactor, SpecializationProfile, Task,
    TaskContext, TaskInput, TaskType,
};

/// Complexity floor and ceiling after clamping.
const COMPLEXITY_RANGE: (f64, f64) = (0.1, 1.0);

/// Classifier for one specialization profile.
#[derive(Clone, Copy)]
pub struct Classifier {
    profile: &'static SpecializationProfile,
}

impl Classifier {
    /// Build a classifier over the given profile.
    pub fn new(profile: &'static SpecializationProfile) -> Self {
        Self { profile }
    }

    /// Classify an input into the profile's closed type set. Empty input
    /// is a classification error.
    pub fn classify(&self, input: &TaskInput) -> AgentResult<TaskType> {
        if input.is_empty() {
            return Err(AgentError::InvalidInput("empty input".to_string()));
        }
        Ok(self.profile.classify(input))
    }

    /// Complexity score: base 0.5 plus individually capped contributions
    /// per input shape, clamped into [0.1, 1.0].
    pub fn complexity(&self, input: &TaskInput) -> f64 {
        let base = 0.5;
        let score = match input {
            TaskInput::Text(text) => base + self.text_terms(text),
            TaskInput::Sequence(items) => {
                let depth_term = ((input.depth().saturating_sub(1)) as f64 * 0.05).min(0.2);
                let diversity_term = (input.shape_diversity() as f64 * 0.05).min(0.15);
                let length_term = (items.len() as f64 * 0.01).min(0.15);
                base + depth_term + diversity_term + length_term
            }
            TaskInput::Structured(fields) => {
                let key_term = (fields.len() as f64 * 0.02).min(0.2);
                let nested = fields
                    .values()
                    .filter(|v| matches!(v, TaskInput::Structured(_) | TaskInput::Sequence(_)))
                    .count();
                let nested_term = (nested as f64 * 0.05).min(0.15);
                let callables = fields
                    .values()
                    .filter(|v| matches!(v, TaskInput::Action(_)))
                    .count();
                let callable_term = (callables as f64 * 0.05).min(0.15);
                base + key_term + nested_term + callable_term
            }
            TaskInput::Action(_) => base,
        };
        score.clamp(COMPLEXITY_RANGE.0, COMPLEXITY_RANGE.1)
    }

    fn text_terms(&self, text: &str) -> f64 {
        let sentences = text
            .split(|c| matches!(c, '.' | '!' | '?'))
            .filter(|s| !s.trim().is_empty())
            .count();
        let sentence_term = (sentences as f64 * 0.02).min(0.2);

        let words: Vec<&str> = text.split_whitespace().collect();
        let vocab_term = if words.is_empty() {
            0.0
        } else {
            let unique: BTreeSet<String> =
                words.iter().map(|w| w.to_lowercase()).collect();
            0.1 * unique.len() as f64 / words.len() as f64
        };

        let lower = text.to_lowercase();
        let domain_hits = self
            .profile
            .domain_terms
            .iter()
            .filter(|term| lower.contains(*term))
            .count();
        let domain_term = (domain_hits as f64 * 0.05).min(0.2);

        sentence_term + vocab_term + domain_term
    }

    /// Priority score: the profile's fixed weighted sum over complexity
    /// and context factors. Missing context factors default to 0.5.
    pub fn priority(&self, input: &TaskInput, context: &TaskContext) -> f64 {
        let complexity = self.complexity(input);
        let score: f64 = self
            .profile
            .priority_weights
            .iter()
            .map(|(factor, weight)| {
                let value = match factor {
                    PriorityFactor::Complexity => complexity,
                    PriorityFactor::Context(name) => context.factor(name),
                };
                value * weight
            })
            .sum();
        score.clamp(0.0, 1.0)
    }

    /// Merge constraints: context-supplied entries win; text-parsed
    /// templates fill the remaining keys, first match per key.
    pub fn constraints(
        &self,
        input: &TaskInput,
        context: &TaskContext,
    ) -> BTreeMap<String, Constraint> {
        let mut merged = context.constraints.clone();
        if let Some(text) = input.as_text() {
            for (key, constraint) in parse_text_constraints(text) {
                merged.entry(key).or_insert(constraint);
            }
        }
        merged
    }

    /// Build the full, immutable task for an orchestration call.
    pub fn build_task(&self, input: TaskInput, context: TaskContext) -> AgentResult<Task> {
        let task_type = self.classify(&input)?;
        let complexity = self.complexity(&input);
        let priority = self.priority(&input, &context);
        let constraints = self.constraints(&input, &context);
        let expected_output = ExpectedOutput {
            descriptor: self.profile.expected_output(task_type).to_string(),
        };
        Ok(Task::new(
            task_type,
            input,
            context,
            constraints,
            expected_output,
            complexity,
            priority,
        ))
    }
}

fn time_limit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)within\s+(\d+\s*(?:seconds?|minutes?|hours?))")
            .expect("time limit template is valid")
    })
}

fn resource_only_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)using\s+only\s+([\w ,]+?)(?:[.;]|$)")
            .expect("resource-only template is valid")
    })
}

fn avoidance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:avoid|without)\s+([\w ]+?)(?:[.;,]|$)")
            .expect("avoidance template is valid")
    })
}

/// Parse the small fixed set of textual constraint templates. The first
/// match per key wins; later matches for the same key are dropped.
fn parse_text_constraints(text: &str) -> Vec<(String, Constraint)> {
    let mut parsed = Vec::new();
    if let Some(caps) = time_limit_re().captures(text) {
        parsed.push((
            "time_limit".to_string(),
            Constraint::new(ConstraintKind::TimeLimit, caps[1].trim()),
        ));
    }
    if let Some(caps) = resource_only_re().captures(text) {
        parsed.push((
            "resources".to_string(),
            Constraint::new(ConstraintKind::ResourceOnly, caps[1].trim()),
        ));
    }
    if let Some(caps) = avoidance_re().captures(text) {
        parsed.push((
            "avoid".to_string(),
            Constraint::new(ConstraintKind::Avoidance, caps[1].trim()),
        ));
    }
    parsed
}

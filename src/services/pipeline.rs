//! The 5-stage confidence-decay pipeline.
//!
//! A fixed sequential state machine, re-run once per orchestration call.
//! Stage semantics are constant in shape and specialization-specific in
//! content. The final confidence is the product of the five per-stage
//! confidences: every factor is at most 0.9, so the running product is
//! non-increasing by construction. Confidence models a conjunction of
//! weak judgments, not independent evidence accumulation; the constants
//! below are preserved exactly because downstream consumers (capability
//! triggers, the meta-adaptation threshold) depend on the numeric range
//! they produce.

use serde_json::json;
use tracing::debug;

use crate::domain::models::{
    PipelineStage, Session, Specialization, SpecializationProfile, StepRecord, Task, TaskInput,
};
use crate::domain::ports::ScoreSource;

/// Stage 1 emits this regardless of findings.
const ANALYSIS_CONFIDENCE: f64 = 0.9;
/// Stage 2 base confidence before marker contributions.
const PATTERN_BASE: f64 = 0.5;
/// Stage 2 confidence gained per marker hit.
const PATTERN_PER_MARKER: f64 = 0.1;
/// Ceiling shared by every stage confidence.
const STAGE_CEILING: f64 = 0.9;
/// Stage 3 fixed confidence; the method is recorded, not executed.
const METHOD_CONFIDENCE: f64 = 0.8;
/// Stage 4 fixed confidence.
const SYNTHESIS_CONFIDENCE: f64 = 0.85;
/// Stage 5: variance below this yields the high validation confidence.
const VARIANCE_THRESHOLD: f64 = 0.01;
/// Stage 5 confidence when the prior stages agree.
const VALIDATION_HIGH: f64 = 0.9;
/// Stage 5 confidence when they do not.
const VALIDATION_LOW: f64 = 0.6;
/// Floor applied to the final product.
const CONFIDENCE_FLOOR: f64 = 0.1;

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    /// Product of the five stage confidences, clamped into [0.1, 1.0].
    pub confidence: f64,
    /// The stage-4 summary sentence.
    pub summary: String,
    /// The method label stage 3 recorded.
    pub method: &'static str,
    /// Idea count drawn in stage 4, creative profiles only.
    pub idea_count: Option<usize>,
}

/// The confidence-decay pipeline for one specialization profile.
pub struct Pipeline<'a> {
    profile: &'static SpecializationProfile,
    scores: &'a dyn ScoreSource,
}

impl<'a> Pipeline<'a> {
    /// Build a pipeline over a profile and an injected score source.
    pub fn new(profile: &'static SpecializationProfile, scores: &'a dyn ScoreSource) -> Self {
        Self { profile, scores }
    }

    /// Run all five stages over the task, appending one step record per
    /// stage into the session, in order.
    pub fn run(&self, task: &Task, session: &mut Session) -> PipelineRun {
        let mut confidences = Vec::with_capacity(5);

        // Stage 1: input analysis. High confidence regardless of findings.
        let step = StepRecord::new(
            PipelineStage::InputAnalysis,
            format!(
                "Analyzed {} input with complexity {:.2}",
                task.input.shape(),
                task.complexity
            ),
            ANALYSIS_CONFIDENCE,
        )
        .with_metadata("shape", json!(task.input.shape()))
        .with_metadata("complexity", json!(task.complexity));
        confidences.push(step.confidence);
        session.record_step(step);

        // Stage 2: pattern recognition over surface markers.
        let markers = self.scan_markers(&task.input);
        let pattern_confidence =
            (PATTERN_BASE + PATTERN_PER_MARKER * markers.len() as f64).min(STAGE_CEILING);
        let step = StepRecord::new(
            PipelineStage::PatternRecognition,
            format!("Recognized {} surface markers", markers.len()),
            pattern_confidence,
        )
        .with_metadata("markers", json!(markers));
        confidences.push(step.confidence);
        session.record_intermediate(json!({ "markers": markers }));
        session.record_step(step);

        // Stage 3: domain processing. Table lookup and bookkeeping only.
        let method = self.profile.method_label(task.task_type);
        let step = StepRecord::new(
            PipelineStage::DomainProcessing,
            format!("Applied {method}"),
            METHOD_CONFIDENCE,
        )
        .with_metadata("method", json!(method));
        confidences.push(step.confidence);
        session.record_step(step);

        // Stage 4: synthesis. Creative profiles draw an idea count from
        // the injected score source instead of ambient randomness.
        let idea_count = (self.profile.specialization == Specialization::Creative)
            .then(|| 2 + (self.scores.sample() * 4.0) as usize);
        let summary = match idea_count {
            Some(count) => format!(
                "Synthesized {count} candidate {} from {} prior steps using {method}",
                task.expected_output.descriptor,
                confidences.len(),
            ),
            None => format!(
                "Synthesized {} from {} prior steps using {method}",
                task.expected_output.descriptor,
                confidences.len(),
            ),
        };
        let mut step = StepRecord::new(
            PipelineStage::Synthesis,
            summary.clone(),
            SYNTHESIS_CONFIDENCE,
        );
        if let Some(count) = idea_count {
            step = step.with_metadata("idea_count", json!(count));
        }
        confidences.push(step.confidence);
        session.record_intermediate(json!({ "summary": summary }));
        session.record_step(step);

        // Stage 5: validation via variance of the four prior confidences.
        let variance = variance(&confidences);
        let validation_confidence = if variance < VARIANCE_THRESHOLD {
            VALIDATION_HIGH
        } else {
            VALIDATION_LOW
        };
        let step = StepRecord::new(
            PipelineStage::Validation,
            format!("Validated step agreement (variance {variance:.4})"),
            validation_confidence,
        )
        .with_metadata("variance", json!(variance));
        confidences.push(step.confidence);
        session.record_step(step);

        let confidence = confidences
            .iter()
            .product::<f64>()
            .clamp(CONFIDENCE_FLOOR, 1.0);
        debug!(
            confidence,
            stages = confidences.len(),
            "pipeline run complete"
        );

        PipelineRun {
            confidence,
            summary,
            method,
            idea_count,
        }
    }

    /// Scan for the profile's fixed marker set: keyword hits in text,
    /// shape tags and nesting markers otherwise.
    fn scan_markers(&self, input: &TaskInput) -> Vec<String> {
        match input {
            TaskInput::Text(text) => {
                let lower = text.to_lowercase();
                self.profile
                    .markers
                    .iter()
                    .filter(|marker| lower.contains(*marker))
                    .map(|marker| (*marker).to_string())
                    .collect()
            }
            other => {
                let mut markers = vec![format!("shape:{}", other.shape())];
                if other.depth() > 2 {
                    markers.push("nested".to_string());
                }
                if other.shape_diversity() > 1 {
                    markers.push("mixed_types".to_string());
                }
                markers
            }
        }
    }
}

/// Population variance.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        ExpectedOutput, Specialization, TaskContext, TaskType,
    };
    use crate::domain::ports::FixedScoreSource;
    use std::collections::BTreeMap;

    fn task_for(spec: Specialization, input: TaskInput) -> Task {
        let profile = spec.profile();
        let task_type = profile.classify(&input);
        Task::new(
            task_type,
            input,
            TaskContext::default(),
            BTreeMap::new(),
            ExpectedOutput {
                descriptor: profile.expected_output(task_type).to_string(),
            },
            0.6,
            0.5,
        )
    }

    fn run_pipeline(spec: Specialization, input: TaskInput) -> (Session, PipelineRun) {
        let scores = FixedScoreSource::constant(0.5);
        let pipeline = Pipeline::new(spec.profile(), &scores);
        let task = task_for(spec, input);
        let mut session = Session::open(task.id);
        let run = pipeline.run(&task, &mut session);
        (session, run)
    }

    #[test]
    fn test_scenario_c_exactly_five_steps_in_order() {
        let (session, _) = run_pipeline(
            Specialization::Reasoning,
            TaskInput::from("prove that all premises hold"),
        );
        let indices: Vec<u8> = session.steps.iter().map(|s| s.stage.index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_confidence_is_product_of_stage_confidences() {
        let (session, run) = run_pipeline(
            Specialization::Reasoning,
            TaskInput::from("therefore all swans are white because logic"),
        );
        let product: f64 = session.steps.iter().map(|s| s.confidence).product();
        assert!((run.confidence - product.clamp(0.1, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_running_product_is_non_increasing() {
        let (session, _) = run_pipeline(
            Specialization::Learning,
            TaskInput::from("predict the next sample in the trend"),
        );
        let mut running = 1.0;
        let mut previous = 1.0;
        for step in &session.steps {
            running *= step.confidence;
            assert!(running <= previous + 1e-12);
            previous = running;
        }
    }

    #[test]
    fn test_every_stage_confidence_within_ceiling() {
        let (session, _) = run_pipeline(
            Specialization::Reasoning,
            TaskInput::from("if this then that because all some not therefore"),
        );
        for step in &session.steps {
            assert!(step.confidence <= 0.9);
            assert!(step.confidence >= 0.0);
        }
        // Marker-saturated input still caps stage 2 at the ceiling.
        assert_eq!(session.steps[1].confidence, 0.9);
    }

    #[test]
    fn test_fixed_stage_constants() {
        let (session, _) = run_pipeline(Specialization::Reasoning, TaskInput::from("plain words"));
        assert_eq!(session.steps[0].confidence, 0.9);
        assert_eq!(session.steps[2].confidence, 0.8);
        assert_eq!(session.steps[3].confidence, 0.85);
    }

    #[test]
    fn test_validation_rewards_low_variance() {
        // No markers: stage 2 lands at 0.5 and variance goes high.
        let (session, _) = run_pipeline(Specialization::Reasoning, TaskInput::from("plain words"));
        assert_eq!(session.steps[4].confidence, 0.6);

        // Marker-rich input pushes stage 2 to 0.9 and variance low.
        let (session, _) = run_pipeline(
            Specialization::Reasoning,
            TaskInput::from("if all some not because then therefore"),
        );
        assert_eq!(session.steps[4].confidence, 0.9);
    }

    #[test]
    fn test_final_confidence_clamped_to_floor() {
        let (_, run) = run_pipeline(Specialization::Reasoning, TaskInput::from("plain words"));
        assert!(run.confidence >= 0.1);
        assert!(run.confidence <= 1.0);
    }

    #[test]
    fn test_creative_idea_count_is_deterministic_with_fixed_source() {
        let scores = FixedScoreSource::constant(0.75);
        let pipeline = Pipeline::new(Specialization::Creative.profile(), &scores);
        let task = task_for(Specialization::Creative, TaskInput::from("brainstorm ideas"));
        let mut session = Session::open(task.id);
        let run = pipeline.run(&task, &mut session);
        // 2 + floor(0.75 * 4) = 5.
        assert_eq!(run.idea_count, Some(5));
        assert_eq!(session.steps[3].metadata["idea_count"], json!(5));
    }

    #[test]
    fn test_non_creative_profiles_draw_no_ideas() {
        let (_, run) = run_pipeline(Specialization::Reasoning, TaskInput::from("prove it"));
        assert_eq!(run.idea_count, None);
    }
}

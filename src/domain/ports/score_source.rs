//! Injectable score source.
//!
//! The system this core models sprinkled ambient randomness (random idea
//! counts, random success rates) through its scoring paths. Core logic
//! here never calls ambient randomness directly; it draws from this port,
//! so tests can supply a deterministic source.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Provider of scores in [0, 1).
pub trait ScoreSource: Send + Sync {
    /// Draw the next score.
    fn sample(&self) -> f64;
}

/// Default source: sub-nanosecond system time as a cheap entropy source.
/// The project does not depend on the `rand` crate.
#[derive(Debug, Clone, Default)]
pub struct JitterScoreSource;

impl ScoreSource for JitterScoreSource {
    fn sample(&self) -> f64 {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos();
        f64::from(nanos % 1000) / 1000.0
    }
}

/// Deterministic source for tests: replays a fixed score list, then
/// repeats the last value (0.5 when constructed empty).
#[derive(Debug, Default)]
pub struct FixedScoreSource {
    scores: Mutex<VecDeque<f64>>,
    fallback: Mutex<f64>,
}

impl FixedScoreSource {
    /// Build a source that replays the given scores in order.
    pub fn new(scores: &[f64]) -> Self {
        Self {
            scores: Mutex::new(scores.iter().map(|s| s.clamp(0.0, 1.0)).collect()),
            fallback: Mutex::new(0.5),
        }
    }

    /// A source that always returns the same score.
    pub fn constant(score: f64) -> Self {
        let source = Self::new(&[]);
        *source.fallback.lock().unwrap_or_else(std::sync::PoisonError::into_inner) =
            score.clamp(0.0, 1.0);
        source
    }
}

impl ScoreSource for FixedScoreSource {
    fn sample(&self) -> f64 {
        let mut scores = self
            .scores
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match scores.pop_front() {
            Some(score) => {
                let mut fallback = self
                    .fallback
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                *fallback = score;
                score
            }
            None => *self
                .fallback
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        }
    }
}

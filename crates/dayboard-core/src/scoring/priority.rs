//! Task priority score.
//!
//! The score is a weighted sum of four 1-10 attributes:
//!
//! ```text
//! score = urgency*0.3 + importance*0.3 + impact*0.3 + effort*0.1
//! ```
//!
//! clamped to `[0.1, 10.0]` and rounded to one decimal. Effort carries a
//! smaller weight so that urgent, important, high-impact work ranks first
//! regardless of its size.

use serde::{Deserialize, Serialize};

use super::clamp_round1;

/// Lowest score a task can have.
pub const MIN_SCORE: f64 = 0.1;
/// Highest score a task can have.
pub const MAX_SCORE: f64 = 10.0;

const URGENCY_WEIGHT: f64 = 0.3;
const IMPORTANCE_WEIGHT: f64 = 0.3;
const IMPACT_WEIGHT: f64 = 0.3;
const EFFORT_WEIGHT: f64 = 0.1;

/// The four weighted attributes of a task.
///
/// Each is expected in `[1, 10]`. Nothing here rejects other values; see
/// [`crate::task::TaskDraft::validate`] for the strict check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub urgency: i32,
    pub importance: i32,
    pub effort: i32,
    pub impact: i32,
}

impl Weights {
    pub fn new(urgency: i32, importance: i32, effort: i32, impact: i32) -> Self {
        Self {
            urgency,
            importance,
            effort,
            impact,
        }
    }

    /// Priority score for these weights.
    pub fn score(&self) -> f64 {
        priority_score(self.urgency, self.importance, self.effort, self.impact)
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(5, 5, 5, 5)
    }
}

/// Compute the bounded priority score.
///
/// Total over its input: out-of-range values only skew the result, which is
/// always within `[MIN_SCORE, MAX_SCORE]` and has one decimal place.
pub fn priority_score(urgency: i32, importance: i32, effort: i32, impact: i32) -> f64 {
    let raw = f64::from(urgency) * URGENCY_WEIGHT
        + f64::from(importance) * IMPORTANCE_WEIGHT
        + f64::from(impact) * IMPACT_WEIGHT
        + f64::from(effort) * EFFORT_WEIGHT;
    clamp_round1(raw, MIN_SCORE, MAX_SCORE)
}

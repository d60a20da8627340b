//! Priority and productivity scoring.
//!
//! Two pure building blocks live here:
//!
//! - [`priority_score`]: maps a task's four weighted attributes to a bounded
//!   priority score in `[0.1, 10.0]`.
//! - [`adjust_points`]: rewards or penalizes a completed task's points
//!   according to how actual time compared with the estimate.
//!
//! Both are total over their inputs and have no side effects, so they can be
//! called from any context without coordination.

mod efficiency;
mod priority;

pub use efficiency::{adjust_points, EfficiencyBand};
pub use priority::{priority_score, Weights, MAX_SCORE, MIN_SCORE};

/// Round to one decimal place, half away from zero.
///
/// All engine outputs that are reported "to one decimal" go through this
/// helper so that identical inputs always produce bit-identical outputs.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamp into `[lo, hi]`, then round to one decimal place.
pub fn clamp_round1(value: f64, lo: f64, hi: f64) -> f64 {
    round1(value.clamp(lo, hi))
}

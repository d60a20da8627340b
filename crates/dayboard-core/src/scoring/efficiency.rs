//! Time-efficiency adjustment of completed-task points.
//!
//! When a task is completed its priority score is used as its base points.
//! For monthly aggregation those points are scaled by how the time actually
//! spent compares with the estimate:
//!
//! | actual / estimated | multiplier |
//! |--------------------|-----------:|
//! | ≤ 0.8              | 1.3        |
//! | ≤ 1.0              | 1.1        |
//! | ≤ 1.5              | 1.0        |
//! | ≤ 2.0              | 0.9        |
//! | > 2.0              | 0.7        |
//!
//! Without an estimate there is no ratio and the points pass through
//! unchanged. The task's stored priority score is never touched.

use serde::{Deserialize, Serialize};

/// Bucket of the actual/estimated ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyBand {
    /// Finished materially faster than estimated
    Fast,
    /// Finished at or slightly under the estimate
    OnTime,
    /// Modest overrun
    SlightOverrun,
    /// Significant overrun
    Overrun,
    /// Major overrun
    SevereOverrun,
    /// No estimate to compare against
    Unestimated,
}

impl EfficiencyBand {
    /// Classify a task's elapsed time against its estimate.
    ///
    /// `estimated_minutes` of `None` or `0` yields [`EfficiencyBand::Unestimated`].
    pub fn classify(estimated_minutes: Option<u32>, actual_minutes: u32) -> Self {
        let estimated = match estimated_minutes {
            Some(minutes) if minutes > 0 => f64::from(minutes),
            _ => return EfficiencyBand::Unestimated,
        };
        let ratio = f64::from(actual_minutes) / estimated;

        if ratio <= 0.8 {
            EfficiencyBand::Fast
        } else if ratio <= 1.0 {
            EfficiencyBand::OnTime
        } else if ratio <= 1.5 {
            EfficiencyBand::SlightOverrun
        } else if ratio <= 2.0 {
            EfficiencyBand::Overrun
        } else {
            EfficiencyBand::SevereOverrun
        }
    }

    /// Points multiplier for this band.
    pub fn multiplier(&self) -> f64 {
        match self {
            EfficiencyBand::Fast => 1.3,
            EfficiencyBand::OnTime => 1.1,
            EfficiencyBand::SlightOverrun => 1.0,
            EfficiencyBand::Overrun => 0.9,
            EfficiencyBand::SevereOverrun => 0.7,
            EfficiencyBand::Unestimated => 1.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EfficiencyBand::Fast => "Efficiency bonus",
            EfficiencyBand::OnTime => "On-time bonus",
            EfficiencyBand::SlightOverrun => "Neutral",
            EfficiencyBand::Overrun => "Overrun penalty",
            EfficiencyBand::SevereOverrun => "Major overrun penalty",
            EfficiencyBand::Unestimated => "No estimate",
        }
    }
}

/// Scale `base_points` by the time-efficiency multiplier.
///
/// The result is not clamped: summed monthly points are not meant to mirror
/// the single-task score bound.
pub fn adjust_points(base_points: f64, estimated_minutes: Option<u32>, actual_minutes: u32) -> f64 {
    base_points * EfficiencyBand::classify(estimated_minutes, actual_minutes).multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fast_finish_earns_bonus() {
        assert!(approx_eq(adjust_points(5.0, Some(60), 40), 6.5));
    }

    #[test]
    fn missing_or_zero_estimate_is_neutral() {
        assert!(approx_eq(adjust_points(5.0, Some(0), 40), 5.0));
        assert!(approx_eq(adjust_points(5.0, None, 40), 5.0));
        assert_eq!(EfficiencyBand::classify(None, 40), EfficiencyBand::Unestimated);
    }

    #[test]
    fn major_overrun_is_penalized() {
        assert!(approx_eq(adjust_points(4.0, Some(60), 150), 2.8));
    }

    #[test]
    fn band_boundaries_are_inclusive_on_the_upper_edge() {
        assert_eq!(EfficiencyBand::classify(Some(60), 48), EfficiencyBand::Fast);
        assert_eq!(EfficiencyBand::classify(Some(60), 49), EfficiencyBand::OnTime);
        assert_eq!(EfficiencyBand::classify(Some(60), 60), EfficiencyBand::OnTime);
        assert_eq!(EfficiencyBand::classify(Some(60), 61), EfficiencyBand::SlightOverrun);
        assert_eq!(EfficiencyBand::classify(Some(60), 90), EfficiencyBand::SlightOverrun);
        assert_eq!(EfficiencyBand::classify(Some(60), 91), EfficiencyBand::Overrun);
        assert_eq!(EfficiencyBand::classify(Some(60), 120), EfficiencyBand::Overrun);
        assert_eq!(EfficiencyBand::classify(Some(60), 121), EfficiencyBand::SevereOverrun);
    }

    #[test]
    fn untimed_task_with_estimate_counts_as_fast() {
        assert_eq!(EfficiencyBand::classify(Some(30), 0), EfficiencyBand::Fast);
    }

    #[test]
    fn result_is_not_clamped() {
        assert!(approx_eq(adjust_points(10.0, Some(60), 30), 13.0));
    }
}

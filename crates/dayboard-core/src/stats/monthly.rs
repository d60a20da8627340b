//! Monthly productivity summary.
//!
//! Sums time-efficiency adjusted points over a month's completed tasks and
//! labels how the time actually spent compared with the estimates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::scoring::{adjust_points, round1};
use crate::task::Task;

/// Qualitative bucket of the month's time usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffortLabel {
    #[serde(rename = "Poor")]
    Poor,
    #[serde(rename = "Below Standard")]
    BelowStandard,
    #[serde(rename = "Standard")]
    Standard,
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Outstanding")]
    Outstanding,
    #[serde(rename = "No estimates")]
    NoEstimates,
}

impl EffortLabel {
    /// Bucket a time-usage percentage; `None` means no estimates existed.
    pub fn from_percent(percent: Option<i64>) -> Self {
        match percent {
            None => EffortLabel::NoEstimates,
            Some(p) if p < 50 => EffortLabel::Poor,
            Some(p) if p < 75 => EffortLabel::BelowStandard,
            Some(p) if p <= 100 => EffortLabel::Standard,
            Some(p) if p <= 150 => EffortLabel::Excellent,
            Some(_) => EffortLabel::Outstanding,
        }
    }
}

/// Dashboard summary for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Sum of adjusted points, one decimal
    pub total_points: f64,
    pub total_completed: u32,
    /// `total_points / total_completed`, one decimal; 0 when nothing completed
    pub average_score: f64,
    /// Actual over estimated minutes as a whole percentage.
    /// `None` when no completed task carried an estimate.
    pub time_usage_percent: Option<i64>,
    pub effort_label: EffortLabel,
}

impl Default for MonthlySummary {
    fn default() -> Self {
        Self {
            total_points: 0.0,
            total_completed: 0,
            average_score: 0.0,
            time_usage_percent: None,
            effort_label: EffortLabel::NoEstimates,
        }
    }
}

/// Aggregates completed tasks into a [`MonthlySummary`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Summarize the given tasks.
    ///
    /// Incomplete tasks are ignored. Time usage only compares tasks that
    /// have an estimate, so a task without one cannot inflate the
    /// percentage.
    pub fn aggregate<'a, I>(&self, tasks: I) -> MonthlySummary
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut points = 0.0f64;
        let mut completed = 0u32;
        let mut estimated_minutes = 0u64;
        let mut actual_minutes = 0u64;

        for task in tasks.into_iter().filter(|t| t.is_completed()) {
            completed += 1;
            points += adjust_points(task.priority_score(), task.duration_minutes(), task.actual_minutes());
            if let Some(estimate) = task.duration_minutes().filter(|m| *m > 0) {
                estimated_minutes += u64::from(estimate);
                actual_minutes += u64::from(task.actual_minutes());
            }
        }

        let average_score = if completed == 0 {
            0.0
        } else {
            round1(points / f64::from(completed))
        };
        let time_usage_percent = if estimated_minutes == 0 {
            None
        } else {
            Some((actual_minutes as f64 / estimated_minutes as f64 * 100.0).round() as i64)
        };

        MonthlySummary {
            total_points: round1(points),
            total_completed: completed,
            average_score,
            time_usage_percent,
            effort_label: EffortLabel::from_percent(time_usage_percent),
        }
    }

    /// Summarize the completed tasks dated within `year`-`month`.
    pub fn aggregate_month(&self, tasks: &[Task], year: i32, month: u32) -> MonthlySummary {
        self.aggregate(
            tasks
                .iter()
                .filter(|t| t.date().year() == year && t.date().month() == month),
        )
    }
}

/// First and last day of a month, or `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Weights;
    use crate::task::TaskDraft;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn start_of(day: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&day.and_hms_opt(9, 0, 0).unwrap())
    }

    /// Completed task whose timer ran for `actual` minutes.
    fn done(date: NaiveDate, weights: Weights, estimate: Option<u32>, actual: i64) -> Task {
        let now = start_of(date);
        let mut draft = TaskDraft::new("Task", weights, date);
        draft.duration_minutes = estimate;
        let mut task = draft.into_task(now).unwrap();
        if actual > 0 {
            task.start(now).unwrap();
        }
        task.finish(now + Duration::minutes(actual)).unwrap();
        task
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn empty_month_reports_no_data() {
        let summary = MonthlyAggregator::new().aggregate(&[] as &[Task]);
        assert_eq!(summary, MonthlySummary::default());
        assert_eq!(summary.effort_label, EffortLabel::NoEstimates);
        assert_eq!(summary.time_usage_percent, None);
        assert_eq!(summary.average_score, 0.0);
    }

    #[test]
    fn sums_adjusted_points() {
        // 5.0 * 1.3 and 4.0 * 0.7
        let tasks = vec![
            done(march(1), Weights::new(5, 5, 5, 5), Some(60), 40),
            done(march(2), Weights::new(4, 4, 4, 4), Some(60), 150),
        ];
        let summary = MonthlyAggregator::new().aggregate(&tasks);
        assert_eq!(summary.total_completed, 2);
        assert_eq!(summary.total_points, 9.3);
        assert_eq!(summary.average_score, 4.7);
        // 190 / 120
        assert_eq!(summary.time_usage_percent, Some(158));
        assert_eq!(summary.effort_label, EffortLabel::Outstanding);
    }

    #[test]
    fn tasks_without_estimates_score_but_do_not_affect_usage() {
        let tasks = vec![
            done(march(1), Weights::new(5, 5, 5, 5), None, 90),
            done(march(2), Weights::new(5, 5, 5, 5), Some(60), 60),
        ];
        let summary = MonthlyAggregator::new().aggregate(&tasks);
        // 5.0 * 1.0 + 5.0 * 1.1
        assert_eq!(summary.total_points, 10.5);
        assert_eq!(summary.time_usage_percent, Some(100));
        assert_eq!(summary.effort_label, EffortLabel::Standard);
    }

    #[test]
    fn only_unestimated_tasks_yield_no_estimates_label() {
        let tasks = vec![done(march(1), Weights::default(), None, 30)];
        let summary = MonthlyAggregator::new().aggregate(&tasks);
        assert_eq!(summary.total_completed, 1);
        assert_eq!(summary.time_usage_percent, None);
        assert_eq!(summary.effort_label, EffortLabel::NoEstimates);
    }

    #[test]
    fn zero_percent_is_distinct_from_no_data() {
        let tasks = vec![done(march(1), Weights::default(), Some(60), 0)];
        let summary = MonthlyAggregator::new().aggregate(&tasks);
        assert_eq!(summary.time_usage_percent, Some(0));
        assert_eq!(summary.effort_label, EffortLabel::Poor);
    }

    #[test]
    fn incomplete_and_other_month_tasks_are_ignored() {
        let now = start_of(march(3));
        let open = TaskDraft::new("Open", Weights::default(), march(3))
            .into_task(now)
            .unwrap();
        let april = done(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(), Weights::default(), Some(30), 30);
        let tasks = vec![open, april, done(march(4), Weights::default(), Some(30), 30)];

        let summary = MonthlyAggregator::new().aggregate_month(&tasks, 2026, 3);
        assert_eq!(summary.total_completed, 1);
        assert_eq!(summary.total_points, 5.5);
    }

    #[test]
    fn label_buckets() {
        assert_eq!(EffortLabel::from_percent(Some(49)), EffortLabel::Poor);
        assert_eq!(EffortLabel::from_percent(Some(50)), EffortLabel::BelowStandard);
        assert_eq!(EffortLabel::from_percent(Some(74)), EffortLabel::BelowStandard);
        assert_eq!(EffortLabel::from_percent(Some(75)), EffortLabel::Standard);
        assert_eq!(EffortLabel::from_percent(Some(100)), EffortLabel::Standard);
        assert_eq!(EffortLabel::from_percent(Some(101)), EffortLabel::Excellent);
        assert_eq!(EffortLabel::from_percent(Some(150)), EffortLabel::Excellent);
        assert_eq!(EffortLabel::from_percent(Some(151)), EffortLabel::Outstanding);
        assert_eq!(EffortLabel::from_percent(None), EffortLabel::NoEstimates);
    }

    #[test]
    fn label_serializes_as_display_text() {
        let json = serde_json::to_string(&EffortLabel::BelowStandard).unwrap();
        assert_eq!(json, "\"Below Standard\"");
    }

    #[test]
    fn month_bounds_handles_december_and_leap_years() {
        assert_eq!(
            month_bounds(2024, 2),
            Some((
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
            ))
        );
        assert_eq!(
            month_bounds(2026, 12).map(|(_, last)| last),
            NaiveDate::from_ymd_opt(2026, 12, 31)
        );
        assert_eq!(month_bounds(2026, 13), None);
    }
}

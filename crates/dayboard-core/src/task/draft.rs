//! Strict input validation for new tasks.
//!
//! The scoring engine accepts any weights; rejecting bad input is the job of
//! the layer that takes user input, and that is what [`TaskDraft`] does.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::Task;
use crate::error::ValidationError;
use crate::scoring::Weights;

/// Allowed range for each weight.
pub const WEIGHT_RANGE: RangeInclusive<i32> = 1..=10;
/// Allowed range for an estimated duration, in minutes.
pub const DURATION_RANGE: RangeInclusive<u32> = 5..=480;

/// User-supplied fields of a task before it exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(flatten)]
    pub weights: Weights,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    pub date: NaiveDate,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, weights: Weights, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            weights,
            duration_minutes: None,
            date,
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        validate_weights(&self.weights)?;
        if let Some(minutes) = self.duration_minutes {
            validate_duration(minutes)?;
        }
        Ok(())
    }

    /// Validate and build the task.
    pub fn into_task(self, now: DateTime<Utc>) -> Result<Task, ValidationError> {
        self.validate()?;
        Ok(Task::new(
            self.title.trim().to_string(),
            self.weights,
            self.duration_minutes,
            self.date,
            now,
        ))
    }
}

/// Reject any weight outside [`WEIGHT_RANGE`].
pub fn validate_weights(weights: &Weights) -> Result<(), ValidationError> {
    let fields = [
        ("urgency", weights.urgency),
        ("importance", weights.importance),
        ("effort", weights.effort),
        ("impact", weights.impact),
    ];
    for (field, value) in fields {
        if !WEIGHT_RANGE.contains(&value) {
            return Err(ValidationError::OutOfRange {
                field,
                min: i64::from(*WEIGHT_RANGE.start()),
                max: i64::from(*WEIGHT_RANGE.end()),
                value: i64::from(value),
            });
        }
    }
    Ok(())
}

/// Reject an estimate outside [`DURATION_RANGE`].
pub fn validate_duration(minutes: u32) -> Result<(), ValidationError> {
    if !DURATION_RANGE.contains(&minutes) {
        return Err(ValidationError::OutOfRange {
            field: "duration_minutes",
            min: i64::from(*DURATION_RANGE.start()),
            max: i64::from(*DURATION_RANGE.end()),
            value: i64::from(minutes),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()
    }

    #[test]
    fn valid_draft_becomes_task() {
        let now = Utc.with_ymd_and_hms(2026, 5, 2, 8, 0, 0).unwrap();
        let task = TaskDraft::new("  Review PRs ", Weights::new(7, 7, 3, 6), day())
            .with_duration(45)
            .into_task(now)
            .unwrap();
        assert_eq!(task.title(), "Review PRs");
        assert_eq!(task.duration_minutes(), Some(45));
        assert_eq!(task.date(), day());
        assert_eq!(task.created_at(), now);
    }

    #[test]
    fn blank_title_is_rejected() {
        let draft = TaskDraft::new(" ", Weights::default(), day());
        assert_eq!(draft.validate(), Err(ValidationError::Empty { field: "title" }));
    }

    #[test]
    fn out_of_range_weight_names_the_field() {
        let draft = TaskDraft::new("Too urgent", Weights::new(5, 5, 5, 15), day());
        assert_eq!(
            draft.validate(),
            Err(ValidationError::OutOfRange {
                field: "impact",
                min: 1,
                max: 10,
                value: 15
            })
        );
    }

    #[test]
    fn duration_bounds() {
        let base = TaskDraft::new("Sized", Weights::default(), day());
        assert!(base.clone().with_duration(5).validate().is_ok());
        assert!(base.clone().with_duration(480).validate().is_ok());
        assert!(base.clone().with_duration(4).validate().is_err());
        assert!(base.clone().with_duration(481).validate().is_err());
        assert!(base.validate().is_ok());
    }
}

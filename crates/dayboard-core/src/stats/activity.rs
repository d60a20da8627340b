//! Building the per-day activity sequence from tasks and journal entries.

use chrono::{Duration, NaiveDate};
use std::collections::{BTreeSet, HashMap};

use super::streak::DailyActivityRecord;
use crate::error::ValidationError;
use crate::task::Task;

/// One record per day in `[start, end]`, oldest first.
///
/// Completed tasks count toward the day they belong to. Returns an empty
/// sequence when `start > end`.
pub fn build_activity_range(
    start: NaiveDate,
    end: NaiveDate,
    tasks: &[Task],
    journal_dates: &BTreeSet<NaiveDate>,
) -> Vec<DailyActivityRecord> {
    let mut completed: HashMap<NaiveDate, u32> = HashMap::new();
    for task in tasks.iter().filter(|t| t.is_completed()) {
        *completed.entry(task.date()).or_default() += 1;
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            DailyActivityRecord::new(
                day,
                completed.get(&day).copied().unwrap_or(0),
                journal_dates.contains(&day),
            )
        })
        .collect()
}

/// Longest streak lookback accepted, in days.
pub const MAX_LOOKBACK_DAYS: u32 = 3660;

/// The `[start, today]` window spanning `lookback_days` days, or `None` for a
/// lookback of 0.
pub fn lookback_window(
    today: NaiveDate,
    lookback_days: u32,
) -> Result<Option<(NaiveDate, NaiveDate)>, ValidationError> {
    let out_of_range = || ValidationError::OutOfRange {
        field: "lookback_days",
        min: 0,
        max: i64::from(MAX_LOOKBACK_DAYS),
        value: i64::from(lookback_days),
    };
    if lookback_days > MAX_LOOKBACK_DAYS {
        return Err(out_of_range());
    }
    if lookback_days == 0 {
        return Ok(None);
    }
    let start = today
        .checked_sub_signed(Duration::days(i64::from(lookback_days) - 1))
        .ok_or_else(out_of_range)?;
    Ok(Some((start, today)))
}

/// Check that records are strictly ascending by date.
pub fn validate_sequence(records: &[DailyActivityRecord]) -> Result<(), ValidationError> {
    for pair in records.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(ValidationError::UnorderedActivity { date: pair[1].date });
        }
    }
    Ok(())
}

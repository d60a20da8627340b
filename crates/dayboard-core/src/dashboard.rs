//! The data behind the dashboard's landing view.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::Result;
use crate::stats::{lookback_window, MonthlySummary, StreakAnalyzer, StreakSummary};
use crate::storage::Database;
use crate::task::{rank_by_priority, Task};

/// Today's tasks, streaks and the month-to-date summary.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub date: NaiveDate,
    /// Highest priority first
    pub tasks: Vec<Task>,
    pub open_tasks: usize,
    pub streaks: StreakSummary,
    pub lookback_days: u32,
    pub month: MonthlySummary,
}

impl Dashboard {
    /// Gather everything from `db` as of `today`.
    ///
    /// Streaks are computed over the `lookback_days` days ending at `today`;
    /// a lookback of 0 yields no streaks and one above
    /// [`MAX_LOOKBACK_DAYS`](crate::stats::MAX_LOOKBACK_DAYS) is rejected.
    pub fn build(db: &Database, today: NaiveDate, lookback_days: u32) -> Result<Self> {
        let mut tasks = db.list_tasks_in_range(today, today)?;
        rank_by_priority(&mut tasks);
        let open_tasks = tasks.iter().filter(|t| !t.is_completed()).count();

        let streaks = match lookback_window(today, lookback_days)? {
            Some((start, end)) => StreakAnalyzer::new().analyze(&db.activity_range(start, end)?),
            None => StreakSummary::default(),
        };

        let month = db.monthly_summary(today.year(), today.month())?;
        tracing::debug!(%today, open_tasks, current_streak = streaks.current_streak, "built dashboard");

        Ok(Self {
            date: today,
            tasks,
            open_tasks,
            streaks,
            lookback_days,
            month,
        })
    }
}

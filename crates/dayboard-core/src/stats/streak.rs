//! Activity streaks.
//!
//! A day is active when at least one task was completed or a journal entry
//! was written. The current streak is the run of active days ending at the
//! most recent record; the best streak is the longest run anywhere.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Activity on a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivityRecord {
    pub date: NaiveDate,
    pub tasks_completed: u32,
    pub journal_entry: bool,
}

impl DailyActivityRecord {
    pub fn new(date: NaiveDate, tasks_completed: u32, journal_entry: bool) -> Self {
        Self {
            date,
            tasks_completed,
            journal_entry,
        }
    }

    pub fn is_active(&self) -> bool {
        self.tasks_completed > 0 || self.journal_entry
    }
}

/// Current and best streak lengths, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub best_streak: u32,
}

/// Computes streaks over a date-ordered activity sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakAnalyzer;

impl StreakAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze records ordered oldest first.
    ///
    /// Ordering is the caller's contract; see
    /// [`super::validate_sequence`].
    pub fn analyze(&self, records: &[DailyActivityRecord]) -> StreakSummary {
        let mut current_streak = 0u32;
        let mut current_fixed = false;
        let mut run = 0u32;
        let mut best_streak = 0u32;

        for record in records.iter().rev() {
            if record.is_active() {
                run += 1;
                best_streak = best_streak.max(run);
            } else {
                if !current_fixed {
                    current_streak = run;
                    current_fixed = true;
                }
                run = 0;
            }
        }
        if !current_fixed {
            current_streak = run;
        }

        StreakSummary {
            current_streak,
            best_streak,
        }
    }
}

//! Statistics module for Dayboard
//!
//! This module provides the dashboard analytics computed on demand from the
//! task and journal collections: activity streaks and the monthly
//! productivity summary. Nothing here is persisted.

mod activity;
mod monthly;
mod streak;

pub use activity::{build_activity_range, lookback_window, validate_sequence, MAX_LOOKBACK_DAYS};

pub use monthly::{month_bounds, EffortLabel, MonthlyAggregator, MonthlySummary};

pub use streak::{DailyActivityRecord, StreakAnalyzer, StreakSummary};

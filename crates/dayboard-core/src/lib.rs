//! # Dayboard Core Library
//!
//! This library provides the core logic for Dayboard, a personal productivity
//! dashboard of dated tasks and a daily journal. The CLI binary is a thin
//! layer over the same library.
//!
//! ## Architecture
//!
//! - **Scoring**: pure functions for the task priority score and the
//!   time-efficiency points multiplier
//! - **Stats**: activity streaks and the monthly productivity summary,
//!   computed on demand and never persisted
//! - **Tasks**: task lifecycle, stopwatch and input validation
//! - **Storage**: SQLite persistence for tasks and journal entries, and
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`priority_score`]: Bounded score from urgency, importance, effort and impact
//! - [`adjust_points`]: Points multiplier from estimated vs actual minutes
//! - [`StreakAnalyzer`]: Current and best activity streaks
//! - [`MonthlyAggregator`]: Month summary with effort label
//! - [`Database`]: Task and journal persistence
//! - [`Config`]: Application configuration management

pub mod dashboard;
pub mod error;
pub mod journal;
pub mod scoring;
pub mod stats;
pub mod storage;
pub mod task;

pub use dashboard::Dashboard;
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use journal::JournalEntry;
pub use scoring::{adjust_points, priority_score, EfficiencyBand, Weights};
pub use stats::{
    lookback_window, DailyActivityRecord, EffortLabel, MonthlyAggregator, MonthlySummary,
    StreakAnalyzer, StreakSummary, MAX_LOOKBACK_DAYS,
};
pub use storage::{Config, Database};
pub use task::{Task, TaskDraft, TaskState, TaskTransitionError};

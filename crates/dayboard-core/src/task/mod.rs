//! Dated tasks with a derived priority score and a stopwatch.
//!
//! A task's `priority_score` is never assigned directly: it is recomputed
//! from the four weights every time they change, and recomputed again when a
//! task is loaded from storage.
//!
//! States follow strict transitions:
//!
//! ```text
//!   READY ──start──> RUNNING ──finish──> DONE
//!     |                |  ^
//!     |              pause |
//!     |                v  start
//!     |              PAUSED ──finish──> DONE
//!     +───────────────finish──────────> DONE
//! ```
//!
//! Completed tasks are terminal; their attributes can no longer be edited.

mod draft;

pub use draft::{validate_duration, validate_weights, TaskDraft, DURATION_RANGE, WEIGHT_RANGE};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::ValidationError;
use crate::scoring::Weights;

/// Task state enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    /// Created, timer never started
    #[default]
    Ready,
    /// Timer is running
    Running,
    /// Timer stopped, task not finished
    Paused,
    /// Completed (terminal state)
    Done,
}

impl TaskState {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &TaskState) -> bool {
        match self {
            TaskState::Ready => matches!(to, TaskState::Running | TaskState::Done),
            TaskState::Running => matches!(to, TaskState::Paused | TaskState::Done),
            TaskState::Paused => matches!(to, TaskState::Running | TaskState::Done),
            TaskState::Done => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Ready => "READY",
            TaskState::Running => "RUNNING",
            TaskState::Paused => "PAUSED",
            TaskState::Done => "DONE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "READY" => Some(TaskState::Ready),
            "RUNNING" => Some(TaskState::Running),
            "PAUSED" => Some(TaskState::Paused),
            "DONE" => Some(TaskState::Done),
            _ => None,
        }
    }
}

/// Error returned when an invalid state transition is attempted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskTransitionError {
    pub from: TaskState,
    pub to: TaskState,
}

impl fmt::Display for TaskTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid state transition: {:?} → {:?}", self.from, self.to)
    }
}

impl std::error::Error for TaskTransitionError {}

/// A unit of work on a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    id: String,
    title: String,
    #[serde(flatten)]
    weights: Weights,
    priority_score: f64,
    /// Estimated duration; `None` when no estimate was given.
    duration_minutes: Option<u32>,
    /// Accumulated timer minutes.
    actual_minutes: u32,
    state: TaskState,
    completed: bool,
    date: NaiveDate,
    running_since: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Stored task columns, before derived fields are recomputed.
#[derive(Debug, Clone)]
pub(crate) struct StoredTask {
    pub id: String,
    pub title: String,
    pub weights: Weights,
    pub duration_minutes: Option<u32>,
    pub actual_minutes: u32,
    pub state: TaskState,
    pub date: NaiveDate,
    pub running_since: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub(crate) fn new(
        title: String,
        weights: Weights,
        duration_minutes: Option<u32>,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Task {
            id: format!("task-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title,
            weights,
            priority_score: weights.score(),
            duration_minutes,
            actual_minutes: 0,
            state: TaskState::Ready,
            completed: false,
            date,
            running_since: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Rebuild a task from storage. The score is derived, never read back.
    pub(crate) fn restore(stored: StoredTask) -> Self {
        let completed = stored.state == TaskState::Done;
        Task {
            id: stored.id,
            title: stored.title,
            priority_score: stored.weights.score(),
            weights: stored.weights,
            duration_minutes: stored.duration_minutes,
            actual_minutes: stored.actual_minutes,
            state: stored.state,
            completed,
            date: stored.date,
            running_since: stored.running_since,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            completed_at: stored.completed_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    pub fn priority_score(&self) -> f64 {
        self.priority_score
    }

    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    pub fn actual_minutes(&self) -> u32 {
        self.actual_minutes
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn running_since(&self) -> Option<DateTime<Utc>> {
        self.running_since
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    fn ensure_editable(&self) -> Result<(), ValidationError> {
        if self.completed {
            return Err(ValidationError::TaskCompleted {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Replace the weights and recompute the priority score.
    pub fn set_weights(&mut self, weights: Weights, now: DateTime<Utc>) -> Result<(), ValidationError> {
        self.ensure_editable()?;
        self.weights = weights;
        self.priority_score = weights.score();
        self.updated_at = now;
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>, now: DateTime<Utc>) -> Result<(), ValidationError> {
        self.ensure_editable()?;
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        self.title = title.trim().to_string();
        self.updated_at = now;
        Ok(())
    }

    pub fn set_duration(&mut self, duration_minutes: Option<u32>, now: DateTime<Utc>) -> Result<(), ValidationError> {
        self.ensure_editable()?;
        self.duration_minutes = duration_minutes;
        self.updated_at = now;
        Ok(())
    }

    fn transition_to(&mut self, new_state: TaskState, now: DateTime<Utc>) -> Result<(), TaskTransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(TaskTransitionError {
                from: self.state,
                to: new_state,
            });
        }
        self.state = new_state;
        self.updated_at = now;
        Ok(())
    }

    /// Fold the running interval, if any, into `actual_minutes`.
    fn settle_timer(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.running_since.take() {
            let seconds = now.signed_duration_since(since).num_seconds();
            if seconds < 0 {
                tracing::warn!(task = %self.id, seconds, "timer stopped before it started; ignoring interval");
                return;
            }
            let minutes = u32::try_from((seconds + 30) / 60).unwrap_or(u32::MAX);
            self.actual_minutes = self.actual_minutes.saturating_add(minutes);
        }
    }

    /// Start or resume the timer.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), TaskTransitionError> {
        self.transition_to(TaskState::Running, now)?;
        self.running_since = Some(now);
        Ok(())
    }

    /// Stop the timer, keeping the elapsed time.
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), TaskTransitionError> {
        self.transition_to(TaskState::Paused, now)?;
        self.settle_timer(now);
        Ok(())
    }

    /// Mark the task completed and finalize `actual_minutes`.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<(), TaskTransitionError> {
        self.transition_to(TaskState::Done, now)?;
        self.settle_timer(now);
        self.completed = true;
        self.completed_at = Some(now);
        Ok(())
    }
}

/// Order tasks for display: highest score first, then by title.
pub fn rank_by_priority(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.title.cmp(&b.title))
    });
}

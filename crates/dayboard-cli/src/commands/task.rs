//! Task management commands for CLI.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use dayboard_core::task::{validate_duration, validate_weights};
use dayboard_core::{Config, Database, TaskDraft, Weights};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Urgency, 1-10
        #[arg(long, default_value_t = 5)]
        urgency: i32,
        /// Importance, 1-10
        #[arg(long, default_value_t = 5)]
        importance: i32,
        /// Effort, 1-10
        #[arg(long, default_value_t = 5)]
        effort: i32,
        /// Impact, 1-10
        #[arg(long, default_value_t = 5)]
        impact: i32,
        /// Estimated minutes, 5-480 (0 for no estimate; default from config)
        #[arg(long)]
        duration: Option<u32>,
        /// Day the task belongs to (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List tasks
    List {
        /// Only tasks on this day
        #[arg(long, conflicts_with_all = ["from", "to"])]
        date: Option<NaiveDate>,
        /// First day of a range (inclusive)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Last day of a range (inclusive)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New urgency
        #[arg(long)]
        urgency: Option<i32>,
        /// New importance
        #[arg(long)]
        importance: Option<i32>,
        /// New effort
        #[arg(long)]
        effort: Option<i32>,
        /// New impact
        #[arg(long)]
        impact: Option<i32>,
        /// New estimate in minutes (0 removes the estimate)
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Start or resume the task timer
    Start {
        /// Task ID
        id: String,
    },
    /// Pause the task timer
    Pause {
        /// Task ID
        id: String,
    },
    /// Mark the task completed
    Finish {
        /// Task ID
        id: String,
    },
}

/// 0 means "no estimate" on the command line.
fn estimate(minutes: u32) -> Option<u32> {
    (minutes > 0).then_some(minutes)
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TaskAction::Create {
            title,
            urgency,
            importance,
            effort,
            impact,
            duration,
            date,
        } => {
            let duration =
                duration.unwrap_or_else(|| Config::load_or_default().tasks.default_duration_minutes);
            let mut draft = TaskDraft::new(
                title,
                Weights::new(urgency, importance, effort, impact),
                date.unwrap_or_else(super::today),
            );
            draft.duration_minutes = estimate(duration);

            let task = draft.into_task(Utc::now())?;
            db.create_task(&task)?;
            println!("Task created: {}", task.id());
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { date, from, to } => {
            let tasks = match (date, from, to) {
                (Some(day), _, _) => db.list_tasks_in_range(day, day)?,
                (None, Some(from), Some(to)) => db.list_tasks_in_range(from, to)?,
                _ => db.list_tasks()?,
            };
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => {
            let task = db.require_task(&id)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Update {
            id,
            title,
            urgency,
            importance,
            effort,
            impact,
            duration,
        } => {
            let mut task = db.require_task(&id)?;
            let now = Utc::now();

            if let Some(t) = title {
                task.set_title(t, now)?;
            }
            if urgency.is_some() || importance.is_some() || effort.is_some() || impact.is_some() {
                let current = task.weights();
                let weights = Weights::new(
                    urgency.unwrap_or(current.urgency),
                    importance.unwrap_or(current.importance),
                    effort.unwrap_or(current.effort),
                    impact.unwrap_or(current.impact),
                );
                validate_weights(&weights)?;
                task.set_weights(weights, now)?;
            }
            if let Some(d) = duration {
                let minutes = estimate(d);
                if let Some(m) = minutes {
                    validate_duration(m)?;
                }
                task.set_duration(minutes, now)?;
            }

            db.update_task(&task)?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            db.delete_task(&id)?;
            println!("Task deleted: {id}");
        }
        TaskAction::Start { id } => {
            let mut task = db.require_task(&id)?;
            task.start(Utc::now())?;
            db.update_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Pause { id } => {
            let mut task = db.require_task(&id)?;
            task.pause(Utc::now())?;
            db.update_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Finish { id } => {
            let mut task = db.require_task(&id)?;
            task.finish(Utc::now())?;
            db.update_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
    }
    Ok(())
}

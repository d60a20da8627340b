//! SQLite-based storage for tasks and journal entries.
//!
//! The store is the collaborator the scoring engine reads from:
//! - Tasks, queryable by id, by date range and by month
//! - Journal entries, queryable by date range
//! - The per-day activity sequence composed from both
//!
//! `priority_score` is written as a column so it can be used for ordering,
//! but it is never read back: loading a task recomputes it from the weights.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;
use std::path::Path;

use super::{data_dir, migrations};
use crate::error::{CoreError, DatabaseError, Result};
use crate::journal::JournalEntry;
use crate::scoring::Weights;
use crate::stats::{build_activity_range, month_bounds, DailyActivityRecord, MonthlyAggregator, MonthlySummary};
use crate::task::{StoredTask, Task, TaskState};

const DATE_FORMAT: &str = "%Y-%m-%d";

const TASK_COLUMNS: &str = "id, title, urgency, importance, effort, impact, duration_minutes,
     actual_minutes, state, task_date, running_since, created_at, updated_at, completed_at";

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        message.into(),
    )
}

fn parse_date(idx: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| conversion_error(idx, format!("invalid date '{s}': {e}")))
}

fn parse_datetime(idx: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, format!("invalid timestamp '{s}': {e}")))
}

fn parse_optional_datetime(idx: usize, s: Option<String>) -> rusqlite::Result<Option<DateTime<Utc>>> {
    s.map(|s| parse_datetime(idx, &s)).transpose()
}

/// Build a Task from a row selected with [`TASK_COLUMNS`].
fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let state_str: String = row.get(8)?;
    let state = TaskState::parse(&state_str).unwrap_or_else(|| {
        tracing::warn!(state = %state_str, "unknown task state in database, treating as READY");
        TaskState::Ready
    });

    let date_str: String = row.get(9)?;
    let created_at_str: String = row.get(11)?;
    let updated_at_str: String = row.get(12)?;

    Ok(Task::restore(StoredTask {
        id: row.get(0)?,
        title: row.get(1)?,
        weights: Weights::new(row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?),
        duration_minutes: row.get(6)?,
        actual_minutes: row.get(7)?,
        state,
        date: parse_date(9, &date_str)?,
        running_since: parse_optional_datetime(10, row.get(10)?)?,
        created_at: parse_datetime(11, &created_at_str)?,
        updated_at: parse_datetime(12, &updated_at_str)?,
        completed_at: parse_optional_datetime(13, row.get(13)?)?,
    }))
}

fn row_to_journal_entry(row: &Row) -> rusqlite::Result<JournalEntry> {
    let date_str: String = row.get(1)?;
    let created_at_str: String = row.get(3)?;
    Ok(JournalEntry {
        id: row.get(0)?,
        date: parse_date(1, &date_str)?,
        content: row.get(2)?,
        created_at: parse_datetime(3, &created_at_str)?,
    })
}

/// SQLite database for tasks and journal entries.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/dayboard.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("dayboard.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    // === Tasks ===

    pub fn create_task(&self, task: &Task) -> Result<()> {
        let w = task.weights();
        self.conn.execute(
            "INSERT INTO tasks (
                id, title, urgency, importance, effort, impact, priority_score,
                duration_minutes, actual_minutes, state, task_date, running_since,
                created_at, updated_at, completed_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                task.id(),
                task.title(),
                w.urgency,
                w.importance,
                w.effort,
                w.impact,
                task.priority_score(),
                task.duration_minutes(),
                task.actual_minutes(),
                task.state().as_str(),
                format_date(task.date()),
                task.running_since().map(|dt| dt.to_rfc3339()),
                task.created_at().to_rfc3339(),
                task.updated_at().to_rfc3339(),
                task.completed_at().map(|dt| dt.to_rfc3339()),
            ],
        )?;
        tracing::debug!(task = %task.id(), score = task.priority_score(), "created task");
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        let task = self
            .conn
            .query_row(&sql, params![id], row_to_task)
            .optional()?;
        Ok(task)
    }

    /// Like [`Database::get_task`], but a missing task is an error.
    pub fn require_task(&self, id: &str) -> Result<Task> {
        self.get_task(id)?.ok_or_else(|| CoreError::NotFound {
            kind: "Task",
            id: id.to_string(),
        })
    }

    /// Persist every mutable column of `task`, including the freshly
    /// derived priority score.
    pub fn update_task(&self, task: &Task) -> Result<()> {
        let w = task.weights();
        let changed = self.conn.execute(
            "UPDATE tasks
             SET title = ?1, urgency = ?2, importance = ?3, effort = ?4, impact = ?5,
                 priority_score = ?6, duration_minutes = ?7, actual_minutes = ?8, state = ?9,
                 running_since = ?10, updated_at = ?11, completed_at = ?12
             WHERE id = ?13",
            params![
                task.title(),
                w.urgency,
                w.importance,
                w.effort,
                w.impact,
                task.priority_score(),
                task.duration_minutes(),
                task.actual_minutes(),
                task.state().as_str(),
                task.running_since().map(|dt| dt.to_rfc3339()),
                task.updated_at().to_rfc3339(),
                task.completed_at().map(|dt| dt.to_rfc3339()),
                task.id(),
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::NotFound {
                kind: "Task",
                id: task.id().to_string(),
            });
        }
        tracing::debug!(task = %task.id(), state = task.state().as_str(), "updated task");
        Ok(())
    }

    pub fn delete_task(&self, id: &str) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CoreError::NotFound {
                kind: "Task",
                id: id.to_string(),
            });
        }
        tracing::debug!(task = %id, "deleted task");
        Ok(())
    }

    /// All tasks, highest priority first.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY task_date, priority_score DESC, title"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Tasks dated within `[start, end]`.
    pub fn list_tasks_in_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Task>> {
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE task_date >= ?1 AND task_date <= ?2
             ORDER BY task_date, priority_score DESC, title"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params![format_date(start), format_date(end)], row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Completed tasks dated within the given month.
    pub fn list_completed_in_month(&self, year: i32, month: u32) -> Result<Vec<Task>> {
        let (first, last) = month_bounds(year, month).ok_or_else(|| {
            crate::error::ValidationError::InvalidValue {
                field: "month",
                message: format!("{year}-{month} is not a valid month"),
            }
        })?;
        Ok(self
            .list_tasks_in_range(first, last)?
            .into_iter()
            .filter(|t| t.is_completed())
            .collect())
    }

    // === Journal ===

    pub fn create_journal_entry(&self, entry: &JournalEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO journal_entries (id, entry_date, content, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.id,
                format_date(entry.date),
                entry.content,
                entry.created_at.to_rfc3339(),
            ],
        )?;
        tracing::debug!(entry = %entry.id, date = %entry.date, "created journal entry");
        Ok(())
    }

    pub fn list_journal_entries(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, entry_date, content, created_at FROM journal_entries
             WHERE entry_date >= ?1 AND entry_date <= ?2
             ORDER BY entry_date, created_at",
        )?;
        let entries = stmt
            .query_map(params![format_date(start), format_date(end)], row_to_journal_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Days within `[start, end]` that have at least one journal entry.
    pub fn journal_dates(&self, start: NaiveDate, end: NaiveDate) -> Result<BTreeSet<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT entry_date FROM journal_entries
             WHERE entry_date >= ?1 AND entry_date <= ?2",
        )?;
        let mut dates = BTreeSet::new();
        let rows = stmt.query_map(params![format_date(start), format_date(end)], |row| {
            row.get::<_, String>(0)
        })?;
        for row in rows {
            dates.insert(parse_date(0, &row?)?);
        }
        Ok(dates)
    }

    pub fn delete_journal_entry(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM journal_entries WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CoreError::NotFound {
                kind: "Journal entry",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    // === Derived views ===

    /// One activity record per day in `[start, end]`, oldest first.
    pub fn activity_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyActivityRecord>> {
        if start > end {
            return Ok(Vec::new());
        }
        let tasks = self.list_tasks_in_range(start, end)?;
        let journal = self.journal_dates(start, end)?;
        Ok(build_activity_range(start, end, &tasks, &journal))
    }

    /// Summary of the completed tasks in a month.
    pub fn monthly_summary(&self, year: i32, month: u32) -> Result<MonthlySummary> {
        let tasks = self.list_completed_in_month(year, month)?;
        Ok(MonthlyAggregator::new().aggregate(&tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskDraft;
    use chrono::{Duration, TimeZone};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    fn at(d: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, d, hour, 0, 0).unwrap()
    }

    fn new_task(db: &Database, title: &str, weights: Weights, d: u32) -> Task {
        let task = TaskDraft::new(title, weights, day(d))
            .with_duration(60)
            .into_task(at(d, 8))
            .unwrap();
        db.create_task(&task).unwrap();
        task
    }

    #[test]
    fn task_roundtrip() {
        let db = Database::open_memory().unwrap();
        let task = new_task(&db, "Write tests", Weights::new(8, 6, 4, 7), 1);
        let loaded = db.require_task(task.id()).unwrap();
        assert_eq!(loaded, task);
        assert_eq!(loaded.priority_score(), 6.7);
    }

    #[test]
    fn stale_score_column_is_ignored_on_load() {
        let db = Database::open_memory().unwrap();
        let task = new_task(&db, "Tampered", Weights::new(2, 2, 2, 2), 1);
        db.conn()
            .execute("UPDATE tasks SET priority_score = 9.9 WHERE id = ?1", params![task.id()])
            .unwrap();
        assert_eq!(db.require_task(task.id()).unwrap().priority_score(), 2.0);
    }

    #[test]
    fn weight_edit_persists_new_score() {
        let db = Database::open_memory().unwrap();
        let mut task = new_task(&db, "Edit me", Weights::new(3, 3, 3, 3), 2);
        task.set_weights(Weights::new(9, 8, 2, 9), at(2, 9)).unwrap();
        db.update_task(&task).unwrap();

        let loaded = db.require_task(task.id()).unwrap();
        assert_eq!(loaded.weights(), Weights::new(9, 8, 2, 9));
        assert_eq!(loaded.priority_score(), task.priority_score());
        let column: f64 = db
            .conn()
            .query_row("SELECT priority_score FROM tasks WHERE id = ?1", params![task.id()], |r| r.get(0))
            .unwrap();
        assert_eq!(column, task.priority_score());
    }

    #[test]
    fn timer_state_survives_reload() {
        let db = Database::open_memory().unwrap();
        let mut task = new_task(&db, "Timed", Weights::default(), 3);
        task.start(at(3, 9)).unwrap();
        db.update_task(&task).unwrap();

        let mut loaded = db.require_task(task.id()).unwrap();
        assert_eq!(loaded.state(), TaskState::Running);
        assert_eq!(loaded.running_since(), Some(at(3, 9)));

        loaded.finish(at(3, 9) + Duration::minutes(45)).unwrap();
        db.update_task(&loaded).unwrap();
        let done = db.require_task(task.id()).unwrap();
        assert!(done.is_completed());
        assert_eq!(done.actual_minutes(), 45);
    }

    #[test]
    fn missing_rows_are_not_found() {
        let db = Database::open_memory().unwrap();
        assert!(db.get_task("nope").unwrap().is_none());
        assert!(matches!(db.require_task("nope"), Err(CoreError::NotFound { .. })));
        assert!(matches!(db.delete_task("nope"), Err(CoreError::NotFound { .. })));
        assert!(matches!(db.delete_journal_entry("nope"), Err(CoreError::NotFound { .. })));
    }

    #[test]
    fn range_queries_are_inclusive_and_ranked() {
        let db = Database::open_memory().unwrap();
        new_task(&db, "low", Weights::new(1, 1, 1, 1), 1);
        new_task(&db, "high", Weights::new(9, 9, 9, 9), 1);
        new_task(&db, "later", Weights::default(), 5);
        new_task(&db, "outside", Weights::default(), 9);

        let tasks = db.list_tasks_in_range(day(1), day(5)).unwrap();
        let titles: Vec<_> = tasks.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["high", "low", "later"]);
        assert_eq!(db.list_tasks().unwrap().len(), 4);
    }

    #[test]
    fn delete_removes_task() {
        let db = Database::open_memory().unwrap();
        let task = new_task(&db, "Temporary", Weights::default(), 1);
        db.delete_task(task.id()).unwrap();
        assert!(db.get_task(task.id()).unwrap().is_none());
    }

    #[test]
    fn journal_dates_are_distinct() {
        let db = Database::open_memory().unwrap();
        for (d, text) in [(1, "morning"), (1, "evening"), (3, "short day")] {
            let entry = JournalEntry::new(day(d), text, at(d, 20)).unwrap();
            db.create_journal_entry(&entry).unwrap();
        }
        let dates = db.journal_dates(day(1), day(30)).unwrap();
        assert_eq!(dates.into_iter().collect::<Vec<_>>(), vec![day(1), day(3)]);
        assert_eq!(db.list_journal_entries(day(1), day(1)).unwrap().len(), 2);
    }

    #[test]
    fn activity_range_combines_tasks_and_journal() {
        let db = Database::open_memory().unwrap();
        let mut task = new_task(&db, "Ship it", Weights::default(), 2);
        task.finish(at(2, 17)).unwrap();
        db.update_task(&task).unwrap();
        new_task(&db, "Still open", Weights::default(), 3);
        db.create_journal_entry(&JournalEntry::new(day(3), "notes", at(3, 21)).unwrap())
            .unwrap();

        let records = db.activity_range(day(1), day(3)).unwrap();
        assert_eq!(
            records,
            vec![
                DailyActivityRecord::new(day(1), 0, false),
                DailyActivityRecord::new(day(2), 1, false),
                DailyActivityRecord::new(day(3), 0, true),
            ]
        );
        assert!(db.activity_range(day(3), day(1)).unwrap().is_empty());
    }

    #[test]
    fn invalid_month_is_a_validation_error() {
        let db = Database::open_memory().unwrap();
        assert!(matches!(
            db.list_completed_in_month(2026, 13),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.db");
        let db = Database::open_at(&path).unwrap();
        new_task(&db, "On disk", Weights::default(), 1);
        drop(db);

        let reopened = Database::open_at(&path).unwrap();
        assert_eq!(reopened.list_tasks().unwrap().len(), 1);
    }
}

//! Integration tests running the engine over stored tasks and journal entries.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use dayboard_core::{
    Dashboard, Database, EffortLabel, JournalEntry, StreakAnalyzer, TaskDraft, Weights,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn at(d: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, d, hour, 0, 0).unwrap()
}

/// Create, time and finish a task the way the CLI would.
fn timed_task(db: &Database, d: u32, weights: Weights, estimate: u32, minutes: i64) {
    let task = TaskDraft::new(format!("task on {d}"), weights, day(d))
        .with_duration(estimate)
        .into_task(at(d, 8))
        .unwrap();
    db.create_task(&task).unwrap();

    let mut task = db.require_task(task.id()).unwrap();
    task.start(at(d, 9)).unwrap();
    db.update_task(&task).unwrap();

    let mut task = db.require_task(task.id()).unwrap();
    task.finish(at(d, 9) + Duration::minutes(minutes)).unwrap();
    db.update_task(&task).unwrap();
}

#[test]
fn month_summary_from_stored_tasks() {
    let db = Database::open_memory().unwrap();
    // 5.0 finished in 40 of 60 minutes: 6.5 points
    timed_task(&db, 1, Weights::new(5, 5, 5, 5), 60, 40);
    // 4.0 finished in 150 of 60 minutes: 2.8 points
    timed_task(&db, 2, Weights::new(4, 4, 4, 4), 60, 150);
    // open task is ignored
    let open = TaskDraft::new("open", Weights::default(), day(3))
        .into_task(at(3, 8))
        .unwrap();
    db.create_task(&open).unwrap();

    let summary = db.monthly_summary(2026, 10).unwrap();
    assert_eq!(summary.total_completed, 2);
    assert_eq!(summary.total_points, 9.3);
    assert_eq!(summary.average_score, 4.7);
    assert_eq!(summary.time_usage_percent, Some(158));
    assert_eq!(summary.effort_label, EffortLabel::Outstanding);

    // completion does not touch the stored priority score
    let tasks = db.list_completed_in_month(2026, 10).unwrap();
    let scores: Vec<_> = tasks.iter().map(|t| t.priority_score()).collect();
    assert_eq!(scores, vec![5.0, 4.0]);
}

#[test]
fn streaks_over_stored_activity() {
    let db = Database::open_memory().unwrap();
    timed_task(&db, 1, Weights::default(), 30, 30);
    timed_task(&db, 2, Weights::default(), 30, 30);
    db.create_journal_entry(&JournalEntry::new(day(4), "journal only", at(4, 22)).unwrap())
        .unwrap();
    timed_task(&db, 5, Weights::default(), 30, 30);

    let records = db.activity_range(day(1), day(5)).unwrap();
    let summary = StreakAnalyzer::new().analyze(&records);
    assert_eq!(summary.current_streak, 2);
    assert_eq!(summary.best_streak, 2);
}

#[test]
fn dashboard_reflects_edits_immediately() {
    let db = Database::open_memory().unwrap();
    let mut task = TaskDraft::new("reprioritize", Weights::new(2, 2, 2, 2), day(10))
        .into_task(at(10, 8))
        .unwrap();
    db.create_task(&task).unwrap();
    let other = TaskDraft::new("steady", Weights::new(6, 6, 6, 6), day(10))
        .into_task(at(10, 8))
        .unwrap();
    db.create_task(&other).unwrap();

    let before = Dashboard::build(&db, day(10), 7).unwrap();
    assert_eq!(before.tasks[0].title(), "steady");

    task.set_weights(Weights::new(10, 10, 10, 10), at(10, 9)).unwrap();
    db.update_task(&task).unwrap();

    let after = Dashboard::build(&db, day(10), 7).unwrap();
    assert_eq!(after.tasks[0].title(), "reprioritize");
    assert_eq!(after.tasks[0].priority_score(), 10.0);
}

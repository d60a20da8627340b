use chrono::Datelike;
use clap::Subcommand;
use dayboard_core::{lookback_window, Config, Dashboard, Database, StreakAnalyzer, MAX_LOOKBACK_DAYS};
use serde_json::json;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Current and best activity streaks
    Streak {
        /// Days to look back, ending today (default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_LOOKBACK_DAYS)))]
        days: Option<u32>,
    },
    /// Monthly productivity summary
    Month {
        /// Year (default: current)
        #[arg(long)]
        year: Option<i32>,
        /// Month 1-12 (default: current)
        #[arg(long)]
        month: Option<u32>,
    },
    /// Today's tasks, streaks and month-to-date summary
    Dashboard,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let today = super::today();

    match action {
        StatsAction::Streak { days } => {
            let days = days.unwrap_or_else(|| Config::load_or_default().streaks.lookback_days);
            let records = match lookback_window(today, days)? {
                Some((start, end)) => db.activity_range(start, end)?,
                None => Vec::new(),
            };
            let summary = StreakAnalyzer::new().analyze(&records);
            let out = json!({
                "current_streak": summary.current_streak,
                "best_streak": summary.best_streak,
                "lookback_days": days,
                "days": records,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Month { year, month } => {
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            let summary = db.monthly_summary(year, month)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Dashboard => {
            let lookback = Config::load_or_default().streaks.lookback_days;
            let dashboard = Dashboard::build(&db, today, lookback)?;
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
    }
    Ok(())
}

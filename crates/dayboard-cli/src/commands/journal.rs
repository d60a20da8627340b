//! Journal commands for CLI.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use dayboard_core::{Database, JournalEntry};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Write a journal entry
    Add {
        /// Entry text
        content: String,
        /// Day the entry belongs to (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List entries in a date range (default: today)
    List {
        /// First day (inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Last day (inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

pub fn run(action: JournalAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        JournalAction::Add { content, date } => {
            let entry = JournalEntry::new(date.unwrap_or_else(super::today), content, Utc::now())?;
            db.create_journal_entry(&entry)?;
            println!("Journal entry created: {}", entry.id);
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        JournalAction::List { from, to } => {
            let to = to.unwrap_or_else(super::today);
            let from = from.unwrap_or(to);
            let entries = db.list_journal_entries(from, to)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        JournalAction::Delete { id } => {
            db.delete_journal_entry(&id)?;
            println!("Journal entry deleted: {id}");
        }
    }
    Ok(())
}

//! Daily journal entries.
//!
//! A day counts as journalled for streak purposes when at least one entry
//! exists for it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Create an entry for `date`. Content must not be blank.
    pub fn new(
        date: NaiveDate,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }
        Ok(Self {
            id: format!("journal-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            date,
            content,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entry_keeps_its_date() {
        let now = Utc.with_ymd_and_hms(2026, 1, 3, 21, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let entry = JournalEntry::new(date, "Late entry for yesterday", now).unwrap();
        assert_eq!(entry.date, date);
        assert!(entry.id.starts_with("journal-"));
    }

    #[test]
    fn blank_content_is_rejected() {
        let now = Utc.with_ymd_and_hms(2026, 1, 3, 21, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        assert_eq!(
            JournalEntry::new(date, "\n  ", now),
            Err(ValidationError::Empty { field: "content" })
        );
    }
}

pub mod config;
pub mod journal;
pub mod score;
pub mod stats;
pub mod task;

use chrono::{Local, NaiveDate};

/// The local calendar day, used whenever `--date` is omitted.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

//! Date and time helpers
//!
//! Calendar dates travel as `YYYY-MM-DD`; timestamps are stored in UTC and shown
//! in local time with the configured format.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default display format for comment and attachment timestamps ("Mar 4, 2025, 02:30 PM")
pub const DEFAULT_DATETIME_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Parse a date string in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT)
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Move a date field by `days`. An empty field starts from today.
pub fn step_date(current: Option<NaiveDate>, days: i64) -> NaiveDate {
    current.unwrap_or_else(today) + Duration::days(days)
}

/// Render a UTC timestamp in local time using a chrono format string
pub fn format_timestamp(ts: &DateTime<Utc>, format: &str) -> String {
    ts.with_timezone(&Local).format(format).to_string()
}

/// Short relative label for a due date ("today", "tomorrow", "3 days ago", "Jan 15")
pub fn format_human_date(date: NaiveDate) -> String {
    let today = today();
    let days_diff = (date - today).num_days();

    match days_diff {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if diff > 1 && diff <= 7 => format!("in {} days", diff),
        diff if (-7..-1).contains(&diff) => format!("{} days ago", -diff),
        _ => {
            if date.year() == today.year() {
                date.format("%b %d").to_string()
            } else {
                date.format("%b %d, %Y").to_string()
            }
        }
    }
}

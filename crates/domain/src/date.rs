use chrono::prelude::*;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidDateError {
    #[error("Malformed date: `{0}`, expected YYYY-MM-DD")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidTimeError {
    #[error("Malformed time: `{0}`, expected HH:mm")]
    Malformed(String),
}

/// Parses a local calendar date in the `YYYY-MM-DD` wire format.
///
/// Rows coming straight from the backend sometimes carry a full timestamp,
/// only the date part in front of the `T` is looked at in that case.
pub fn parse_local_date(datestr: &str) -> Result<NaiveDate, InvalidDateError> {
    let datestr = datestr.trim();
    let date_part = datestr.split('T').next().unwrap_or(datestr);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| InvalidDateError::Malformed(datestr.to_string()))
}

/// Parses a wall clock time in the `HH:mm` wire format
pub fn parse_local_time(timestr: &str) -> Result<NaiveTime, InvalidTimeError> {
    let timestr = timestr.trim();
    NaiveTime::parse_from_str(timestr, "%H:%M")
        .map_err(|_| InvalidTimeError::Malformed(timestr.to_string()))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// Sunday -> 0
pub fn weekday_index(date: &NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Whole calendar days from `from` to `to`, negative if `to` is earlier
pub fn days_between(from: &NaiveDate, to: &NaiveDate) -> i64 {
    to.signed_duration_since(*from).num_days()
}

// month: January -> 1
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

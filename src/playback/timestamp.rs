//! Playback start timestamps
//!
//! The hosting site addresses recordings by a `YYYY-MM-DD HH:MM:SS` start
//! time. User input is validated into a [`PlaybackStart`] before any request
//! or output happens; an invalid combination (bad format or an impossible
//! calendar date) is rejected up front.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::fmt;
use thiserror::Error;

const START_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A user-supplied timestamp failed validation
#[derive(Debug, Clone, Error)]
#[error("'{input}' is not a valid {expected} timestamp: {message}")]
pub struct TimestampError {
    /// The rejected input
    pub input: String,

    /// The expected format
    pub expected: &'static str,

    /// Parser detail
    pub message: String,
}

/// A validated playback start time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlaybackStart(NaiveDateTime);

impl PlaybackStart {
    /// Validates a date string and a time string as one start timestamp
    ///
    /// # Example
    ///
    /// ```
    /// use camsweep::playback::PlaybackStart;
    ///
    /// let start = PlaybackStart::parse("2024-03-01", "10:30:00").unwrap();
    /// assert_eq!(start.to_string(), "2024-03-01 10:30:00");
    ///
    /// // February 30th does not exist
    /// assert!(PlaybackStart::parse("2024-02-30", "10:00:00").is_err());
    /// ```
    pub fn parse(date: &str, time: &str) -> Result<Self, TimestampError> {
        Self::parse_combined(&format!("{} {}", date, time))
    }

    /// Validates a combined `YYYY-MM-DD HH:MM:SS` string
    pub fn parse_combined(input: &str) -> Result<Self, TimestampError> {
        NaiveDateTime::parse_from_str(input, START_FORMAT)
            .map(Self)
            .map_err(|e| TimestampError {
                input: input.to_string(),
                expected: "YYYY-MM-DD HH:MM:SS",
                message: e.to_string(),
            })
    }
}

impl fmt::Display for PlaybackStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(START_FORMAT))
    }
}

/// Lists calendar dates from `days` days ago through today, inclusive
///
/// Oldest first, today last. Used by the CLI's date picker.
pub fn recent_dates(days: u32) -> Vec<NaiveDate> {
    let today = Local::now().date_naive();
    (0..=i64::from(days))
        .rev()
        .map(|back| today - Duration::days(back))
        .collect()
}

// src/core/time_utils.rs

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use std::fmt::{Display, Write};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("Invalid time format pattern: '{0}'")]
    InvalidPattern(String),
    #[error("Timestamp {0} cannot be represented in local time.")]
    OutOfRange(i64),
}

/// Formats `time` with a strftime-style `pattern` (e.g. `"%a %b %d %X"`).
///
/// The output buffer starts at twice the pattern length and grows while the
/// formatter writes, so there is no upper bound on the result. An empty
/// pattern yields an empty string.
///
/// # Errors
/// Returns [`TimeFormatError::InvalidPattern`] if the pattern contains an
/// unknown conversion specifier.
pub fn time_as_string<Tz>(pattern: &str, time: &DateTime<Tz>) -> Result<String, TimeFormatError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let items = StrftimeItems::new(pattern);
    if items.clone().any(|item| matches!(item, Item::Error)) {
        return Err(TimeFormatError::InvalidPattern(pattern.to_string()));
    }

    let mut buffer = String::with_capacity(pattern.len() * 2);
    write!(buffer, "{}", time.format_with_items(items))
        .map_err(|_| TimeFormatError::InvalidPattern(pattern.to_string()))?;
    Ok(buffer)
}

/// Formats a Unix timestamp (seconds) in local time.
pub fn time_as_string_unix(pattern: &str, seconds: i64) -> Result<String, TimeFormatError> {
    let time = Local
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or(TimeFormatError::OutOfRange(seconds))?;
    time_as_string(pattern, &time)
}

/// Formats the current local time.
pub fn now_as_string(pattern: &str) -> Result<String, TimeFormatError> {
    time_as_string(pattern, &Local::now())
}

//! Input parsing for stored timestamps and form fields.
//!
//! Stored timestamps arrive in one of three formats:
//! - `rfc3339`: RFC 3339 strings with any offset (e.g. `2024-06-14T18:29:00Z`)
//! - `epoch_ms`: Unix epoch milliseconds
//! - `epoch_s`: Unix epoch seconds
//!
//! Form fields arrive as a `YYYY-MM-DD` date and an `HH:MM` time typed in IST.
//! Malformed form input is rejected with the offending field named; there is
//! no fallback to the current time or to any other substitute value.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::civil::from_civil;
use crate::error::{CalendarError, InputField, Result};
use crate::models::{CivilFields, Instant};

/// Supported stored-timestamp formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampFormat {
    /// RFC 3339 (e.g. "2024-06-14T18:29:00.000Z" or "2024-06-15T00:01:00+05:30")
    #[default]
    Rfc3339,
    /// Unix epoch milliseconds (e.g. "1718389740000")
    EpochMs,
    /// Unix epoch seconds (e.g. "1718389740")
    EpochS,
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampFormat::Rfc3339 => write!(f, "rfc3339"),
            TimestampFormat::EpochMs => write!(f, "epoch_ms"),
            TimestampFormat::EpochS => write!(f, "epoch_s"),
        }
    }
}

/// Parse a stored timestamp according to the given format.
///
/// # Examples
///
/// ```
/// use postcal_core::parse::{parse_instant, TimestampFormat};
///
/// let a = parse_instant("2024-06-14T18:29:00Z", TimestampFormat::Rfc3339).unwrap();
/// let b = parse_instant("1718389740000", TimestampFormat::EpochMs).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn parse_instant(input: &str, format: TimestampFormat) -> Result<Instant> {
    let trimmed = input.trim();

    match format {
        TimestampFormat::Rfc3339 => parse_rfc3339(trimmed),
        TimestampFormat::EpochMs => parse_epoch(trimmed, "epoch milliseconds")
            .and_then(Instant::from_epoch_millis),
        TimestampFormat::EpochS => {
            parse_epoch(trimmed, "epoch seconds").and_then(Instant::from_epoch_seconds)
        }
    }
}

fn parse_rfc3339(input: &str) -> Result<Instant> {
    DateTime::parse_from_rfc3339(input)
        .map_err(|e| CalendarError::instant(input, format!("not an RFC 3339 timestamp ({e})")))
        .and_then(|dt| Instant::try_from(dt.with_timezone(&Utc)))
}

fn parse_epoch(input: &str, unit: &str) -> Result<i64> {
    input
        .parse()
        .map_err(|_| CalendarError::instant(input, format!("{unit} must be an integer")))
}

/// Turn what the user typed into the form into a storable instant.
///
/// `date` must be `YYYY-MM-DD` and `time` must be `HH:MM`, both read as IST
/// wall-clock time. Surrounding whitespace is ignored. Values must name a
/// real calendar day and a real time of day.
///
/// ```
/// use postcal_core::parse::parse_user_date_time;
///
/// let instant = parse_user_date_time("2024-06-15", "00:01").unwrap();
/// assert_eq!(instant.to_string(), "2024-06-14T18:31:00.000Z");
///
/// assert!(parse_user_date_time("not-a-date", "25:99").is_err());
/// ```
pub fn parse_user_date_time(date: &str, time: &str) -> Result<Instant> {
    let (year, month, day) = parse_date_field(date)?;
    let (hour, minute) = parse_time_field(time)?;

    from_civil(CivilFields::new(
        year,
        i64::from(month),
        i64::from(day),
        i64::from(hour),
        i64::from(minute),
    ))
}

/// Parse the combined `YYYY-MM-DDTHH:MM` value of a `datetime-local` input.
pub fn parse_datetime_local(value: &str) -> Result<Instant> {
    let trimmed = value.trim();
    let Some((date, time)) = trimmed.split_once('T') else {
        return Err(CalendarError::user_input(
            InputField::Date,
            trimmed,
            "expected YYYY-MM-DDTHH:MM",
        ));
    };

    parse_user_date_time(date, time)
}

fn parse_date_field(input: &str) -> Result<(i32, u32, u32)> {
    let trimmed = input.trim();
    let reject = |reason: &str| CalendarError::user_input(InputField::Date, trimmed, reason);

    let parts: Vec<&str> = trimmed.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(reject("expected YYYY-MM-DD"));
    };

    let year: i32 = fixed_digits(year, 4).ok_or_else(|| reject("year must be four digits"))?;
    let month: u32 = fixed_digits(month, 2).ok_or_else(|| reject("month must be two digits"))?;
    let day: u32 = fixed_digits(day, 2).ok_or_else(|| reject("day must be two digits"))?;

    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return Err(reject("no such calendar day"));
    }

    Ok((year, month, day))
}

fn parse_time_field(input: &str) -> Result<(u32, u32)> {
    let trimmed = input.trim();
    let reject = |reason: &str| CalendarError::user_input(InputField::Time, trimmed, reason);

    let Some((hour, minute)) = trimmed.split_once(':') else {
        return Err(reject("expected HH:MM"));
    };

    let hour: u32 = fixed_digits(hour, 2).ok_or_else(|| reject("hour must be two digits"))?;
    let minute: u32 = fixed_digits(minute, 2).ok_or_else(|| reject("minute must be two digits"))?;

    if hour > 23 {
        return Err(reject("hour must be between 00 and 23"));
    }
    if minute > 59 {
        return Err(reject("minute must be between 00 and 59"));
    }

    Ok((hour, minute))
}

/// Parse `part` only if it is exactly `width` ASCII digits.
fn fixed_digits<T: FromStr>(part: &str, width: usize) -> Option<T> {
    if part.len() == width && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

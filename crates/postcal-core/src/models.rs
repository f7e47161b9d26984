//! Core value types for postcal.
//!
//! - [`Instant`] - an absolute UTC point in time, the only persisted form
//! - [`CivilFields`] - raw, possibly overflowing civil fields (input to `from_civil`)
//! - [`CivilDateTime`] - normalized wall-clock time in the fixed IST offset
//! - [`Granularity`] - calendar bucket size (day/week/month)
//! - [`Window`] - a half-open `[start, end)` calendar bucket
//!
//! All of them are immutable values built on demand for a single computation.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc, Weekday,
};
use serde::{Deserialize, Serialize};

use crate::civil::IST_OFFSET_MINUTES;
use crate::error::{CalendarError, Result};
use crate::parse::{TimestampFormat, parse_instant};

/// An absolute point in time, normalized to UTC.
///
/// Every instant has an IST civil form: the last five and a half hours of
/// chrono's range are rejected at construction, so [`crate::civil::to_civil`]
/// never overflows.
///
/// The wire form is `YYYY-MM-DDTHH:MM:SS.mmmZ`, the same shape a browser's
/// `Date.toISOString()` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// Parse an RFC 3339 timestamp with any offset.
    ///
    /// ```
    /// use postcal_core::Instant;
    ///
    /// let instant = Instant::parse("2024-06-15T00:01:00+05:30").unwrap();
    /// assert_eq!(instant.to_string(), "2024-06-14T18:31:00.000Z");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        parse_instant(input, TimestampFormat::Rfc3339)
    }

    /// Build an instant from Unix epoch milliseconds.
    pub fn from_epoch_millis(ms: i64) -> Result<Self> {
        DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| CalendarError::instant(ms.to_string(), "epoch milliseconds out of range"))
            .and_then(Instant::try_from)
    }

    /// Build an instant from Unix epoch seconds.
    pub fn from_epoch_seconds(s: i64) -> Result<Self> {
        DateTime::from_timestamp(s, 0)
            .ok_or_else(|| CalendarError::instant(s.to_string(), "epoch seconds out of range"))
            .and_then(Instant::try_from)
    }

    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl TryFrom<DateTime<Utc>> for Instant {
    type Error = CalendarError;

    fn try_from(dt: DateTime<Utc>) -> Result<Self> {
        dt.naive_utc()
            .checked_add_signed(TimeDelta::minutes(i64::from(IST_OFFSET_MINUTES)))
            .map(|_| Instant(dt))
            .ok_or_else(|| {
                CalendarError::instant(dt.to_rfc3339(), "no IST civil time for this instant")
            })
    }
}

impl FromStr for Instant {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        Instant::parse(s)
    }
}

impl TryFrom<String> for Instant {
    type Error = CalendarError;

    fn try_from(s: String) -> Result<Self> {
        Instant::parse(&s)
    }
}

impl From<Instant> for String {
    fn from(instant: Instant) -> Self {
        instant.to_string()
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }
}

/// Civil fields as entered or computed, before normalization.
///
/// Month, day, hour and minute are signed so that overflow (month 13,
/// minute 65) and underflow (day 0) roll over through calendar arithmetic.
/// Month is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilFields {
    pub year: i32,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
}

impl CivilFields {
    pub fn new(year: i32, month: i64, day: i64, hour: i64, minute: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
        }
    }

    /// Civil midnight at the start of the given day.
    pub fn midnight(year: i32, month: i64, day: i64) -> Self {
        Self::new(year, month, day, 0, 0)
    }
}

impl fmt::Display for CivilFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year={} month={} day={} hour={} minute={}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Normalized wall-clock time in the fixed IST offset, at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "CivilFields")]
pub struct CivilDateTime {
    naive: NaiveDateTime,
}

impl CivilDateTime {
    /// Wrap a naive wall-clock value, dropping anything below the minute.
    pub(crate) fn from_naive(naive: NaiveDateTime) -> Self {
        let naive = naive
            .with_second(0)
            .and_then(|n| n.with_nanosecond(0))
            .unwrap_or(naive);
        Self { naive }
    }

    pub fn year(&self) -> i32 {
        self.naive.year()
    }

    /// Month, 1-12.
    pub fn month(&self) -> u32 {
        self.naive.month()
    }

    /// Day of month, 1-31.
    pub fn day(&self) -> u32 {
        self.naive.day()
    }

    /// Hour, 0-23.
    pub fn hour(&self) -> u32 {
        self.naive.hour()
    }

    /// Minute, 0-59.
    pub fn minute(&self) -> u32 {
        self.naive.minute()
    }

    pub fn weekday(&self) -> Weekday {
        self.naive.weekday()
    }

    pub fn date(&self) -> NaiveDate {
        self.naive.date()
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    pub fn fields(&self) -> CivilFields {
        CivilFields::new(
            self.year(),
            i64::from(self.month()),
            i64::from(self.day()),
            i64::from(self.hour()),
            i64::from(self.minute()),
        )
    }
}

impl From<CivilDateTime> for CivilFields {
    fn from(civil: CivilDateTime) -> Self {
        civil.fields()
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.naive.format("%Y-%m-%dT%H:%M"))
    }
}

/// Calendar bucket granularity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Civil midnight to the next civil midnight.
    #[default]
    Day,
    /// Sunday civil midnight to the following Sunday.
    Week,
    /// Civil midnight on the 1st to the 1st of the next month.
    Month,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Week => write!(f, "week"),
            Granularity::Month => write!(f, "month"),
        }
    }
}

/// A half-open `[start, end)` calendar bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    pub granularity: Granularity,
    /// Bucket key in civil time:
    /// - Day: `YYYY-MM-DD`
    /// - Week: `YYYY-MM-DD` of the starting Sunday
    /// - Month: `YYYY-MM`
    pub key: String,
    /// Inclusive start.
    pub start: Instant,
    /// Exclusive end.
    pub end: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_normalizes_offset_to_utc() {
        let instant = Instant::parse("2024-06-15T00:01:00+05:30").unwrap();
        assert_eq!(instant.to_string(), "2024-06-14T18:31:00.000Z");
    }

    #[test]
    fn instant_keeps_milliseconds() {
        let instant = Instant::parse("2024-06-14T18:31:00.250Z").unwrap();
        assert_eq!(instant.to_string(), "2024-06-14T18:31:00.250Z");
        assert_eq!(instant.epoch_millis() % 1000, 250);
    }

    #[test]
    fn instant_rejects_garbage() {
        let err = Instant::parse("not-a-date").unwrap_err();
        assert!(matches!(err, CalendarError::InvalidInstant { .. }));
    }

    #[test]
    fn instant_serde_uses_wire_form() {
        let instant = Instant::parse("2024-01-01T19:00:00Z").unwrap();
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, "\"2024-01-01T19:00:00.000Z\"");

        let back: Instant = serde_json::from_str("\"2024-01-01T19:00:00+00:00\"").unwrap();
        assert_eq!(back, instant);

        assert!(serde_json::from_str::<Instant>("\"yesterday\"").is_err());
    }

    #[test]
    fn epoch_constructors_agree() {
        let a = Instant::from_epoch_seconds(1_718_389_740).unwrap();
        let b = Instant::from_epoch_millis(1_718_389_740_000).unwrap();
        assert_eq!(a, b);
        assert!(Instant::from_epoch_millis(i64::MAX).is_err());
    }

    #[test]
    fn granularity_default_and_display() {
        assert_eq!(Granularity::default(), Granularity::Day);
        assert_eq!(format!("{}", Granularity::Week), "week");
        assert_eq!(
            serde_json::to_string(&Granularity::Month).unwrap(),
            "\"month\""
        );
    }

    #[test]
    fn civil_date_time_serializes_as_fields() {
        let naive = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(12, 7, 42)
            .unwrap();
        let civil = CivilDateTime::from_naive(naive);
        assert_eq!(civil.to_string(), "2024-02-29T12:07");

        let json = serde_json::to_value(civil).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"year": 2024, "month": 2, "day": 29, "hour": 12, "minute": 7})
        );
    }
}

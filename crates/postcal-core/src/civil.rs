//! Conversion between instants and IST civil time.
//!
//! IST is a fixed +05:30 offset with no daylight-saving rules. The offset is
//! a compile-time constant; the host's local timezone is never consulted.
//! Every other module converts through [`to_civil`] and [`from_civil`].

use chrono::{FixedOffset, NaiveDate, TimeDelta, TimeZone, Utc};

use crate::error::{CalendarError, Result};
use crate::models::{CivilDateTime, CivilFields, Instant};

/// The civil offset east of UTC, in minutes.
pub const IST_OFFSET_MINUTES: i32 = 330;

/// The civil offset as it appears in RFC 3339 strings.
pub const IST_OFFSET_LABEL: &str = "+05:30";

/// The civil offset as a [`chrono::FixedOffset`].
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_MINUTES * 60).expect("+05:30 is within +/-24h")
}

/// Convert an instant to IST wall-clock time.
///
/// This is a fixed shift of +330 minutes applied to the UTC fields, with
/// calendar overflow carried into hour, day, month and year.
///
/// ```
/// use postcal_core::{Instant, civil::to_civil};
///
/// let civil = to_civil(Instant::parse("2024-01-01T19:00:00Z").unwrap());
/// assert_eq!(civil.to_string(), "2024-01-02T00:30");
/// ```
pub fn to_civil(instant: Instant) -> CivilDateTime {
    CivilDateTime::from_naive(instant.as_datetime().with_timezone(&ist()).naive_local())
}

/// Convert civil fields, read in IST, to an instant.
///
/// Fields are normalized first (see [`CivilFields::normalize`]), so
/// `to_civil(from_civil(f)?) == f.normalize()?`.
pub fn from_civil(fields: CivilFields) -> Result<Instant> {
    civil_to_instant(fields.normalize()?)
}

pub(crate) fn civil_to_instant(civil: CivilDateTime) -> Result<Instant> {
    ist()
        .from_local_datetime(&civil.naive())
        .single()
        .ok_or_else(|| CalendarError::InvalidCivilFields(format!("{civil} is out of range")))
        .and_then(|dt| Instant::try_from(dt.with_timezone(&Utc)))
}

impl CivilFields {
    /// Roll overflowing fields onto the calendar.
    ///
    /// Month overflow carries into the year (month 13 is January of the
    /// next year, month 0 is December of the previous one). Day, hour and
    /// minute are then added as durations from the 1st of that month at
    /// midnight. Fails only when the result leaves the representable range.
    pub fn normalize(&self) -> Result<CivilDateTime> {
        let out_of_range =
            || CalendarError::InvalidCivilFields(format!("{self} cannot be normalized"));

        let months = i64::from(self.year)
            .checked_mul(12)
            .and_then(|m| m.checked_add(self.month.checked_sub(1)?))
            .ok_or_else(out_of_range)?;
        let year = i32::try_from(months.div_euclid(12)).map_err(|_| out_of_range())?;
        let month = u32::try_from(months.rem_euclid(12) + 1).map_err(|_| out_of_range())?;

        let month_start = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(out_of_range)?;

        let offset = self
            .day
            .checked_sub(1)
            .and_then(TimeDelta::try_days)
            .zip(TimeDelta::try_hours(self.hour))
            .and_then(|(days, hours)| days.checked_add(&hours))
            .zip(TimeDelta::try_minutes(self.minute))
            .and_then(|(sum, minutes)| sum.checked_add(&minutes))
            .ok_or_else(out_of_range)?;

        month_start
            .checked_add_signed(offset)
            .map(CivilDateTime::from_naive)
            .ok_or_else(out_of_range)
    }
}

/// True when both instants fall on the same IST calendar day.
pub fn is_same_civil_day(a: Instant, b: Instant) -> bool {
    to_civil(a).date() == to_civil(b).date()
}

/// True when `instant` falls on the same IST day as `now`.
///
/// The caller supplies `now`; nothing here reads a clock.
pub fn is_today(instant: Instant, now: Instant) -> bool {
    is_same_civil_day(instant, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Granularity;
    use crate::parse::{TimestampFormat, parse_instant};
    use crate::window::window_for;
    use chrono::{DateTime, Weekday};

    fn instant(s: &str) -> Instant {
        Instant::parse(s).unwrap()
    }

    #[test]
    fn to_civil_crosses_day_boundary() {
        let civil = to_civil(instant("2024-01-01T19:00:00Z"));
        assert_eq!(civil.fields(), CivilFields::new(2024, 1, 2, 0, 30));
    }

    #[test]
    fn to_civil_crosses_year_boundary() {
        let civil = to_civil(instant("2023-12-31T20:00:00Z"));
        assert_eq!(civil.fields(), CivilFields::new(2024, 1, 1, 1, 30));
        assert_eq!(civil.weekday(), Weekday::Mon);
    }

    #[test]
    fn to_civil_drops_seconds() {
        let civil = to_civil(instant("2024-06-14T18:29:59.999Z"));
        assert_eq!(civil.to_string(), "2024-06-14T23:59");
    }

    #[test]
    fn from_civil_subtracts_offset() {
        let i = from_civil(CivilFields::new(2024, 6, 15, 0, 1)).unwrap();
        assert_eq!(i.to_string(), "2024-06-14T18:31:00.000Z");
    }

    #[test]
    fn normalize_minute_overflow() {
        let civil = CivilFields::new(2024, 3, 10, 9, 65).normalize().unwrap();
        assert_eq!(civil.fields(), CivilFields::new(2024, 3, 10, 10, 5));
    }

    #[test]
    fn normalize_month_overflow_into_next_year() {
        let civil = CivilFields::new(2024, 13, 1, 0, 0).normalize().unwrap();
        assert_eq!(civil.fields(), CivilFields::new(2025, 1, 1, 0, 0));
    }

    #[test]
    fn normalize_underflow() {
        let civil = CivilFields::new(2024, 3, 0, 0, 0).normalize().unwrap();
        assert_eq!(civil.fields(), CivilFields::new(2024, 2, 29, 0, 0));

        let civil = CivilFields::new(2024, 0, 1, 0, -1).normalize().unwrap();
        assert_eq!(civil.fields(), CivilFields::new(2023, 11, 30, 23, 59));
    }

    #[test]
    fn normalize_day_overflow_uses_month_length() {
        let civil = CivilFields::new(2023, 2, 29, 0, 0).normalize().unwrap();
        assert_eq!(civil.fields(), CivilFields::new(2023, 3, 1, 0, 0));
    }

    #[test]
    fn normalize_rejects_unrepresentable_fields() {
        let err = CivilFields::new(2024, i64::MAX, 1, 0, 0).normalize().unwrap_err();
        assert!(matches!(err, CalendarError::InvalidCivilFields(_)));

        let err = CivilFields::new(2024, 1, 1, 0, i64::MAX).normalize().unwrap_err();
        assert!(matches!(err, CalendarError::InvalidCivilFields(_)));

        assert!(from_civil(CivilFields::new(i32::MAX, 1, 1, 0, 0)).is_err());
    }

    #[test]
    fn same_civil_day_straddling_midnight() {
        let before = instant("2024-06-14T18:29:00Z");
        let after = instant("2024-06-14T18:31:00Z");
        assert!(!is_same_civil_day(before, after));
    }

    #[test]
    fn same_civil_day_across_utc_midnight() {
        // 00:30 and 01:30 IST on June 15
        let a = instant("2024-06-14T19:00:00Z");
        let b = instant("2024-06-14T20:00:00Z");
        assert!(is_same_civil_day(a, b));

        let c = instant("2024-06-15T18:00:00Z");
        assert!(is_same_civil_day(a, c));
        assert!(is_today(c, a));
    }

    #[test]
    fn instants_past_the_civil_range_are_rejected() {
        let max_ms = DateTime::<Utc>::MAX_UTC.timestamp_millis();
        let err = Instant::from_epoch_millis(max_ms).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidInstant { .. }));

        let err = parse_instant(&max_ms.to_string(), TimestampFormat::EpochMs).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidInstant { .. }));

        assert!(Instant::try_from(DateTime::<Utc>::MAX_UTC).is_err());
    }

    #[test]
    fn latest_instant_has_civil_form() {
        let latest = DateTime::<Utc>::MAX_UTC
            .checked_sub_signed(TimeDelta::minutes(i64::from(IST_OFFSET_MINUTES)))
            .unwrap();
        let instant = Instant::try_from(latest).unwrap();

        let civil = to_civil(instant);
        assert_eq!(civil.date(), NaiveDate::MAX);
        assert!(is_same_civil_day(instant, instant));

        match window_for(instant, Granularity::Day) {
            Ok(window) => assert!(window.contains(instant)),
            Err(err) => assert!(matches!(err, CalendarError::InvalidCivilFields(_))),
        }
    }

    #[test]
    fn earliest_instant_windows_fail_closed() {
        let instant = Instant::try_from(DateTime::<Utc>::MIN_UTC).unwrap();
        assert_eq!(to_civil(instant).hour(), 5);
        assert_eq!(to_civil(instant).minute(), 30);

        let err = window_for(instant, Granularity::Day).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidCivilFields(_)));
    }

    #[test]
    fn ist_offset_is_fixed() {
        assert_eq!(ist().local_minus_utc(), 19_800);
        assert_eq!(ist().to_string(), IST_OFFSET_LABEL);
    }
}

//! # postcal-core
//!
//! Civil-time normalization and calendar windowing for a content calendar
//! that schedules posts in Indian Standard Time.
//!
//! Stored timestamps are absolute UTC instants. Everything a person sees or
//! types is IST wall-clock time, a fixed +05:30 offset with no daylight
//! saving. This crate is the single place where the two meet.
//!
//! ## Features
//!
//! - **Host independent**: the offset is a compiled-in constant; the
//!   process's local timezone is never read.
//! - **One conversion path**: windows, day tests and display formatting all
//!   go through [`civil::to_civil`] and [`civil::from_civil`].
//! - **Half-open windows**: day, Sunday-first week and month buckets as
//!   `[start, end)` instants.
//! - **Fail closed**: malformed form input is rejected with the offending
//!   field named, never replaced by the current time.
//!
//! ## Example
//!
//! ```rust
//! use postcal_core::prelude::*;
//!
//! // What the user typed into the scheduling form, read as IST
//! let scheduled = parse_user_date_time("2024-06-15", "00:01").unwrap();
//! assert_eq!(scheduled.to_string(), "2024-06-14T18:31:00.000Z");
//!
//! // Which week of the calendar it lands in
//! let week = window_for(scheduled, Granularity::Week).unwrap();
//! assert_eq!(week.key, "2024-06-09");
//! assert!(in_window(scheduled, &week));
//!
//! println!("{}", format_for_display(scheduled, DisplayStyle::FullDateTime));
//! ```

pub mod civil;
pub mod error;
pub mod format;
pub mod models;
pub mod parse;
pub mod posts;
pub mod window;

// Re-export commonly used types at the crate root
pub use civil::{from_civil, is_same_civil_day, is_today, to_civil};
pub use error::{CalendarError, InputField, Result};
pub use format::{DisplayStyle, format_for_display, format_stored_for_display};
pub use models::{CivilDateTime, CivilFields, Granularity, Instant, Window};
pub use parse::{TimestampFormat, parse_datetime_local, parse_instant, parse_user_date_time};
pub use posts::{Platform, Post, PostStatus, PostType, WindowStats, calendar_stats};
pub use window::{GridCell, calendar_grid, in_window, window_for};

/// Prelude module for convenient imports.
///
/// ```
/// use postcal_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::civil::{from_civil, is_same_civil_day, is_today, to_civil};
    pub use crate::error::{CalendarError, InputField, Result};
    pub use crate::format::*;
    pub use crate::models::*;
    pub use crate::parse::{
        TimestampFormat, parse_datetime_local, parse_instant, parse_user_date_time,
    };
    pub use crate::posts::*;
    pub use crate::window::{GridCell, calendar_grid, in_window, window_for};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_submission_to_calendar_day() {
        let scheduled = parse_datetime_local("2024-06-14T23:59").unwrap();
        let day = window_for(scheduled, Granularity::Day).unwrap();

        assert_eq!(day.key, "2024-06-14");
        assert_eq!(day.start.to_string(), "2024-06-13T18:30:00.000Z");
        assert_eq!(
            format_for_display(scheduled, DisplayStyle::InputDateTime),
            "2024-06-14T23:59"
        );
    }

    #[test]
    fn rejected_form_input_has_no_instant() {
        let err = parse_user_date_time("not-a-date", "25:99").unwrap_err();
        assert_eq!(err.field(), Some(InputField::Date));
    }

    #[test]
    fn prelude_exports() {
        use crate::prelude::*;

        let _style = DisplayStyle::TimeOnly;
        let _granularity = Granularity::Month;
        let _format = TimestampFormat::EpochMs;
        assert_eq!(format_hour_label(13), "1 PM");
    }
}

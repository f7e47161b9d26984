//! Human-readable rendering of instants and windows in IST.
//!
//! Everything here goes through [`to_civil`]. Formatting is presentational
//! only, so the `_stored_` entry point may degrade to a placeholder instead
//! of failing.

use chrono::Days;

use crate::civil::{IST_OFFSET_LABEL, to_civil};
use crate::models::{Granularity, Instant, Window};

/// Shown in place of a timestamp that could not be read.
pub const INVALID_DATE_PLACEHOLDER: &str = "Invalid Date";

/// Output styles for [`format_for_display`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayStyle {
    /// `Friday, 14 June 2024, 11:59 PM`
    #[default]
    FullDateTime,
    /// `Friday, 14 June 2024`
    DateOnly,
    /// `11:59 PM`
    TimeOnly,
    /// `2024-06-14`, for prefilling a date input
    InputDate,
    /// `23:59`, for prefilling a time input
    InputTime,
    /// `2024-06-14T23:59`, for prefilling a datetime-local input
    InputDateTime,
    /// `2024-06-14T23:59:00+05:30`
    LocalRfc3339,
}

impl DisplayStyle {
    fn pattern(self) -> &'static str {
        match self {
            DisplayStyle::FullDateTime => "%A, %-d %B %Y, %I:%M %p",
            DisplayStyle::DateOnly => "%A, %-d %B %Y",
            DisplayStyle::TimeOnly => "%I:%M %p",
            DisplayStyle::InputDate => "%Y-%m-%d",
            DisplayStyle::InputTime => "%H:%M",
            DisplayStyle::InputDateTime => "%Y-%m-%dT%H:%M",
            DisplayStyle::LocalRfc3339 => "%Y-%m-%dT%H:%M:%S",
        }
    }
}

/// Render an instant as IST wall-clock text.
///
/// ```
/// use postcal_core::{Instant, format::{DisplayStyle, format_for_display}};
///
/// let instant = Instant::parse("2024-06-14T18:29:00Z").unwrap();
/// assert_eq!(format_for_display(instant, DisplayStyle::TimeOnly), "11:59 PM");
/// assert_eq!(format_for_display(instant, DisplayStyle::InputDate), "2024-06-14");
/// ```
pub fn format_for_display(instant: Instant, style: DisplayStyle) -> String {
    let text = to_civil(instant).naive().format(style.pattern()).to_string();
    match style {
        DisplayStyle::LocalRfc3339 => format!("{text}{IST_OFFSET_LABEL}"),
        _ => text,
    }
}

/// Render a stored timestamp string, or [`INVALID_DATE_PLACEHOLDER`] if it
/// cannot be parsed.
pub fn format_stored_for_display(raw: &str, style: DisplayStyle) -> String {
    match Instant::parse(raw) {
        Ok(instant) => format_for_display(instant, style),
        Err(_) => INVALID_DATE_PLACEHOLDER.to_string(),
    }
}

/// Label for an hour row in the day view (`12 AM`, `9 AM`, `12 PM`, `5 PM`).
pub fn format_hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{hour} AM"),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

/// Header title for a calendar view showing `window`.
///
/// - Month: `June 2024`
/// - Week: `Jun 9 - Jun 15, 2024`
/// - Day: `Friday, June 14, 2024`
pub fn format_window_title(window: &Window) -> String {
    let first = to_civil(window.start).date();
    match window.granularity {
        Granularity::Month => first.format("%B %Y").to_string(),
        Granularity::Day => first.format("%A, %B %-d, %Y").to_string(),
        Granularity::Week => match first.checked_add_days(Days::new(6)) {
            Some(last) => format!(
                "{} - {}",
                first.format("%b %-d"),
                last.format("%b %-d, %Y")
            ),
            None => INVALID_DATE_PLACEHOLDER.to_string(),
        },
    }
}

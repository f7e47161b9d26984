//! Calendar windowing.
//!
//! Window boundaries are computed as IST civil fields and converted to
//! instants through [`from_civil`]. Membership is then decided by comparing
//! instants only, so a stored timestamp is converted at most once.

use serde::Serialize;

use crate::civil::{from_civil, to_civil};
use crate::error::Result;
use crate::models::{CivilFields, Granularity, Instant, Window};

/// Number of day cells in a month view: six Sunday-first weeks.
pub const MONTH_GRID_CELLS: usize = 42;

/// Compute the window of the given granularity that contains `instant`.
///
/// # Examples
///
/// ```
/// use postcal_core::{Granularity, Instant, window::window_for};
///
/// let instant = Instant::parse("2024-06-14T18:31:00Z").unwrap();
/// let day = window_for(instant, Granularity::Day).unwrap();
///
/// assert_eq!(day.key, "2024-06-15");
/// assert_eq!(day.start.to_string(), "2024-06-14T18:30:00.000Z");
/// assert_eq!(day.end.to_string(), "2024-06-15T18:30:00.000Z");
/// ```
pub fn window_for(instant: Instant, granularity: Granularity) -> Result<Window> {
    let civil = to_civil(instant);
    let (year, month, day) = (
        civil.year(),
        i64::from(civil.month()),
        i64::from(civil.day()),
    );

    let (start, end) = match granularity {
        Granularity::Day => (
            CivilFields::midnight(year, month, day),
            CivilFields::midnight(year, month, day + 1),
        ),
        Granularity::Week => {
            let since_sunday = i64::from(civil.weekday().num_days_from_sunday());
            let sunday = day - since_sunday;
            (
                CivilFields::midnight(year, month, sunday),
                CivilFields::midnight(year, month, sunday + 7),
            )
        }
        Granularity::Month => (
            CivilFields::midnight(year, month, 1),
            CivilFields::midnight(year, month + 1, 1),
        ),
    };

    let start_civil = start.normalize()?;
    let key = match granularity {
        Granularity::Day | Granularity::Week => {
            start_civil.naive().format("%Y-%m-%d").to_string()
        }
        Granularity::Month => start_civil.naive().format("%Y-%m").to_string(),
    };

    Ok(Window {
        granularity,
        key,
        start: from_civil(start)?,
        end: from_civil(end)?,
    })
}

/// True iff `window.start <= instant < window.end`.
pub fn in_window(instant: Instant, window: &Window) -> bool {
    window.start <= instant && instant < window.end
}

impl Window {
    /// See [`in_window`].
    pub fn contains(&self, instant: Instant) -> bool {
        in_window(instant, self)
    }

    /// The window of the same granularity that starts at this one's end.
    pub fn next(&self) -> Result<Window> {
        window_for(self.end, self.granularity)
    }

    /// The window of the same granularity that ends at this one's start.
    pub fn previous(&self) -> Result<Window> {
        let start = to_civil(self.start);
        let day_before = from_civil(CivilFields::midnight(
            start.year(),
            i64::from(start.month()),
            i64::from(start.day()) - 1,
        ))?;
        window_for(day_before, self.granularity)
    }

    /// Split this window into its consecutive day windows.
    pub fn days(&self) -> Result<Vec<Window>> {
        let mut days = Vec::new();
        let mut day = window_for(self.start, Granularity::Day)?;
        while day.start < self.end {
            let next = day.next()?;
            days.push(day);
            day = next;
        }
        Ok(days)
    }
}

/// One day cell of a calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub day: Window,
    /// Whether the day lies inside the focused window (e.g. the displayed
    /// month, as opposed to the leading and trailing days of the grid).
    pub in_focus: bool,
}

/// Produce the day cells a calendar view shows around `instant`.
///
/// - Day: the single day containing `instant`.
/// - Week: the seven days of its Sunday-first week.
/// - Month: [`MONTH_GRID_CELLS`] days starting on the Sunday on or before the 1st.
pub fn calendar_grid(instant: Instant, granularity: Granularity) -> Result<Vec<GridCell>> {
    let focus = window_for(instant, granularity)?;

    let days = match granularity {
        Granularity::Day | Granularity::Week => focus.days()?,
        Granularity::Month => {
            let first_week = window_for(focus.start, Granularity::Week)?;
            let mut days = Vec::with_capacity(MONTH_GRID_CELLS);
            let mut day = window_for(first_week.start, Granularity::Day)?;
            for _ in 0..MONTH_GRID_CELLS {
                let next = day.next()?;
                days.push(day);
                day = next;
            }
            days
        }
    };

    Ok(days
        .into_iter()
        .map(|day| GridCell {
            in_focus: focus.contains(day.start),
            day,
        })
        .collect())
}

//! Week navigation: moves the anchor date, never refetches.

use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    PreviousWeek,
    NextWeek,
    Today,
}

/// New anchor date after `action`.
pub fn navigate(anchor: NaiveDate, action: Navigation, today: NaiveDate) -> NaiveDate {
    match action {
        Navigation::PreviousWeek => anchor - Duration::weeks(1),
        Navigation::NextWeek => anchor + Duration::weeks(1),
        Navigation::Today => today,
    }
}

/// Anchor moved by `weeks` (negative goes back), or `None` past the
/// representable date range.
pub fn offset_weeks(anchor: NaiveDate, weeks: i32) -> Option<NaiveDate> {
    anchor.checked_add_signed(Duration::weeks(i64::from(weeks)))
}

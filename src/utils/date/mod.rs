// Date utility functions
// Week and month arithmetic shared by the filter pipeline and the week grid

use chrono::{Datelike, Duration, NaiveDate};

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// First and last day (inclusive) of the week containing `date`.
pub fn week_bounds(date: NaiveDate, first_day_of_week: u8) -> (NaiveDate, NaiveDate) {
    let start = get_week_start(date, first_day_of_week);
    (start, start + Duration::days(6))
}

/// The seven consecutive dates of the week containing `date`.
pub fn week_dates(date: NaiveDate, first_day_of_week: u8) -> [NaiveDate; 7] {
    let start = get_week_start(date, first_day_of_week);
    std::array::from_fn(|offset| start + Duration::days(offset as i64))
}

/// First and last day (inclusive) of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let next_month_first = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    let last = next_month_first
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (first, last)
}

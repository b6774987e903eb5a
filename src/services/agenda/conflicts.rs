//! Multiplicity surface: days holding several events are shown through a
//! popup instead of being crammed into the grid cell.

use chrono::NaiveDate;

use super::bucketing::{bucket_for, DateBuckets};
use crate::models::event::Event;

/// Outcome of clicking a day cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellActivation<'a> {
    /// Nothing scheduled that day
    Empty,
    /// One event: open its detail directly
    Single(&'a Event),
    /// Several events: open the popup with this ordered list
    Multiple(Vec<Event>),
}

/// A day is "multiple" when its bucket holds two events or more.
pub fn is_multiple(buckets: &DateBuckets<'_>, date: NaiveDate) -> bool {
    bucket_for(buckets, date).len() >= 2
}

/// All multiple days, ascending.
pub fn multiple_dates(buckets: &DateBuckets<'_>) -> Vec<NaiveDate> {
    buckets
        .iter()
        .filter(|(_, events)| events.len() >= 2)
        .map(|(date, _)| *date)
        .collect()
}

/// Popup ordering: by start time ascending, all-day events first.
/// The sort is stable, so events sharing a key keep their bucket order.
pub fn sorted_for_popup(bucket: &[&Event]) -> Vec<Event> {
    let mut events: Vec<Event> = bucket.iter().map(|event| (*event).clone()).collect();
    events.sort_by_key(|event| event.start_time);
    events
}

/// Decide what a click on `date` opens.
pub fn activate_cell<'a>(buckets: &DateBuckets<'a>, date: NaiveDate) -> CellActivation<'a> {
    match bucket_for(buckets, date) {
        [] => CellActivation::Empty,
        [single] => CellActivation::Single(*single),
        several => CellActivation::Multiple(sorted_for_popup(several)),
    }
}

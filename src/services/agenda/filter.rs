//! Filter pipeline: narrows the snapshot to the events matching a [`FilterState`].

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::models::filter::FilterState;

/// Whether `event` passes every active predicate of `filter`.
///
/// The named date window is checked first; the remaining predicates are
/// independent and only apply when set.
pub fn matches(event: &Event, filter: &FilterState, today: NaiveDate) -> bool {
    if !filter.window.contains(event.date, today) {
        return false;
    }

    if let Some(kind) = filter.kind {
        if event.kind != kind {
            return false;
        }
    }

    if let Some(status) = filter.status {
        if event.status != status {
            return false;
        }
    }

    if let Some(start) = filter.start {
        if event.date < start {
            return false;
        }
    }

    if let Some(end) = filter.end {
        if event.date > end {
            return false;
        }
    }

    true
}

/// Events passing `filter`, in snapshot order. An empty result is a valid
/// outcome, not an error.
pub fn apply<'a>(events: &'a [Event], filter: &FilterState, today: NaiveDate) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|event| matches(event, filter, today))
        .collect()
}

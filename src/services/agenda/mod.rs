//! Agenda pipeline: snapshot → filter → date buckets → conflicts.
//!
//! Every stage is a pure function over borrowed events; [`AgendaView`] simply
//! runs them in order for one filter state and keeps the results together.

pub mod bucketing;
pub mod conflicts;
pub mod filter;
pub mod stats;

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::models::filter::FilterState;
use bucketing::{bucket_by_date, bucket_for, DateBuckets};
use conflicts::CellActivation;

pub use stats::AgendaStats;

/// Placeholder shown when the filters leave nothing to display
pub const EMPTY_STATE_MESSAGE: &str = "No events match the current filters.";
pub const RESET_HINT: &str = "Reset filters to show every event.";

/// The filtered, bucketed projection of a snapshot.
#[derive(Debug, Clone)]
pub struct AgendaView<'a> {
    filtered: Vec<&'a Event>,
    buckets: DateBuckets<'a>,
}

impl<'a> AgendaView<'a> {
    pub fn build(events: &'a [Event], filter: &FilterState, today: NaiveDate) -> Self {
        let filtered = filter::apply(events, filter, today);
        let buckets = bucket_by_date(filtered.iter().copied());
        log::debug!(
            "Agenda view: {} of {} events visible across {} days ({})",
            filtered.len(),
            events.len(),
            buckets.len(),
            filter.summary()
        );
        Self { filtered, buckets }
    }

    /// Visible events in snapshot order
    pub fn filtered(&self) -> &[&'a Event] {
        &self.filtered
    }

    pub fn buckets(&self) -> &DateBuckets<'a> {
        &self.buckets
    }

    pub fn events_on(&self, date: NaiveDate) -> &[&'a Event] {
        bucket_for(&self.buckets, date)
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn is_multiple(&self, date: NaiveDate) -> bool {
        conflicts::is_multiple(&self.buckets, date)
    }

    pub fn multiple_dates(&self) -> Vec<NaiveDate> {
        conflicts::multiple_dates(&self.buckets)
    }

    pub fn activate(&self, date: NaiveDate) -> CellActivation<'a> {
        conflicts::activate_cell(&self.buckets, date)
    }

    pub fn find(&self, event_id: &str) -> Option<&'a Event> {
        self.filtered.iter().copied().find(|event| event.id == event_id)
    }
}

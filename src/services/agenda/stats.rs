//! Sidebar statistics over the full (unfiltered) snapshot.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::event::{Event, EventStatus, EventType};
use crate::utils::date::week_bounds;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AgendaStats {
    pub total: usize,
    pub today: usize,
    /// Events inside the week currently shown by the grid
    pub this_week: usize,
    pub pending: usize,
    pub upcoming: usize,
    pub past: usize,
    pub by_status: BTreeMap<EventStatus, usize>,
    pub by_type: BTreeMap<EventType, usize>,
    /// Sum of every `amount` in the snapshot
    pub total_amount: f64,
}

impl AgendaStats {
    /// Compute the counters. Filters never apply here; only `anchor` (the
    /// grid's reference date) moves the weekly count.
    pub fn compute(events: &[Event], today: NaiveDate, anchor: NaiveDate, first_day_of_week: u8) -> Self {
        let (week_start, week_end) = week_bounds(anchor, first_day_of_week);

        events.iter().fold(AgendaStats::default(), |mut stats, event| {
            stats.total += 1;
            if event.date == today {
                stats.today += 1;
            }
            if event.date >= week_start && event.date <= week_end {
                stats.this_week += 1;
            }
            if event.status == EventStatus::Pending {
                stats.pending += 1;
            }
            if event.date >= today {
                stats.upcoming += 1;
            } else {
                stats.past += 1;
            }
            *stats.by_status.entry(event.status).or_default() += 1;
            *stats.by_type.entry(event.kind).or_default() += 1;
            stats.total_amount += event.amount.unwrap_or(0.0);
            stats
        })
    }

    pub fn count_for_status(&self, status: EventStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn count_for_type(&self, kind: EventType) -> usize {
        self.by_type.get(&kind).copied().unwrap_or(0)
    }
}

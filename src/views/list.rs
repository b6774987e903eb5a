//! Agenda list: filtered events grouped per day.

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::services::agenda::conflicts::sorted_for_popup;
use crate::services::agenda::{AgendaView, EMPTY_STATE_MESSAGE, RESET_HINT};

#[derive(Debug, Clone, PartialEq)]
pub struct DaySection {
    pub date: NaiveDate,
    /// Sorted by start time, all-day first
    pub events: Vec<Event>,
}

impl DaySection {
    pub fn is_multiple(&self) -> bool {
        self.events.len() >= 2
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AgendaList {
    Empty {
        message: &'static str,
        hint: &'static str,
    },
    Days(Vec<DaySection>),
}

impl AgendaList {
    pub fn from_view(view: &AgendaView<'_>) -> Self {
        if view.is_empty() {
            return AgendaList::Empty {
                message: EMPTY_STATE_MESSAGE,
                hint: RESET_HINT,
            };
        }

        let sections = view
            .buckets()
            .iter()
            .map(|(date, events)| DaySection {
                date: *date,
                events: sorted_for_popup(events),
            })
            .collect();
        AgendaList::Days(sections)
    }

    pub fn sections(&self) -> &[DaySection] {
        match self {
            AgendaList::Empty { .. } => &[],
            AgendaList::Days(sections) => sections,
        }
    }
}

//! Filter state for the agenda views.
//!
//! The state is a plain value; every change goes through [`FilterState::reduce`]
//! so a view can be replayed from a list of actions.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::models::event::{EventStatus, EventType};
use crate::utils::date::{month_bounds, week_bounds};

/// Relative date shortcut. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateWindow {
    #[default]
    All,
    Today,
    ThisWeek,
    ThisMonth,
    Upcoming,
    Past,
}

impl DateWindow {
    pub const ALL: [DateWindow; 6] = [
        DateWindow::All,
        DateWindow::Today,
        DateWindow::ThisWeek,
        DateWindow::ThisMonth,
        DateWindow::Upcoming,
        DateWindow::Past,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            DateWindow::All => "TOUS",
            DateWindow::Today => "AUJOURDHUI",
            DateWindow::ThisWeek => "CETTE_SEMAINE",
            DateWindow::ThisMonth => "CE_MOIS",
            DateWindow::Upcoming => "A_VENIR",
            DateWindow::Past => "PASSE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateWindow::All => "All dates",
            DateWindow::Today => "Today",
            DateWindow::ThisWeek => "This week",
            DateWindow::ThisMonth => "This month",
            DateWindow::Upcoming => "Upcoming",
            DateWindow::Past => "Past",
        }
    }

    /// Whether `date` falls inside this window, relative to `today`.
    /// Weeks run Monday to Sunday.
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateWindow::All => true,
            DateWindow::Today => date == today,
            DateWindow::ThisWeek => {
                let (monday, sunday) = week_bounds(today, 1);
                date >= monday && date <= sunday
            }
            DateWindow::ThisMonth => {
                let (first, last) = month_bounds(today);
                date >= first && date <= last
            }
            DateWindow::Upcoming => date >= today,
            DateWindow::Past => date < today,
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DateWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DateWindow::ALL
            .into_iter()
            .find(|window| window.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown date window '{}'", wanted))
    }
}

/// Active filter predicates. `Default` is "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub window: DateWindow,
    pub kind: Option<EventType>,
    pub status: Option<EventStatus>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// User interactions that change the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    SetWindow(DateWindow),
    SetType(Option<EventType>),
    SetStatus(Option<EventStatus>),
    SetStart(Option<NaiveDate>),
    SetEnd(Option<NaiveDate>),
    Reset,
}

impl FilterState {
    pub fn reduce(self, action: FilterAction) -> FilterState {
        match action {
            FilterAction::SetWindow(window) => FilterState { window, ..self },
            FilterAction::SetType(kind) => FilterState { kind, ..self },
            FilterAction::SetStatus(status) => FilterState { status, ..self },
            FilterAction::SetStart(start) => FilterState { start, ..self },
            FilterAction::SetEnd(end) => FilterState { end, ..self },
            FilterAction::Reset => FilterState::default(),
        }
    }

    /// True when at least one predicate narrows the list
    pub fn is_active(&self) -> bool {
        *self != FilterState::default()
    }

    /// Short description of the active predicates, e.g. "Today · Quote · from 2024-06-01"
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.window != DateWindow::All {
            parts.push(self.window.label().to_string());
        }
        if let Some(kind) = self.kind {
            parts.push(kind.label().to_string());
        }
        if let Some(status) = self.status {
            parts.push(status.label().to_string());
        }
        if let Some(start) = self.start {
            parts.push(format!("from {}", start));
        }
        if let Some(end) = self.end {
            parts.push(format!("until {}", end));
        }

        if parts.is_empty() {
            "No filter".to_string()
        } else {
            parts.join(" · ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Wednesday
    fn today() -> NaiveDate {
        date(2024, 6, 12)
    }

    #[test_case(DateWindow::All, date(1999, 1, 1), true ; "all accepts anything")]
    #[test_case(DateWindow::Today, date(2024, 6, 12), true ; "today on today")]
    #[test_case(DateWindow::Today, date(2024, 6, 13), false ; "today rejects tomorrow")]
    #[test_case(DateWindow::ThisWeek, date(2024, 6, 10), true ; "week starts monday")]
    #[test_case(DateWindow::ThisWeek, date(2024, 6, 16), true ; "week ends sunday")]
    #[test_case(DateWindow::ThisWeek, date(2024, 6, 9), false ; "previous sunday excluded")]
    #[test_case(DateWindow::ThisWeek, date(2024, 6, 17), false ; "next monday excluded")]
    #[test_case(DateWindow::ThisMonth, date(2024, 6, 1), true ; "month first day")]
    #[test_case(DateWindow::ThisMonth, date(2024, 6, 30), true ; "month last day")]
    #[test_case(DateWindow::ThisMonth, date(2024, 7, 1), false ; "next month excluded")]
    #[test_case(DateWindow::Upcoming, date(2024, 6, 12), true ; "upcoming includes today")]
    #[test_case(DateWindow::Upcoming, date(2024, 6, 11), false ; "upcoming excludes yesterday")]
    #[test_case(DateWindow::Past, date(2024, 6, 11), true ; "past includes yesterday")]
    #[test_case(DateWindow::Past, date(2024, 6, 12), false ; "past excludes today")]
    fn test_window_contains(window: DateWindow, candidate: NaiveDate, expected: bool) {
        assert_eq!(window.contains(candidate, today()), expected);
    }

    #[test]
    fn test_reduce_sets_each_field() {
        let state = FilterState::default()
            .reduce(FilterAction::SetWindow(DateWindow::Today))
            .reduce(FilterAction::SetType(Some(EventType::Quote)))
            .reduce(FilterAction::SetStatus(Some(EventStatus::Pending)))
            .reduce(FilterAction::SetStart(Some(date(2024, 6, 1))))
            .reduce(FilterAction::SetEnd(Some(date(2024, 6, 30))));

        assert_eq!(state.window, DateWindow::Today);
        assert_eq!(state.kind, Some(EventType::Quote));
        assert_eq!(state.status, Some(EventStatus::Pending));
        assert_eq!(state.start, Some(date(2024, 6, 1)));
        assert_eq!(state.end, Some(date(2024, 6, 30)));
        assert!(state.is_active());
    }

    #[test]
    fn test_reset_returns_default() {
        let state = FilterState::default()
            .reduce(FilterAction::SetType(Some(EventType::Audit)))
            .reduce(FilterAction::Reset);
        assert_eq!(state, FilterState::default());
        assert!(!state.is_active());
    }

    #[test]
    fn test_reduce_does_not_touch_other_fields() {
        let before = FilterState::default().reduce(FilterAction::SetType(Some(EventType::Order)));
        let after = before.reduce(FilterAction::SetStatus(Some(EventStatus::Draft)));
        assert_eq!(after.kind, Some(EventType::Order));
        assert_eq!(after.window, DateWindow::All);
    }

    #[test]
    fn test_summary() {
        assert_eq!(FilterState::default().summary(), "No filter");

        let state = FilterState::default()
            .reduce(FilterAction::SetWindow(DateWindow::Today))
            .reduce(FilterAction::SetType(Some(EventType::Quote)))
            .reduce(FilterAction::SetStart(Some(date(2024, 6, 1))));
        assert_eq!(state.summary(), "Today · Quote · from 2024-06-01");
    }

    #[test]
    fn test_window_from_str() {
        assert_eq!("cette_semaine".parse::<DateWindow>(), Ok(DateWindow::ThisWeek));
        assert_eq!("TOUS".parse::<DateWindow>(), Ok(DateWindow::All));
        assert!("tomorrow".parse::<DateWindow>().is_err());
    }
}

//! State of the "several events on this day" popup.
//!
//! Like the filter, the popup is an immutable value driven by
//! [`PopupState::reduce`]. Side effects (opening a detail view) are returned
//! to the caller instead of being performed here.

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::utils::geometry::{Point, Rect};

/// Size rules used to place the popup next to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupLayout {
    pub width: f32,
    pub header_height: f32,
    pub row_height: f32,
    /// Visible area the popup must stay inside
    pub viewport: Rect,
}

impl Default for PopupLayout {
    fn default() -> Self {
        Self {
            width: 280.0,
            header_height: 40.0,
            row_height: 36.0,
            viewport: Rect::new(0.0, 0.0, 1280.0, 800.0),
        }
    }
}

impl PopupLayout {
    /// Rectangle for a popup listing `rows` events anchored at `anchor`.
    pub fn bounds_for(&self, anchor: Point, rows: usize) -> Rect {
        let height = self.header_height + self.row_height * rows as f32;
        Rect::new(anchor.x, anchor.y, self.width, height).clamped_within(&self.viewport)
    }
}

/// An open popup: the date, where it was opened, and its ordered entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub date: NaiveDate,
    pub anchor: Point,
    pub bounds: Rect,
    pub events: Vec<Event>,
}

impl PopupView {
    pub fn lists(&self, event_id: &str) -> bool {
        self.events.iter().any(|event| event.id == event_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    #[default]
    Closed,
    Open(PopupView),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupAction {
    /// Show `events` (already ordered) for `date`; replaces any open popup
    Open {
        date: NaiveDate,
        anchor: Point,
        events: Vec<Event>,
        layout: PopupLayout,
    },
    /// Explicit close button
    Close,
    /// A click somewhere in the document
    ClickAt(Point),
    /// One of the listed events was chosen
    Select(String),
}

/// What the caller must do after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEffect {
    OpenDetail(String),
}

impl PopupState {
    pub fn reduce(self, action: PopupAction) -> (PopupState, Option<PopupEffect>) {
        match (self, action) {
            (
                _,
                PopupAction::Open {
                    date,
                    anchor,
                    events,
                    layout,
                },
            ) => {
                let bounds = layout.bounds_for(anchor, events.len());
                let view = PopupView {
                    date,
                    anchor,
                    bounds,
                    events,
                };
                (PopupState::Open(view), None)
            }
            (_, PopupAction::Close) => (PopupState::Closed, None),
            (PopupState::Open(view), PopupAction::ClickAt(point)) => {
                if view.bounds.contains(point) {
                    (PopupState::Open(view), None)
                } else {
                    (PopupState::Closed, None)
                }
            }
            (PopupState::Open(view), PopupAction::Select(event_id)) => {
                if view.lists(&event_id) {
                    (PopupState::Closed, Some(PopupEffect::OpenDetail(event_id)))
                } else {
                    (PopupState::Open(view), None)
                }
            }
            (PopupState::Closed, PopupAction::ClickAt(_) | PopupAction::Select(_)) => {
                (PopupState::Closed, None)
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PopupState::Open(_))
    }

    pub fn view(&self) -> Option<&PopupView> {
        match self {
            PopupState::Open(view) => Some(view),
            PopupState::Closed => None,
        }
    }
}

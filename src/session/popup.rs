//! Owner of the multiplicity popup.
//!
//! Drives [`PopupState`] through its reducer and holds the outside-click
//! listener exactly while the popup is open.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;

use super::listeners::{DocumentListeners, ListenerGuard};
use crate::models::event::Event;
use crate::models::popup::{PopupAction, PopupEffect, PopupLayout, PopupState, PopupView};
use crate::utils::geometry::Point;

pub struct PopupController {
    state: Rc<RefCell<PopupState>>,
    guard: Rc<RefCell<Option<ListenerGuard>>>,
    listeners: DocumentListeners,
    layout: PopupLayout,
}

impl PopupController {
    pub fn new(listeners: DocumentListeners, layout: PopupLayout) -> Self {
        Self {
            state: Rc::new(RefCell::new(PopupState::Closed)),
            guard: Rc::new(RefCell::new(None)),
            listeners,
            layout,
        }
    }

    /// Open the popup for `date`, replacing any popup already open.
    pub fn open(&mut self, date: NaiveDate, anchor: Point, events: Vec<Event>) {
        log::debug!("Opening popup for {} with {} events", date, events.len());
        self.apply(PopupAction::Open {
            date,
            anchor,
            events,
            layout: self.layout,
        });
    }

    pub fn close(&mut self) {
        self.apply(PopupAction::Close);
    }

    /// Choose a listed event. Returns the detail to open, if any.
    pub fn select(&mut self, event_id: &str) -> Option<PopupEffect> {
        self.apply(PopupAction::Select(event_id.to_string()))
    }

    pub fn apply(&mut self, action: PopupAction) -> Option<PopupEffect> {
        let effect = transition(&self.state, action);
        self.sync_listener();
        effect
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    pub fn view(&self) -> Option<PopupView> {
        self.state.borrow().view().cloned()
    }

    pub fn has_listener(&self) -> bool {
        self.guard.borrow().is_some()
    }

    /// Register the outside-click listener while open, release it when closed.
    fn sync_listener(&mut self) {
        let open = self.is_open();
        let mut guard = self.guard.borrow_mut();

        match (open, guard.is_some()) {
            (true, false) => {
                let state = Rc::downgrade(&self.state);
                let guard_slot = Rc::downgrade(&self.guard);
                *guard = Some(self.listeners.register(move |point| {
                    let Some(state) = state.upgrade() else {
                        return;
                    };
                    transition(&state, PopupAction::ClickAt(point));
                    if !state.borrow().is_open() {
                        if let Some(slot) = guard_slot.upgrade() {
                            let released = slot.borrow_mut().take();
                            drop(released);
                        }
                    }
                }));
            }
            (false, true) => {
                *guard = None;
            }
            _ => {}
        }
    }
}

impl Drop for PopupController {
    fn drop(&mut self) {
        // Release the listener before the state it points to goes away
        self.guard.borrow_mut().take();
    }
}

fn transition(state: &RefCell<PopupState>, action: PopupAction) -> Option<PopupEffect> {
    let mut state = state.borrow_mut();
    let (next, effect) = std::mem::take(&mut *state).reduce(action);
    *state = next;
    effect
}

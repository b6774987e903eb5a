//! Document-level click listeners.
//!
//! Registration returns a [`ListenerGuard`]; dropping the guard removes the
//! listener, so a listener can never outlive the owner that installed it.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::utils::geometry::Point;

type ClickHandler = Box<dyn FnMut(Point)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: BTreeMap<u64, Rc<RefCell<ClickHandler>>>,
}

/// Shared table of click handlers for the whole document.
#[derive(Clone, Default)]
pub struct DocumentListeners {
    registry: Rc<RefCell<Registry>>,
}

impl DocumentListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, handler: impl FnMut(Point) + 'static) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry
            .handlers
            .insert(id, Rc::new(RefCell::new(Box::new(handler))));
        log::trace!("Registered document click listener #{}", id);

        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver a click to every registered handler.
    pub fn dispatch_click(&self, point: Point) {
        // Snapshot first so a handler may drop its own guard
        let handlers: Vec<_> = self.registry.borrow().handlers.values().cloned().collect();
        for handler in handlers {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (handler)(point);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps one listener registered while alive.
#[must_use = "the listener is removed as soon as the guard is dropped"]
pub struct ListenerGuard {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.try_borrow_mut() {
                registry.handlers.remove(&self.id);
                log::trace!("Removed document click listener #{}", self.id);
            }
        }
    }
}

//! Background snapshot loading with demo fallback.
//!
//! Each refresh runs on its own thread and reports back over a channel; the
//! owner polls for results. Refreshes are numbered and only the most recently
//! issued one is applied, whatever order the responses arrive in. Dropping
//! the loader discards every result still in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::models::event::Event;
use crate::services::source::{DataSource, SourceKind};

/// A settled load: the events to display and where they came from.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub events: Vec<Event>,
    pub origin: SourceKind,
    /// Set when the primary source failed and the fallback was used
    pub error: Option<String>,
}

impl Snapshot {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Read from `primary`; on any failure read from `fallback` instead.
/// Always returns a usable snapshot.
pub fn load_with_fallback(primary: &dyn DataSource, fallback: &dyn DataSource) -> Snapshot {
    match primary.fetch() {
        Ok(events) => Snapshot {
            events,
            origin: primary.kind(),
            error: None,
        },
        Err(err) => {
            log::warn!("Primary agenda source failed, using fallback: {}", err);
            let events = match fallback.fetch() {
                Ok(events) => events,
                Err(fallback_err) => {
                    log::error!("Fallback agenda source failed as well: {}", fallback_err);
                    Vec::new()
                }
            };
            Snapshot {
                events,
                origin: fallback.kind(),
                error: Some(err.to_string()),
            }
        }
    }
}

struct Completed {
    generation: u64,
    snapshot: Snapshot,
}

pub struct EventLoader {
    primary: Arc<dyn DataSource>,
    fallback: Arc<dyn DataSource>,
    sender: Sender<Completed>,
    receiver: Receiver<Completed>,
    latest_generation: u64,
    applied_generation: u64,
    alive: Arc<AtomicBool>,
}

impl EventLoader {
    pub fn new(primary: Arc<dyn DataSource>, fallback: Arc<dyn DataSource>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            primary,
            fallback,
            sender,
            receiver,
            latest_generation: 0,
            applied_generation: 0,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Start a load in the background and return its generation number.
    pub fn refresh(&mut self) -> u64 {
        self.latest_generation += 1;
        let generation = self.latest_generation;

        let primary = Arc::clone(&self.primary);
        let fallback = Arc::clone(&self.fallback);
        let sender = self.sender.clone();
        let alive = Arc::clone(&self.alive);

        log::debug!("Starting agenda load #{}", generation);
        thread::spawn(move || {
            let snapshot = load_with_fallback(primary.as_ref(), fallback.as_ref());
            if alive.load(Ordering::Acquire) {
                // The receiver may be gone already; nothing to do then.
                let _ = sender.send(Completed {
                    generation,
                    snapshot,
                });
            }
        });

        generation
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// True while the most recent refresh has not been applied
    pub fn is_loading(&self) -> bool {
        self.applied_generation < self.latest_generation
    }

    /// Non-blocking: the latest refresh's snapshot if it has arrived.
    /// Stale results are dropped.
    pub fn poll(&mut self) -> Option<Snapshot> {
        let mut ready = None;
        loop {
            match self.receiver.try_recv() {
                Ok(completed) => {
                    if let Some(snapshot) = self.accept(completed) {
                        ready = Some(snapshot);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        ready
    }

    /// Block until the latest refresh settles or `timeout` elapses.
    pub fn wait(&mut self, timeout: Duration) -> Option<Snapshot> {
        let deadline = Instant::now() + timeout;
        while self.is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completed) => {
                    if let Some(snapshot) = self.accept(completed) {
                        return Some(snapshot);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    log::warn!("Agenda load #{} did not settle in {:?}", self.latest_generation, timeout);
                    return None;
                }
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
        None
    }

    fn accept(&mut self, completed: Completed) -> Option<Snapshot> {
        if !self.alive.load(Ordering::Acquire) {
            return None;
        }
        if completed.generation != self.latest_generation {
            log::debug!(
                "Discarding stale agenda load #{} (latest is #{})",
                completed.generation,
                self.latest_generation
            );
            return None;
        }
        self.applied_generation = completed.generation;
        Some(completed.snapshot)
    }

    /// Stop accepting results; in-flight loads finish but are not delivered.
    pub fn shutdown(&mut self) {
        self.alive.store(false, Ordering::Release);
        self.applied_generation = self.latest_generation;
    }
}

impl Drop for EventLoader {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::source::{FetchError, MockDataSource};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn event(id: &str) -> Event {
        let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        Event::builder(id, id, date).build().unwrap()
    }

    fn remote_returning(ids: &'static [&'static str]) -> MockDataSource {
        let mut mock = MockDataSource::new();
        mock.expect_kind().return_const(SourceKind::Remote);
        mock.expect_fetch()
            .returning(move || Ok(ids.iter().map(|id| event(id)).collect()));
        mock
    }

    fn failing_remote() -> MockDataSource {
        let mut mock = MockDataSource::new();
        mock.expect_kind().return_const(SourceKind::Remote);
        mock.expect_fetch().returning(|| Err(FetchError::Status(500)));
        mock
    }

    fn demo() -> MockDataSource {
        let mut mock = MockDataSource::new();
        mock.expect_kind().return_const(SourceKind::Demo);
        mock.expect_fetch().returning(|| Ok(vec![event("demo-1"), event("demo-2")]));
        mock
    }

    #[test]
    fn test_success_does_not_touch_fallback() {
        let primary = remote_returning(&["a"]);
        let mut fallback = MockDataSource::new();
        fallback.expect_fetch().never();

        let snapshot = load_with_fallback(&primary, &fallback);
        assert_eq!(snapshot.events.len(), 1);
        assert_eq!(snapshot.origin, SourceKind::Remote);
        assert!(!snapshot.is_fallback());
    }

    #[test]
    fn test_failure_uses_fallback() {
        let snapshot = load_with_fallback(&failing_remote(), &demo());
        assert_eq!(snapshot.origin, SourceKind::Demo);
        assert_eq!(snapshot.events.len(), 2);
        assert!(snapshot.error.unwrap().contains("500"));
    }

    #[test]
    fn test_empty_success_is_not_a_failure() {
        let snapshot = load_with_fallback(&remote_returning(&[]), &demo());
        assert!(snapshot.events.is_empty());
        assert_eq!(snapshot.origin, SourceKind::Remote);
    }

    #[test]
    fn test_background_refresh_settles() {
        let mut loader = EventLoader::new(Arc::new(remote_returning(&["a", "b"])), Arc::new(demo()));
        assert!(!loader.is_loading());

        loader.refresh();
        assert!(loader.is_loading());

        let snapshot = loader.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(snapshot.events.len(), 2);
        assert!(!loader.is_loading());
    }

    /// Source whose first call blocks until released, so two refreshes can
    /// complete in reverse order.
    struct GatedSource {
        calls: Mutex<u32>,
        gate: Mutex<Option<mpsc::Receiver<()>>>,
    }

    impl DataSource for GatedSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Remote
        }

        fn fetch(&self) -> Result<Vec<Event>, FetchError> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                *calls
            };
            if call == 1 {
                let gate = self.gate.lock().unwrap().take();
                if let Some(gate) = gate {
                    let _ = gate.recv();
                }
                Ok(vec![event("stale")])
            } else {
                Ok(vec![event("fresh")])
            }
        }
    }

    #[test]
    fn test_latest_request_wins() {
        let (release, gate) = mpsc::channel();
        let source = Arc::new(GatedSource {
            calls: Mutex::new(0),
            gate: Mutex::new(Some(gate)),
        });
        let mut loader = EventLoader::new(source.clone(), Arc::new(demo()));

        loader.refresh();
        // Make sure the first load has taken the gate before issuing the second
        while *source.calls.lock().unwrap() == 0 {
            thread::yield_now();
        }
        loader.refresh();

        let snapshot = loader.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(snapshot.events[0].id, "fresh");

        release.send(()).unwrap();
        thread::sleep(Duration::from_millis(50));
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_shutdown_discards_results() {
        let mut loader = EventLoader::new(Arc::new(remote_returning(&["a"])), Arc::new(demo()));
        loader.refresh();
        loader.shutdown();
        assert!(!loader.is_loading());
        thread::sleep(Duration::from_millis(50));
        assert!(loader.poll().is_none());
    }
}

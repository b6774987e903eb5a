//! One mounted agenda: snapshot, filter, week anchor, popup and toasts.
//!
//! The session owns all mutable agenda state. Loading happens in the
//! background through [`EventLoader`]; call [`AgendaSession::pump`] to apply
//! finished loads. Everything else is derived on demand from the snapshot.

mod listeners;
mod popup;

pub use listeners::{DocumentListeners, ListenerGuard};
pub use popup::PopupController;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::models::event::Event;
use crate::models::filter::{FilterAction, FilterState};
use crate::models::popup::{PopupEffect, PopupLayout, PopupView};
use crate::models::settings::AgendaSettings;
use crate::services::agenda::conflicts::CellActivation;
use crate::services::agenda::{AgendaStats, AgendaView};
use crate::services::loader::{EventLoader, Snapshot};
use crate::services::notification::{Toast, ToastManager};
use crate::services::source::{DataSource, DemoSource, RemoteSource, SourceKind};
use crate::utils::geometry::Point;
use crate::views::{navigate, AgendaList, Navigation, WeekGrid};

/// Message shown once per failed load
pub const FALLBACK_NOTICE: &str = "Could not load the agenda, showing demo data.";

/// What a click on a day cell led to
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// No event on that day
    Ignored,
    /// Exactly one event: show its detail
    OpenDetail(Event),
    /// Several events: the popup is now open for that date
    PopupOpened(NaiveDate),
}

pub struct AgendaSession {
    settings: AgendaSettings,
    events: Vec<Event>,
    origin: Option<SourceKind>,
    filter: FilterState,
    anchor: NaiveDate,
    today: Option<NaiveDate>,
    loader: EventLoader,
    listeners: DocumentListeners,
    popup: PopupController,
    toasts: ToastManager,
    mounted: bool,
}

impl AgendaSession {
    pub fn new(
        settings: AgendaSettings,
        primary: Arc<dyn DataSource>,
        fallback: Arc<dyn DataSource>,
    ) -> Self {
        let listeners = DocumentListeners::new();
        let popup = PopupController::new(listeners.clone(), PopupLayout::default());
        let toasts = ToastManager::new(Duration::from_secs(settings.notifications.duration_secs));

        Self {
            settings,
            events: Vec::new(),
            origin: None,
            filter: FilterState::default(),
            anchor: Local::now().date_naive(),
            today: None,
            loader: EventLoader::new(primary, fallback),
            listeners,
            popup,
            toasts,
            mounted: false,
        }
    }

    /// Session reading from the configured endpoint with demo fallback.
    /// With `demo_only` the endpoint is never contacted.
    pub fn from_settings(settings: AgendaSettings, demo_only: bool, today: Option<NaiveDate>) -> Self {
        let mut demo = DemoSource::new(settings.demo);
        if let Some(today) = today {
            demo = demo.with_today(today);
        }
        let fallback: Arc<dyn DataSource> = Arc::new(demo);

        let mut endpoint_unusable = false;
        let primary: Arc<dyn DataSource> = if demo_only {
            Arc::clone(&fallback)
        } else {
            match RemoteSource::new(&settings) {
                Ok(remote) => Arc::new(remote),
                Err(err) => {
                    log::error!("Agenda endpoint unusable, using demo data only: {}", err);
                    endpoint_unusable = true;
                    Arc::clone(&fallback)
                }
            }
        };

        let mut session = Self::new(settings, primary, fallback);
        if let Some(today) = today {
            session = session.with_today(today);
        }
        if endpoint_unusable {
            session.toasts.warning(FALLBACK_NOTICE);
        }
        session
    }

    /// Pin "today" instead of reading the clock. Also moves the anchor.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self.anchor = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn settings(&self) -> &AgendaSettings {
        &self.settings
    }

    /// Start the initial load. Calling it again only refreshes.
    pub fn mount(&mut self) -> u64 {
        self.mounted = true;
        self.anchor = self.today();
        self.refresh()
    }

    /// Start a background load. Does nothing once unmounted and returns the
    /// last generation handed out.
    pub fn refresh(&mut self) -> u64 {
        if !self.mounted {
            log::debug!("Ignoring refresh on an unmounted agenda");
            return self.loader.latest_generation();
        }
        self.loader.refresh()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    /// Apply a finished load, if any. Returns true when the snapshot changed.
    pub fn pump(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        match self.loader.poll() {
            Some(snapshot) => {
                self.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    /// Block until the current load settles. Used by the terminal front end.
    pub fn wait_for_load(&mut self, timeout: Duration) -> bool {
        if !self.mounted {
            return false;
        }
        match self.loader.wait(timeout) {
            Some(snapshot) => {
                self.apply_snapshot(snapshot);
                true
            }
            None => false,
        }
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        log::info!(
            "Agenda snapshot applied: {} events from {:?}",
            snapshot.events.len(),
            snapshot.origin
        );
        if let Some(ref error) = snapshot.error {
            log::warn!("Showing fallback agenda data: {}", error);
            self.toasts.warning(FALLBACK_NOTICE);
        }
        self.events = snapshot.events;
        self.origin = Some(snapshot.origin);
        // The listed events may no longer exist
        self.popup.close();
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Where the current snapshot came from; `None` before the first load
    pub fn origin(&self) -> Option<SourceKind> {
        self.origin
    }

    pub fn filter(&self) -> FilterState {
        self.filter
    }

    pub fn dispatch_filter(&mut self, action: FilterAction) {
        self.filter = self.filter.reduce(action);
        log::debug!("Filter is now: {}", self.filter.summary());
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn navigate(&mut self, action: Navigation) {
        self.anchor = navigate(self.anchor, action, self.today());
    }

    /// Jump straight to the week containing `anchor`
    pub fn set_anchor(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
    }

    pub fn view(&self) -> AgendaView<'_> {
        AgendaView::build(&self.events, &self.filter, self.today())
    }

    pub fn week_grid(&self) -> WeekGrid<'_> {
        let view = self.view();
        WeekGrid::project(view.filtered(), self.anchor, &self.settings.grid)
    }

    pub fn list(&self) -> AgendaList {
        AgendaList::from_view(&self.view())
    }

    /// Counters over the whole snapshot; filters do not apply.
    pub fn stats(&self) -> AgendaStats {
        AgendaStats::compute(
            &self.events,
            self.today(),
            self.anchor,
            self.settings.grid.first_day_of_week,
        )
    }

    /// Click on the cell for `date` at `at`. The click first reaches the
    /// document, so an open popup elsewhere closes before anything opens.
    pub fn click_cell(&mut self, date: NaiveDate, at: Point) -> ClickOutcome {
        self.listeners.dispatch_click(at);

        let activation = match self.view().activate(date) {
            CellActivation::Empty => None,
            CellActivation::Single(event) => Some(Ok(event.clone())),
            CellActivation::Multiple(events) => Some(Err(events)),
        };

        match activation {
            None => ClickOutcome::Ignored,
            Some(Ok(event)) => ClickOutcome::OpenDetail(event),
            Some(Err(events)) => {
                self.popup.open(date, at, events);
                ClickOutcome::PopupOpened(date)
            }
        }
    }

    /// A click anywhere else in the document
    pub fn document_click(&mut self, at: Point) {
        self.listeners.dispatch_click(at);
    }

    pub fn popup(&self) -> Option<PopupView> {
        self.popup.view()
    }

    pub fn popup_has_listener(&self) -> bool {
        self.popup.has_listener()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn close_popup(&mut self) {
        self.popup.close();
    }

    /// Pick an entry of the open popup; returns the event whose detail opens.
    pub fn select_popup_event(&mut self, event_id: &str) -> Option<Event> {
        match self.popup.select(event_id)? {
            PopupEffect::OpenDetail(id) => self.events.iter().find(|event| event.id == id).cloned(),
        }
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn drain_toasts(&mut self) -> Vec<Toast> {
        self.toasts.drain()
    }

    /// Tear down: pending loads are discarded and the popup listener released.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        log::debug!("Unmounting agenda session");
        self.mounted = false;
        self.loader.shutdown();
        self.popup.close();
    }
}

impl Drop for AgendaSession {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventType;
    use crate::services::source::{FetchError, MockDataSource};
    use chrono::NaiveTime;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn snapshot_events() -> Vec<Event> {
        vec![
            Event::builder("1", "Quote", date(12))
                .kind(EventType::Quote)
                .start(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
                .build()
                .unwrap(),
            Event::builder("2", "Visit", date(12))
                .start(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
                .build()
                .unwrap(),
            Event::builder("3", "Order", date(13))
                .kind(EventType::Order)
                .build()
                .unwrap(),
        ]
    }

    fn remote_ok() -> Arc<dyn DataSource> {
        let mut mock = MockDataSource::new();
        mock.expect_kind().return_const(SourceKind::Remote);
        mock.expect_fetch().returning(|| Ok(snapshot_events()));
        Arc::new(mock)
    }

    fn remote_failing() -> Arc<dyn DataSource> {
        let mut mock = MockDataSource::new();
        mock.expect_kind().return_const(SourceKind::Remote);
        mock.expect_fetch().returning(|| Err(FetchError::Status(502)));
        Arc::new(mock)
    }

    fn demo() -> Arc<dyn DataSource> {
        Arc::new(DemoSource::new(AgendaSettings::default().demo).with_today(date(12)))
    }

    fn mounted(primary: Arc<dyn DataSource>) -> AgendaSession {
        let mut session =
            AgendaSession::new(AgendaSettings::default(), primary, demo()).with_today(date(12));
        session.mount();
        assert!(session.wait_for_load(Duration::from_secs(5)));
        session
    }

    #[test]
    fn test_mount_loads_remote_snapshot() {
        let session = mounted(remote_ok());
        assert_eq!(session.events().len(), 3);
        assert_eq!(session.origin(), Some(SourceKind::Remote));
        assert!(!session.toasts().has_toasts());
    }

    #[test]
    fn test_failed_load_uses_demo_with_one_toast() {
        let mut session = mounted(remote_failing());
        assert!(!session.events().is_empty());
        assert_eq!(session.origin(), Some(SourceKind::Demo));

        let toasts = session.drain_toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, FALLBACK_NOTICE);
    }

    #[test]
    fn test_click_single_event_opens_detail() {
        let mut session = mounted(remote_ok());
        match session.click_cell(date(13), Point::new(10.0, 10.0)) {
            ClickOutcome::OpenDetail(event) => assert_eq!(event.id, "3"),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(session.popup().is_none());
        assert_eq!(session.click_cell(date(20), Point::default()), ClickOutcome::Ignored);
    }

    #[test]
    fn test_click_multiple_opens_sorted_popup() {
        let mut session = mounted(remote_ok());
        let outcome = session.click_cell(date(12), Point::new(200.0, 200.0));
        assert_eq!(outcome, ClickOutcome::PopupOpened(date(12)));

        let popup = session.popup().unwrap();
        let ids: Vec<&str> = popup.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert!(session.popup_has_listener());

        let detail = session.select_popup_event("1").unwrap();
        assert_eq!(detail.title, "Quote");
        assert!(session.popup().is_none());
        assert_eq!(session.listener_count(), 0);
    }

    #[test]
    fn test_filter_does_not_change_stats() {
        let mut session = mounted(remote_ok());
        session.dispatch_filter(FilterAction::SetType(Some(EventType::Order)));

        assert_eq!(session.view().filtered().len(), 1);
        let stats = session.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.today, 2);
    }

    #[test]
    fn test_navigation_moves_grid() {
        let mut session = mounted(remote_ok());
        assert_eq!(session.week_grid().placed_count(), 2);

        session.navigate(Navigation::NextWeek);
        assert_eq!(session.week_grid().placed_count(), 0);

        session.navigate(Navigation::Today);
        assert_eq!(session.anchor(), date(12));
    }

    #[test]
    fn test_unmount_releases_everything() {
        let mut session = mounted(remote_ok());
        session.click_cell(date(12), Point::new(200.0, 200.0));
        session.refresh();
        session.unmount();

        assert_eq!(session.listener_count(), 0);
        assert!(!session.is_loading());
        assert!(!session.pump());
    }

    #[test]
    fn test_refresh_after_unmount_is_ignored() {
        let mut session = mounted(remote_ok());
        let last = session.refresh();
        session.unmount();

        assert_eq!(session.refresh(), last);
        assert!(!session.is_loading());
        assert!(!session.pump());
    }

    #[test]
    fn test_set_anchor() {
        let mut session = mounted(remote_ok());
        session.set_anchor(date(26));
        assert_eq!(session.anchor(), date(26));
        assert_eq!(session.week_grid().dates[0], date(24));
    }
}

use chrono::{Duration, Local, NaiveDate, NaiveTime};
use uuid::Uuid;

use super::{DataSource, FetchError, SourceKind};
use crate::models::event::{Client, Event, EventStatus, EventType};
use crate::models::settings::DemoSettings;

const DEMO_CLIENTS: [&str; 5] = [
    "Camille Martin",
    "Louis Bernard",
    "Chloé Dubois",
    "Hugo Laurent",
    "Inès Moreau",
];

const DEMO_LOCATIONS: [&str; 4] = ["Paris", "Lyon", "Marseille", "Bordeaux"];

/// Synthetic snapshot used when the backend cannot be reached, so the
/// agenda stays populated. Types and statuses are drawn at random; dates are
/// spread over the next `day_span` days starting today.
#[derive(Debug, Clone)]
pub struct DemoSource {
    settings: DemoSettings,
    today: Option<NaiveDate>,
}

impl DemoSource {
    pub fn new(settings: DemoSettings) -> Self {
        Self {
            settings,
            today: None,
        }
    }

    /// Pin the reference date instead of reading the clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn generate(&self, today: NaiveDate) -> Vec<Event> {
        let span = self.settings.day_span.max(1) as usize;

        (0..self.settings.event_count)
            .map(|index| {
                let seed = Uuid::new_v4();
                let bytes = seed.as_bytes();

                let kind = EventType::ALL[bytes[0] as usize % EventType::ALL.len()];
                let status = EventStatus::ALL[bytes[1] as usize % EventStatus::ALL.len()];
                let date = today + Duration::days((index % span) as i64);

                let mut event = Event {
                    id: format!("demo-{}", seed),
                    title: format!("{} #{}", kind.label(), index + 1),
                    kind,
                    status,
                    date,
                    start_time: None,
                    end_time: None,
                    client: Some(Client {
                        name: Some(DEMO_CLIENTS[index % DEMO_CLIENTS.len()].to_string()),
                        email: None,
                        phone: None,
                    }),
                    location: Some(DEMO_LOCATIONS[bytes[2] as usize % DEMO_LOCATIONS.len()].to_string()),
                    description: Some("Demonstration event".to_string()),
                    details: None,
                    amount: None,
                    color: None,
                    metadata: Default::default(),
                };

                // Roughly one event in five is all day
                if bytes[3] % 5 != 0 {
                    let hour = 8 + u32::from(bytes[4]) % 11;
                    event.start_time = NaiveTime::from_hms_opt(hour, 0, 0);
                    event.end_time = NaiveTime::from_hms_opt(hour + 1, 0, 0);
                }

                if kind.is_financial() {
                    let cents = u32::from(u16::from_be_bytes([bytes[5], bytes[6]])) % 200_000;
                    event.amount = Some(50.0 + f64::from(cents) / 100.0);
                }

                event
            })
            .collect()
    }
}

impl DataSource for DemoSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Demo
    }

    fn fetch(&self) -> Result<Vec<Event>, FetchError> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let events = self.generate(today);
        log::info!("Generated {} demonstration events from {}", events.len(), today);
        Ok(events)
    }
}

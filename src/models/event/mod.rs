// Event module
// Agenda event model as delivered by the marketplace backend

mod wire;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Category of an agenda event. Determines icon, label and default color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum EventType {
    #[serde(rename = "DEMANDE")]
    Request,
    #[serde(rename = "DEMANDE_ARTISAN")]
    CraftsmanRequest,
    #[serde(rename = "RENDEZ_VOUS")]
    Appointment,
    #[serde(rename = "DEVIS")]
    Quote,
    #[serde(rename = "COMMANDE")]
    Order,
    #[serde(rename = "FACTURE")]
    Invoice,
    #[serde(rename = "RESERVATION")]
    Reservation,
    #[serde(rename = "AUDIT")]
    Audit,
    #[serde(rename = "BIEN_ETRE")]
    Wellness,
    #[serde(rename = "MESSAGE")]
    Message,
    /// Any tag the backend sends that is not part of the fixed set
    #[default]
    #[serde(other)]
    Unknown,
}

impl EventType {
    /// Every known category, in display order.
    pub const ALL: [EventType; 10] = [
        EventType::Request,
        EventType::CraftsmanRequest,
        EventType::Appointment,
        EventType::Quote,
        EventType::Order,
        EventType::Invoice,
        EventType::Reservation,
        EventType::Audit,
        EventType::Wellness,
        EventType::Message,
    ];

    /// Wire tag used by the backend
    pub fn tag(&self) -> &'static str {
        match self {
            EventType::Request => "DEMANDE",
            EventType::CraftsmanRequest => "DEMANDE_ARTISAN",
            EventType::Appointment => "RENDEZ_VOUS",
            EventType::Quote => "DEVIS",
            EventType::Order => "COMMANDE",
            EventType::Invoice => "FACTURE",
            EventType::Reservation => "RESERVATION",
            EventType::Audit => "AUDIT",
            EventType::Wellness => "BIEN_ETRE",
            EventType::Message => "MESSAGE",
            EventType::Unknown => "INCONNU",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventType::Request => "Request",
            EventType::CraftsmanRequest => "Craftsman request",
            EventType::Appointment => "Appointment",
            EventType::Quote => "Quote",
            EventType::Order => "Order",
            EventType::Invoice => "Invoice",
            EventType::Reservation => "Reservation",
            EventType::Audit => "Audit",
            EventType::Wellness => "Wellness",
            EventType::Message => "Message",
            EventType::Unknown => "Event",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EventType::Request => "📋",
            EventType::CraftsmanRequest => "🔨",
            EventType::Appointment => "📅",
            EventType::Quote => "📄",
            EventType::Order => "📦",
            EventType::Invoice => "🧾",
            EventType::Reservation => "🏠",
            EventType::Audit => "🔍",
            EventType::Wellness => "🌿",
            EventType::Message => "✉",
            EventType::Unknown => "•",
        }
    }

    /// Hex color shown when the event carries no explicit color
    pub fn default_color(&self) -> &'static str {
        match self {
            EventType::Request => "#3B82F6",
            EventType::CraftsmanRequest => "#F97316",
            EventType::Appointment => "#8B5CF6",
            EventType::Quote => "#EAB308",
            EventType::Order => "#10B981",
            EventType::Invoice => "#EF4444",
            EventType::Reservation => "#06B6D4",
            EventType::Audit => "#6366F1",
            EventType::Wellness => "#22C55E",
            EventType::Message => "#EC4899",
            EventType::Unknown => "#6B7280",
        }
    }

    /// Categories that usually carry an `amount`
    pub fn is_financial(&self) -> bool {
        matches!(
            self,
            EventType::Quote | EventType::Order | EventType::Invoice
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EventType::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown event type '{}'", wanted))
    }
}

/// Lifecycle status as reported by the backend. The client only reflects it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum EventStatus {
    #[serde(rename = "CONFIRME")]
    Confirmed,
    #[serde(rename = "EN_ATTENTE")]
    Pending,
    #[serde(rename = "ANNULE")]
    Cancelled,
    #[serde(rename = "TERMINE")]
    Completed,
    #[serde(rename = "EN_COURS")]
    InProgress,
    #[serde(rename = "BROUILLON")]
    Draft,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    pub const ALL: [EventStatus; 6] = [
        EventStatus::Confirmed,
        EventStatus::Pending,
        EventStatus::Cancelled,
        EventStatus::Completed,
        EventStatus::InProgress,
        EventStatus::Draft,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "CONFIRME",
            EventStatus::Pending => "EN_ATTENTE",
            EventStatus::Cancelled => "ANNULE",
            EventStatus::Completed => "TERMINE",
            EventStatus::InProgress => "EN_COURS",
            EventStatus::Draft => "BROUILLON",
            EventStatus::Unknown => "INCONNU",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "Confirmed",
            EventStatus::Pending => "Pending",
            EventStatus::Cancelled => "Cancelled",
            EventStatus::Completed => "Completed",
            EventStatus::InProgress => "In progress",
            EventStatus::Draft => "Draft",
            EventStatus::Unknown => "Unknown",
        }
    }

    /// Badge color; unknown statuses get a neutral grey
    pub fn color(&self) -> &'static str {
        match self {
            EventStatus::Confirmed => "#16A34A",
            EventStatus::Pending => "#D97706",
            EventStatus::Cancelled => "#DC2626",
            EventStatus::Completed => "#2563EB",
            EventStatus::InProgress => "#7C3AED",
            EventStatus::Draft => "#9CA3AF",
            EventStatus::Unknown => "#6B7280",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EventStatus::ALL
            .into_iter()
            .find(|status| status.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown event status '{}'", wanted))
    }
}

/// Contact embedded in an event; display only.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Client {
    #[serde(default, alias = "nom")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "telephone")]
    pub phone: Option<String>,
}

/// A scheduled occurrence fetched from the agenda endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub title: String,
    #[serde(default, rename = "type", deserialize_with = "wire::or_default")]
    pub kind: EventType,
    #[serde(default, deserialize_with = "wire::or_default")]
    pub status: EventStatus,
    #[serde(deserialize_with = "wire::date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "wire::optional_time")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "wire::optional_time")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "wire::optional_amount")]
    pub amount: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "wire::metadata")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Event {
    /// Create a builder for constructing events with optional fields
    ///
    /// # Examples
    /// ```
    /// use agenda::models::event::{Event, EventType};
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    /// let event = Event::builder("42", "Site visit", date)
    ///     .kind(EventType::Appointment)
    ///     .build()
    ///     .unwrap();
    /// assert!(event.is_all_day());
    /// ```
    pub fn builder(id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> EventBuilder {
        EventBuilder::new(id, title, date)
    }

    /// No start time means the event covers the whole day
    pub fn is_all_day(&self) -> bool {
        self.start_time.is_none()
    }

    pub fn start_hour(&self) -> Option<u32> {
        self.start_time.map(|time| time.hour())
    }

    /// Explicit color, or the category default
    pub fn display_color(&self) -> &str {
        match self.color.as_deref() {
            Some(color) if !color.trim().is_empty() => color,
            _ => self.kind.default_color(),
        }
    }

    /// "09:00 - 10:30", "09:00" or "All day"
    pub fn time_label(&self) -> String {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
            }
            (Some(start), None) => start.format("%H:%M").to_string(),
            (None, _) => "All day".to_string(),
        }
    }

    /// Free text body, preferring `description` over `details`
    pub fn body(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .or_else(|| self.details.as_deref().filter(|text| !text.trim().is_empty()))
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            event: Event {
                id: id.into(),
                title: title.into(),
                kind: EventType::Appointment,
                status: EventStatus::Pending,
                date,
                start_time: None,
                end_time: None,
                client: None,
                location: None,
                description: None,
                details: None,
                amount: None,
                color: None,
                metadata: BTreeMap::new(),
            },
        }
    }

    pub fn kind(mut self, kind: EventType) -> Self {
        self.event.kind = kind;
        self
    }

    pub fn status(mut self, status: EventStatus) -> Self {
        self.event.status = status;
        self
    }

    /// Set the start time
    pub fn start(mut self, start: NaiveTime) -> Self {
        self.event.start_time = Some(start);
        self
    }

    /// Set the end time
    pub fn end(mut self, end: NaiveTime) -> Self {
        self.event.end_time = Some(end);
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.event.client = Some(client);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.event.location = Some(location.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.event.description = Some(description.into());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.event.amount = Some(amount);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.event.color = Some(color.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.event.metadata.insert(key.into(), value);
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, String> {
        let event = self.event;

        if event.id.trim().is_empty() {
            return Err("Event id cannot be empty".to_string());
        }

        if let (Some(start), Some(end)) = (event.start_time, event.end_time) {
            if end < start {
                return Err("Event end time must not be before start time".to_string());
            }
        }

        if event.end_time.is_some() && event.start_time.is_none() {
            return Err("Event end time requires a start time".to_string());
        }

        Ok(event)
    }
}

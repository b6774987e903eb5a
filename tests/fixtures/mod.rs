// Test fixtures - reusable test data
// Provides consistent agenda snapshots across all test files

#![allow(dead_code)]

use agenda::models::event::{Event, EventStatus, EventType};
use chrono::{NaiveDate, NaiveTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, June 12, 2024; used as "today"
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    pub fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    pub fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::dates::{at, june};
    use super::*;

    pub fn timed(id: &str, day: u32, hour: u32) -> Event {
        Event::builder(id, format!("Event {}", id), june(day))
            .start(at(hour, 0))
            .end(at(hour + 1, 0))
            .build()
            .unwrap()
    }

    pub fn untimed(id: &str, day: u32) -> Event {
        Event::builder(id, format!("Event {}", id), june(day))
            .build()
            .unwrap()
    }

    /// Five events over three days: two on the 10th, two on the 12th, one on the 14th
    pub fn week_snapshot() -> Vec<Event> {
        vec![
            Event::builder("a", "Bathroom quote", june(10))
                .kind(EventType::Quote)
                .status(EventStatus::Pending)
                .start(at(9, 0))
                .amount(1800.0)
                .build()
                .unwrap(),
            Event::builder("b", "Site visit", june(10))
                .kind(EventType::Appointment)
                .status(EventStatus::Confirmed)
                .start(at(14, 30))
                .build()
                .unwrap(),
            Event::builder("c", "Massage", june(12))
                .kind(EventType::Wellness)
                .status(EventStatus::Confirmed)
                .start(at(11, 0))
                .build()
                .unwrap(),
            Event::builder("d", "Invoice due", june(12))
                .kind(EventType::Invoice)
                .status(EventStatus::Pending)
                .amount(240.5)
                .build()
                .unwrap(),
            Event::builder("e", "Cottage stay", june(14))
                .kind(EventType::Reservation)
                .status(EventStatus::Cancelled)
                .build()
                .unwrap(),
        ]
    }
}

/// Wire payloads as served by the agenda endpoint
pub mod payloads {
    pub const WEEK: &str = r#"{
        "evenements": [
            {
                "id": 101,
                "title": "Kitchen quote",
                "type": "DEVIS",
                "status": "EN_ATTENTE",
                "date": "2024-06-12T00:00:00",
                "startTime": "09:30",
                "endTime": "10:30:00",
                "client": { "nom": "Camille Martin", "email": "camille@example.com" },
                "amount": "1250,50"
            },
            {
                "id": "r-7",
                "title": "Weekend stay",
                "type": "RESERVATION",
                "status": "CONFIRME",
                "date": "2024-06-12",
                "startTime": null,
                "metadata": { "guests": 2 }
            },
            {
                "id": "x-1",
                "title": "From the future",
                "type": "HOLOGRAM",
                "status": "QUANTUM",
                "date": "2024-06-13",
                "startTime": "25:99"
            }
        ]
    }"#;

    pub const EMPTY: &str = r#"{ "evenements": [] }"#;

    /// Second event carries nulls where text and tags are expected
    pub const NULL_FIELDS: &str = r#"{
        "evenements": [
            {
                "id": "n-1",
                "title": "Boiler service",
                "type": "RENDEZ_VOUS",
                "status": "CONFIRME",
                "date": "2024-06-12",
                "startTime": "08:00"
            },
            {
                "id": "n-2",
                "title": null,
                "type": null,
                "status": null,
                "date": "2024-06-13",
                "startTime": null,
                "location": null,
                "amount": null
            }
        ]
    }"#;
}

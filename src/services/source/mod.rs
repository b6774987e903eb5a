//! Where agenda snapshots come from.
//!
//! The loader talks to a [`DataSource`]; the remote endpoint and the demo
//! generator are interchangeable implementations.

mod demo;
mod remote;

pub use demo::DemoSource;
pub use remote::RemoteSource;

use serde::Deserialize;
use thiserror::Error;

use crate::models::event::Event;

/// Failures of a snapshot read. None of them is fatal to the agenda.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid agenda URL '{0}'")]
    InvalidUrl(String),
    #[error("Network error during agenda fetch: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Agenda fetch failed with HTTP status {0}")]
    Status(u16),
    #[error("Agenda response too large ({size} bytes > {limit} bytes)")]
    TooLarge { size: usize, limit: usize },
    #[error("Malformed agenda payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    Demo,
}

/// A provider of the full event snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait DataSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Read the whole snapshot. Implementations never filter.
    fn fetch(&self) -> Result<Vec<Event>, FetchError>;
}

/// Body of `GET /agenda/events`
#[derive(Debug, Default, Deserialize)]
pub struct EventsPayload {
    #[serde(default)]
    pub evenements: Option<Vec<Event>>,
}

impl EventsPayload {
    /// Decode a response body; a missing or null list means "no events".
    pub fn parse(body: &[u8]) -> Result<Vec<Event>, FetchError> {
        let payload: EventsPayload = serde_json::from_slice(body)?;
        Ok(payload.evenements.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_missing_list_is_empty() {
        assert!(EventsPayload::parse(br#"{}"#).unwrap().is_empty());
        assert!(EventsPayload::parse(br#"{"evenements": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_events() {
        let body = br#"{"evenements": [
            {"id": "1", "title": "A", "type": "AUDIT", "status": "CONFIRME", "date": "2024-06-10"},
            {"id": "2", "title": "B", "type": "MESSAGE", "status": "EN_COURS", "date": "2024-06-11", "startTime": "14:00"}
        ]}"#;
        let events = EventsPayload::parse(body).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].start_hour(), Some(14));
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = EventsPayload::parse(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, FetchError::Payload(_)));
    }

    #[test]
    fn test_parse_wrong_shape() {
        let err = EventsPayload::parse(br#"{"evenements": "nope"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Payload(_)));
    }
}

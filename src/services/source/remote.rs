use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

use super::{DataSource, EventsPayload, FetchError, SourceKind};
use crate::models::event::Event;
use crate::models::settings::AgendaSettings;

/// Reads the snapshot from `GET {base}/agenda/events`. One attempt, no retry:
/// a failure is handed back to the loader, which falls back to demo data.
pub struct RemoteSource {
    client: Client,
    url: Url,
    auth_token: Option<String>,
    max_response_bytes: usize,
}

impl RemoteSource {
    pub fn new(settings: &AgendaSettings) -> Result<Self, FetchError> {
        let raw_url = settings.events_url();
        let url = Url::parse(&raw_url).map_err(|_| FetchError::InvalidUrl(raw_url.clone()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url,
            auth_token: settings.auth_token.clone().filter(|token| !token.trim().is_empty()),
            max_response_bytes: settings.max_response_bytes,
        })
    }

    fn fetch_once(&self) -> Result<Vec<Event>, FetchError> {
        let mut request = self
            .client
            .get(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_bytes {
                return Err(FetchError::TooLarge {
                    size: content_length as usize,
                    limit: self.max_response_bytes,
                });
            }
        }

        let bytes = response.bytes()?;
        if bytes.len() > self.max_response_bytes {
            return Err(FetchError::TooLarge {
                size: bytes.len(),
                limit: self.max_response_bytes,
            });
        }

        EventsPayload::parse(&bytes)
    }

    /// Scheme and host only; paths and query strings may carry tokens.
    fn redact_url(url: &Url) -> String {
        match url.host_str() {
            Some(host) => format!("{}://{}/***redacted***", url.scheme(), host),
            None => "***redacted-url***".to_string(),
        }
    }
}

impl DataSource for RemoteSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    fn fetch(&self) -> Result<Vec<Event>, FetchError> {
        let redacted = Self::redact_url(&self.url);
        log::info!("Fetching agenda events from {}", redacted);

        match self.fetch_once() {
            Ok(events) => {
                log::info!("Fetched {} agenda events from {}", events.len(), redacted);
                Ok(events)
            }
            Err(err) => {
                log::error!("Agenda fetch from {} failed: {}", redacted, err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_for(base: &str) -> AgendaSettings {
        AgendaSettings {
            api_base_url: base.to_string(),
            ..AgendaSettings::default()
        }
    }

    #[test]
    fn test_redact_url_keeps_host() {
        let url = Url::parse("https://api.example.com/v1/agenda/events?token=secret").unwrap();
        assert_eq!(
            RemoteSource::redact_url(&url),
            "https://api.example.com/***redacted***"
        );
    }

    #[test]
    fn test_success_returns_events() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/agenda/events")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"evenements": [{"id": 1, "title": "Visit", "type": "RENDEZ_VOUS", "status": "CONFIRME", "date": "2024-06-10", "startTime": "10:00"}]}"#,
            )
            .create();

        let source = RemoteSource::new(&settings_for(&server.url())).unwrap();
        let events = source.fetch().unwrap();

        mock.assert();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "1");
        assert_eq!(source.kind(), SourceKind::Remote);
    }

    #[test]
    fn test_sends_bearer_token() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/agenda/events")
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_body(r#"{"evenements": []}"#)
            .create();

        let settings = AgendaSettings {
            auth_token: Some("abc123".to_string()),
            ..settings_for(&server.url())
        };
        let events = RemoteSource::new(&settings).unwrap().fetch().unwrap();

        mock.assert();
        assert!(events.is_empty());
    }

    #[test]
    fn test_http_error_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/agenda/events")
            .with_status(503)
            .create();

        let source = RemoteSource::new(&settings_for(&server.url())).unwrap();
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[test]
    fn test_malformed_payload() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/agenda/events")
            .with_status(200)
            .with_body("not json")
            .create();

        let source = RemoteSource::new(&settings_for(&server.url())).unwrap();
        assert!(matches!(source.fetch(), Err(FetchError::Payload(_))));
    }

    #[test]
    fn test_response_too_large() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/agenda/events")
            .with_status(200)
            .with_body(r#"{"evenements": []}"#)
            .create();

        let settings = AgendaSettings {
            max_response_bytes: 4,
            ..settings_for(&server.url())
        };
        let source = RemoteSource::new(&settings).unwrap();
        assert!(matches!(source.fetch(), Err(FetchError::TooLarge { .. })));
    }

    #[test]
    fn test_invalid_url() {
        let result = RemoteSource::new(&settings_for("http://exa mple.com"));
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}

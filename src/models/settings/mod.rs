// Settings module
// Runtime configuration for the agenda core, read from agenda.toml

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaSettings {
    /// Backend root, e.g. "https://api.example.com"
    pub api_base_url: String,
    pub events_path: String,
    /// Bearer token sent with the agenda request, if any
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,
    pub max_response_bytes: usize,
    pub grid: GridSettings,
    pub demo: DemoSettings,
    pub notifications: NotificationSettings,
}

/// Week grid geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// First hour row (inclusive)
    pub start_hour: u32,
    /// Last hour row (exclusive)
    pub end_hour: u32,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    pub stack_offset_px: f32,
    pub hour_height_px: f32,
    pub column_width_px: f32,
    pub time_label_width_px: f32,
    pub column_spacing_px: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub event_count: usize,
    pub day_span: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub duration_secs: u64,
}

impl Default for AgendaSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            events_path: "/agenda/events".to_string(),
            auth_token: None,
            request_timeout_secs: 20,
            max_response_bytes: 5 * 1024 * 1024,
            grid: GridSettings::default(),
            demo: DemoSettings::default(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
            first_day_of_week: 1, // Monday
            stack_offset_px: 20.0,
            hour_height_px: 60.0,
            column_width_px: 140.0,
            time_label_width_px: 50.0,
            column_spacing_px: 1.0,
        }
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            event_count: 12,
            day_span: 7,
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { duration_secs: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("API base URL must start with http:// or https://")]
    InvalidBaseUrl,
    #[error("Events path must start with '/'")]
    InvalidEventsPath,
    #[error("Grid hours must satisfy start < end <= 24 (got {start}..{end})")]
    InvalidHourRange { start: u32, end: u32 },
    #[error("First day of week must be between 0 and 6")]
    InvalidFirstDay,
    #[error("Grid sizes must be positive")]
    InvalidGridSize,
    #[error("Request timeout must be at least one second")]
    InvalidTimeout,
}

impl AgendaSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(SettingsError::InvalidBaseUrl);
        }
        if !self.events_path.starts_with('/') {
            return Err(SettingsError::InvalidEventsPath);
        }
        if self.request_timeout_secs == 0 {
            return Err(SettingsError::InvalidTimeout);
        }
        self.grid.validate()
    }

    /// Full URL of the agenda endpoint
    pub fn events_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            self.events_path
        )
    }
}

impl GridSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(SettingsError::InvalidHourRange {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        if self.first_day_of_week > 6 {
            return Err(SettingsError::InvalidFirstDay);
        }
        let sizes = [
            self.hour_height_px,
            self.column_width_px,
            self.time_label_width_px,
        ];
        if sizes.iter().any(|size| *size <= 0.0) || self.stack_offset_px < 0.0 {
            return Err(SettingsError::InvalidGridSize);
        }
        Ok(())
    }

    /// Hour rows shown by the grid
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.start_hour..self.end_hour
    }
}

//! Lenient field decoders for the agenda payload.

use chrono::{NaiveDate, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Ids arrive as strings or as numbers depending on the backing table.
pub(super) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => Ok(text),
        TextOrNumber::Integer(value) => Ok(value.to_string()),
        TextOrNumber::Float(value) => Ok(value.to_string()),
    }
}

/// `YYYY-MM-DD`, or a full ISO timestamp whose date part is kept.
pub(super) fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|err| D::Error::custom(format!("invalid event date '{}': {}", raw, err)))
}

/// `HH:MM` (seconds tolerated). Missing, null, empty or unreadable values
/// all mean "no time"; the event is then treated as all day.
pub(super) fn optional_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"));

    match parsed {
        Ok(time) => Ok(Some(time)),
        Err(err) => {
            log::warn!("Ignoring unreadable event time '{}': {}", trimmed, err);
            Ok(None)
        }
    }
}

pub(super) fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<TextOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TextOrNumber::Integer(value)) => Ok(Some(value as f64)),
        Some(TextOrNumber::Float(value)) => Ok(Some(value)),
        Some(TextOrNumber::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(TextOrNumber::Text(text)) => text
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map(Some)
            .map_err(|err| D::Error::custom(format!("invalid amount '{}': {}", text, err))),
    }
}

pub(super) fn metadata<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Null is read as the type's default (empty text, `Unknown` tags).
pub(super) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! Scheduler configuration.
//!
//! The only recognized option is the instant the backbone starts from.
//! When unset, scheduling starts "now".
//!
//! ```toml
//! start_instant = "2025-11-20T09:00:00Z"
//! ```
//!
//! The instant may also be written as a bare TOML offset datetime
//! (`start_instant = 2025-11-20T12:00:00+03:00`). Local datetimes without an
//! offset are rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, ScheduleError};

/// Options for a scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Backbone start. `None` = current time.
    #[serde(default, deserialize_with = "deserialize_start_instant")]
    pub start_instant: Option<DateTime<Utc>>,
}

/// Start instant as written in TOML: a quoted string or a native datetime.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawInstant {
    Text(String),
    Native(toml::value::Datetime),
}

fn deserialize_start_instant<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match RawInstant::deserialize(deserializer)? {
        RawInstant::Text(text) => text,
        RawInstant::Native(datetime) => datetime.to_string(),
    };
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|start| Some(start.with_timezone(&Utc)))
        .map_err(|_| {
            serde::de::Error::custom(format!("invalid start instant '{raw}': expected RFC 3339"))
        })
}

impl SchedulerConfig {
    /// Creates a config with no fixed start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the start instant.
    pub fn with_start_instant(mut self, start: DateTime<Utc>) -> Self {
        self.start_instant = Some(start);
        self
    }

    /// Parses TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parses an RFC 3339 start instant, e.g. from a CLI flag or env var.
    pub fn with_start_rfc3339(self, raw: &str) -> Result<Self> {
        let start = DateTime::parse_from_rfc3339(raw.trim())
            .map_err(|_| ScheduleError::InvalidStartInstant(raw.to_string()))?;
        Ok(self.with_start_instant(start.with_timezone(&Utc)))
    }

    /// The configured start, or now.
    pub fn resolve_start(&self) -> DateTime<Utc> {
        self.start_instant.unwrap_or_else(Utc::now)
    }
}

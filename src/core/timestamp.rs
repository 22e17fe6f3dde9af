//! Timestamp rendering for the `{timestamp}` placeholder
//!
//! The default is ISO 8601 in UTC with millisecond precision, which sorts
//! lexically in chronological order.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// # Examples
///
/// ```
/// use http_request_logger::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Iso8601.format(&at), "2025-01-08T10:30:45.000Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// `1736332245123`
    UnixMillis,

    /// Any strftime-compatible format string, e.g. `%d/%b/%Y:%H:%M:%S %z`.
    Custom(String),
}

impl TimestampFormat {
    /// Reject custom patterns chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        match self {
            TimestampFormat::Custom(pattern)
                if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) =>
            {
                Err(LoggerError::config(
                    "timestampFormat",
                    format!("invalid strftime pattern '{}'", pattern),
                ))
            }
            _ => Ok(()),
        }
    }

    /// A custom pattern that fails to render falls back to [`TimestampFormat::Iso8601`].
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(pattern)) {
                    Ok(()) => out,
                    Err(_) => TimestampFormat::Iso8601.format(datetime),
                }
            }
        }
    }
}

//! Log entry structure and input normalization

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};

/// Method tag used for entries that did not originate from an HTTP request.
pub const DEFAULT_METHOD: &str = "LOG";
/// Path placeholder used for entries that did not originate from an HTTP request.
pub const DEFAULT_PATH: &str = "-";

/// A fully populated record, ready for formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    /// Elapsed milliseconds, never negative.
    pub duration: f64,
    pub message: Option<String>,
    pub ip: Option<String>,
    pub(crate) http: bool,
}

/// Caller-supplied fields; anything left `None` is defaulted on normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialEntry {
    pub timestamp: Option<DateTime<Utc>>,
    pub level: Option<LogLevel>,
    pub method: Option<String>,
    pub path: Option<String>,
    pub status_code: Option<u16>,
    pub duration: Option<f64>,
    pub message: Option<String>,
    pub ip: Option<String>,
    pub(crate) http: bool,
}

impl PartialEntry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    #[must_use]
    pub(crate) fn http(mut self) -> Self {
        self.http = true;
        self
    }
}

/// What a logging call accepts: a bare message or a partial record.
#[derive(Debug, Clone, PartialEq)]
pub enum LogInput {
    Message(String),
    Partial(PartialEntry),
}

impl From<&str> for LogInput {
    fn from(message: &str) -> Self {
        LogInput::Message(message.to_string())
    }
}

impl From<String> for LogInput {
    fn from(message: String) -> Self {
        LogInput::Message(message)
    }
}

impl From<&String> for LogInput {
    fn from(message: &String) -> Self {
        LogInput::Message(message.clone())
    }
}

impl From<PartialEntry> for LogInput {
    fn from(partial: PartialEntry) -> Self {
        LogInput::Partial(partial)
    }
}

impl LogEntry {
    /// Escape line breaks and tabs so one entry always renders as one line.
    fn sanitize(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }

    /// Build a complete entry from a call's level and input.
    ///
    /// Never fails: absent, empty or out-of-range fields take their defaults.
    /// An explicit `level` on a partial record wins over `level`.
    pub fn normalize(level: LogLevel, input: impl Into<LogInput>) -> Self {
        match input.into() {
            LogInput::Message(message) => Self {
                timestamp: Utc::now(),
                level,
                method: DEFAULT_METHOD.to_string(),
                path: DEFAULT_PATH.to_string(),
                status_code: 0,
                duration: 0.0,
                message: Some(Self::sanitize(&message)),
                ip: None,
                http: false,
            },
            LogInput::Partial(partial) => Self {
                timestamp: partial.timestamp.unwrap_or_else(Utc::now),
                level: partial.level.unwrap_or(level),
                method: Self::non_empty(partial.method)
                    .map(|m| Self::sanitize(&m))
                    .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
                path: Self::non_empty(partial.path)
                    .map(|p| Self::sanitize(&p))
                    .unwrap_or_else(|| DEFAULT_PATH.to_string()),
                status_code: partial.status_code.unwrap_or(0),
                duration: partial
                    .duration
                    .filter(|d| d.is_finite() && *d > 0.0)
                    .unwrap_or(0.0),
                message: Self::non_empty(partial.message).map(|m| Self::sanitize(&m)),
                ip: Self::non_empty(partial.ip).map(|ip| Self::sanitize(&ip)),
                http: partial.http,
            },
        }
    }

    pub fn is_http(&self) -> bool {
        self.http
    }
}

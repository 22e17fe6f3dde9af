//! Logger configuration
//!
//! `LoggerOptions` serializes with the camelCase keys `console`, `file`,
//! `filePath`, `level`, `format`, `skip`, `includeIp`, `ipHeaders`,
//! `useGlobal`, `colors` and `timestampFormat`. Every key is optional.

use super::formatter::DEFAULT_FORMAT;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_FILE_PATH: &str = "./logs/app.log";

/// Headers consulted for the client address when none are configured.
pub const DEFAULT_IP_HEADERS: [&str; 3] = ["x-forwarded-for", "x-real-ip", "x-client-ip"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerOptions {
    /// Write to standard output
    pub console: bool,
    /// Append to `file_path`
    pub file: bool,
    pub file_path: PathBuf,
    /// Minimum severity emitted
    pub level: LogLevel,
    /// Output line template; empty selects the default
    pub format: String,
    /// Paths excluded from completion logging (exact match)
    pub skip: Vec<String>,
    pub include_ip: bool,
    /// Client-address headers in priority order
    pub ip_headers: Vec<String>,
    /// HTTP adapter shares the global logger instead of owning one
    pub use_global: bool,
    /// ANSI colors on the console sink
    pub colors: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            console: true,
            file: false,
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            level: LogLevel::Info,
            format: DEFAULT_FORMAT.to_string(),
            skip: Vec::new(),
            include_ip: false,
            ip_headers: DEFAULT_IP_HEADERS.iter().map(|h| h.to_string()).collect(),
            use_global: false,
            colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Enable the file sink at `path`.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = true;
        self.file_path = path.into();
        self
    }

    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn format(mut self, template: impl Into<String>) -> Self {
        self.format = template.into();
        self
    }

    #[must_use]
    pub fn skip<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip = paths.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn include_ip(mut self, enabled: bool) -> Self {
        self.include_ip = enabled;
        self
    }

    #[must_use]
    pub fn ip_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ip_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn use_global(mut self, enabled: bool) -> Self {
        self.use_global = enabled;
        self
    }

    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

//! Template-based rendering of log entries
//!
//! A template is plain text with `{name}` placeholders. Templates are parsed
//! once into segments; every occurrence of a recognized placeholder is
//! substituted and anything else in braces is kept verbatim.

use super::error;
use super::log_entry::{LogEntry, DEFAULT_PATH};
use super::timestamp::TimestampFormat;
use std::fmt::Write;

/// Template used when none (or an empty one) is configured.
pub const DEFAULT_FORMAT: &str =
    "[{timestamp}] {level} [{method}] {path} - {statusCode} {duration}ms{ip} {message}";

const LEVEL_WIDTH: usize = 5;
const HTTP_METHOD_WIDTH: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Timestamp,
    Level,
    Method,
    Path,
    StatusCode,
    Duration,
    Message,
    Ip,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "timestamp" => Some(Placeholder::Timestamp),
            "level" => Some(Placeholder::Level),
            "method" => Some(Placeholder::Method),
            "path" => Some(Placeholder::Path),
            "statusCode" => Some(Placeholder::StatusCode),
            "duration" => Some(Placeholder::Duration),
            "message" => Some(Placeholder::Message),
            "ip" => Some(Placeholder::Ip),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// A parsed output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let field = after
                .find('}')
                .and_then(|close| Placeholder::from_name(&after[..close]).map(|p| (close, p)));

            match field {
                Some((close, placeholder)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(placeholder));
                    rest = &after[close + 1..];
                }
                None => {
                    literal.push('{');
                    rest = after;
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::parse(DEFAULT_FORMAT)
    }
}

/// Renders a [`LogEntry`] into exactly one line of text.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    template: Template,
    include_ip: bool,
    timestamp_format: TimestampFormat,
}

impl Formatter {
    /// An empty template selects [`DEFAULT_FORMAT`].
    pub fn new(template: &str) -> Self {
        let template = if template.trim().is_empty() {
            Template::default()
        } else {
            Template::parse(template)
        };
        Self {
            template,
            include_ip: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    #[must_use]
    pub fn with_include_ip(mut self, include_ip: bool) -> Self {
        self.include_ip = include_ip;
        self
    }

    /// An invalid custom pattern is reported and replaced by the default.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = match format.validate() {
            Ok(()) => format,
            Err(e) => {
                error::report(&e);
                TimestampFormat::default()
            }
        };
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Render `entry`; the result has no line terminator and no surrounding whitespace.
    pub fn format(&self, entry: &LogEntry) -> String {
        let mut line = String::with_capacity(self.template.source.len() + 64);
        for segment in &self.template.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Field(placeholder) => self.render(*placeholder, entry, &mut line),
            }
        }
        line.trim().to_string()
    }

    fn render(&self, placeholder: Placeholder, entry: &LogEntry, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = match placeholder {
            Placeholder::Timestamp => {
                out.push_str(&self.timestamp_format.format(&entry.timestamp));
                Ok(())
            }
            Placeholder::Level => write!(out, "{:<width$}", entry.level.to_str(), width = LEVEL_WIDTH),
            Placeholder::Method => {
                let method = entry.method.to_uppercase();
                if entry.is_http() {
                    write!(out, "{:<width$}", method, width = HTTP_METHOD_WIDTH)
                } else {
                    out.push_str(&method);
                    Ok(())
                }
            }
            Placeholder::Path => {
                out.push_str(if entry.path.is_empty() { DEFAULT_PATH } else { &entry.path });
                Ok(())
            }
            Placeholder::StatusCode if entry.status_code != 0 => write!(out, "{}", entry.status_code),
            Placeholder::Duration if entry.duration > 0.0 => write!(out, "{}", entry.duration),
            Placeholder::StatusCode | Placeholder::Duration => Ok(()),
            Placeholder::Message => {
                out.push_str(entry.message.as_deref().unwrap_or(""));
                Ok(())
            }
            Placeholder::Ip => match entry.ip.as_deref() {
                Some(ip) if self.include_ip && !ip.is_empty() => write!(out, " from {}", ip),
                _ => Ok(()),
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, PartialEntry};
    use chrono::{TimeZone, Utc};

    fn http_entry() -> LogEntry {
        LogEntry::normalize(
            LogLevel::Warn,
            PartialEntry::new()
                .timestamp(Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).single().unwrap())
                .method("get")
                .path("/x")
                .status_code(404)
                .duration(12.0)
                .ip("1.2.3.4")
                .http(),
        )
    }

    #[test]
    fn test_default_template_order() {
        let formatter = Formatter::new(DEFAULT_FORMAT).with_include_ip(true);
        let line = formatter.format(&http_entry());

        assert_eq!(
            line,
            "[2025-01-08T10:30:45.000Z] WARN  [GET    ] /x - 404 12ms from 1.2.3.4"
        );
        let positions: Vec<usize> = ["GET", "/x", "404", "12", "from 1.2.3.4"]
            .iter()
            .map(|needle| line.find(needle).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ip_hidden_unless_enabled() {
        let formatter = Formatter::new("{method} {path}{ip}");
        assert_eq!(formatter.format(&http_entry()), "GET     /x");
    }

    #[test]
    fn test_message_entry_skips_method_padding_and_zero_fields() {
        let formatter = Formatter::new("{level}|{method}|{path}|{statusCode}|{duration}|{message}");
        let entry = LogEntry::normalize(LogLevel::Info, "started");
        assert_eq!(formatter.format(&entry), "INFO |LOG|-|||started");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let formatter = Formatter::new("{path} {path}");
        assert_eq!(formatter.format(&http_entry()), "/x /x");
    }

    #[test]
    fn test_unknown_placeholders_are_verbatim() {
        let formatter = Formatter::new("{host} {{path}} {statusCode");
        assert_eq!(formatter.format(&http_entry()), "{host} {/x} {statusCode");
    }

    #[test]
    fn test_output_is_trimmed() {
        let formatter = Formatter::new("  {message} {ip}  ");
        let entry = LogEntry::normalize(LogLevel::Info, "x");
        assert_eq!(formatter.format(&entry), "x");
    }

    #[test]
    fn test_empty_template_uses_default() {
        let formatter = Formatter::new("");
        assert_eq!(formatter.template().as_str(), DEFAULT_FORMAT);
    }

    #[test]
    fn test_invalid_timestamp_pattern_uses_default() {
        let formatter = Formatter::new("{timestamp} {path}")
            .with_timestamp_format(TimestampFormat::Custom("%Q bad".to_string()));
        assert_eq!(formatter.format(&http_entry()), "2025-01-08T10:30:45.000Z /x");
    }

    #[test]
    fn test_fractional_duration() {
        let formatter = Formatter::new("{duration}");
        let entry = LogEntry::normalize(LogLevel::Info, PartialEntry::new().duration(3.25));
        assert_eq!(formatter.format(&entry), "3.25");
    }
}

//! # HTTP Request Logger
//!
//! A synchronous, line-oriented request/event logger for HTTP servers.
//!
//! ## Features
//!
//! - **Template Formatting**: `{timestamp}`, `{level}`, `{method}`, `{path}`,
//!   `{statusCode}`, `{duration}`, `{message}` and `{ip}` placeholders
//! - **Multiple Sinks**: Console (colored by severity) and append-only file,
//!   each failing independently without reaching the caller
//! - **HTTP Adapter**: One line per request with status-based severity, skip
//!   list and proxy-aware client IP; a `tower` layer with the `tower` feature
//! - **Global Logger**: A process-wide instance reachable from anywhere
//!
//! ```
//! use http_request_logger::prelude::*;
//!
//! let logger = Logger::new(LoggerOptions::new().level(LogLevel::Debug).colors(false));
//! logger.debug("cache miss");
//! logger.info(PartialEntry::new().method("GET").path("/users").status_code(200).duration(3.5));
//! ```

pub mod core;
pub mod global;
pub mod http;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        LogEntry, LogInput, LogLevel, Logger, LoggerBuilder, LoggerOptions, PartialEntry, Sink,
        TimestampFormat,
    };
    pub use crate::global::{get_logger, initialize_logger};
    pub use crate::http::{logger, HttpLogger, RequestLog};
    pub use crate::sinks::{ConsoleSink, FileSink};
}

pub use crate::core::{
    Dispatcher, Formatter, LevelFilter, LogEntry, LogInput, LogLevel, Logger, LoggerBuilder,
    LoggerError, LoggerMetrics, LoggerOptions, PartialEntry, Result, Sink, Template,
    TimestampFormat, DEFAULT_FORMAT,
};
pub use crate::global::{get_logger, initialize_logger, LoggerRegistry};
pub use crate::http::{logger, HttpLogger, RequestLog, RequestState};
pub use crate::sinks::{ConsoleSink, FileSink};

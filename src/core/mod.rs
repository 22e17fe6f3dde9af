//! Core logger types and traits

pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod level_filter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod sink;
pub mod timestamp;

pub use dispatcher::Dispatcher;
pub use error::{LoggerError, Result};
pub use formatter::{Formatter, Template, DEFAULT_FORMAT};
pub use level_filter::LevelFilter;
pub use log_entry::{LogEntry, LogInput, PartialEntry};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use options::{LoggerOptions, DEFAULT_FILE_PATH, DEFAULT_IP_HEADERS};
pub use sink::Sink;
pub use timestamp::TimestampFormat;

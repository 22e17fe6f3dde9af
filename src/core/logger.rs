//! Main logger implementation

use super::{
    dispatcher::Dispatcher,
    error::report,
    formatter::Formatter,
    level_filter::LevelFilter,
    log_entry::{LogEntry, LogInput},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    options::LoggerOptions,
    sink::Sink,
};
use crate::sinks::{ConsoleSink, FileSink};

/// Synchronous logger: filter, normalize, format, dispatch.
///
/// Options are fixed at construction. No method returns an error or panics
/// because of a sink; failures go to stderr and [`LoggerMetrics`].
///
/// # Example
///
/// ```
/// use http_request_logger::{Logger, LoggerOptions, LogLevel, PartialEntry};
///
/// let logger = Logger::new(LoggerOptions::new().level(LogLevel::Debug).colors(false));
/// logger.info("server started");
/// logger.warn(PartialEntry::new().method("GET").path("/slow").status_code(200).duration(950.0));
/// ```
pub struct Logger {
    options: LoggerOptions,
    filter: LevelFilter,
    formatter: Formatter,
    dispatcher: Dispatcher,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Build a logger with the sinks enabled in `options`.
    #[must_use]
    pub fn new(options: LoggerOptions) -> Self {
        LoggerBuilder::new().options(options).build()
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The filter sees `level`; an explicit level on a [`PartialEntry`](super::PartialEntry)
    /// then decides the printed level and console color.
    pub fn log(&self, level: LogLevel, input: impl Into<LogInput>) {
        if !self.filter.allows(level) {
            self.metrics.record_filtered();
            return;
        }

        let entry = LogEntry::normalize(level, input);
        let line = self.formatter.format(&entry);
        self.dispatcher.dispatch(entry.level, &line, &self.metrics);
    }

    #[inline]
    pub fn debug(&self, input: impl Into<LogInput>) {
        self.log(LogLevel::Debug, input);
    }

    #[inline]
    pub fn info(&self, input: impl Into<LogInput>) {
        self.log(LogLevel::Info, input);
    }

    #[inline]
    pub fn warn(&self, input: impl Into<LogInput>) {
        self.log(LogLevel::Warn, input);
    }

    #[inline]
    pub fn error(&self, input: impl Into<LogInput>) {
        self.log(LogLevel::Error, input);
    }

    pub fn flush(&self) {
        self.dispatcher.flush();
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    pub fn min_level(&self) -> LogLevel {
        self.filter.min_level()
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.dispatcher.sink_names()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LoggerOptions::default())
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("options", &self.options)
            .field("sinks", &self.dispatcher.sink_names())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Sinks derived from the options come first (console, then file), followed
/// by any added with [`LoggerBuilder::sink`].
///
/// # Example
/// ```
/// use http_request_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .options(LoggerOptions::new().console(false))
///     .sink(ConsoleSink::with_colors(false))
///     .build();
/// assert_eq!(logger.sink_names(), vec!["console"]);
/// ```
pub struct LoggerBuilder {
    options: LoggerOptions,
    sinks: Vec<Box<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            options: LoggerOptions::default(),
            sinks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a sink after the option-derived ones
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Build the Logger
    ///
    /// With the file sink enabled, the log directory is created here, once.
    /// A failure is reported and the logger is still returned.
    pub fn build(self) -> Logger {
        let options = self.options;
        let mut dispatcher = Dispatcher::default();

        if options.console {
            dispatcher.push(Box::new(ConsoleSink::with_colors(options.colors)));
        }
        if options.file {
            if let Err(e) = FileSink::ensure_directory(&options.file_path) {
                report(&e);
            }
            dispatcher.push(Box::new(FileSink::new(options.file_path.clone())));
        }
        for sink in self.sinks {
            dispatcher.push(sink);
        }

        let formatter = Formatter::new(&options.format)
            .with_include_ip(options.include_ip)
            .with_timestamp_format(options.timestamp_format.clone());

        Logger {
            filter: LevelFilter::new(options.level),
            formatter,
            dispatcher,
            metrics: LoggerMetrics::new(),
            options,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

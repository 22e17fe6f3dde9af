//! Fan-out of formatted lines to every enabled sink

use super::{
    error::{report, LoggerError},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::Sink,
};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Ordered set of sinks, each attempted independently.
///
/// A sink that errors or panics is reported on stderr and counted; the
/// remaining sinks still receive the line.
#[derive(Default)]
pub struct Dispatcher {
    sinks: Vec<Box<dyn Sink>>,
}

impl Dispatcher {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Box<dyn Sink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Write `line` to every sink. Returns `true` when all sinks succeeded.
    pub fn dispatch(&self, level: LogLevel, line: &str, metrics: &LoggerMetrics) -> bool {
        let mut has_error = false;

        for sink in &self.sinks {
            let result = catch_unwind(AssertUnwindSafe(|| sink.write(level, line)));
            if let Some(error) = Self::failure(sink.as_ref(), result) {
                report(&error);
                metrics.record_sink_failure();
                has_error = true;
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }
        !has_error
    }

    /// Flush every sink, reporting failures instead of returning them.
    pub fn flush(&self) {
        for sink in &self.sinks {
            let result = catch_unwind(AssertUnwindSafe(|| sink.flush()));
            if let Some(error) = Self::failure(sink.as_ref(), result) {
                report(&error);
            }
        }
    }

    fn failure(
        sink: &dyn Sink,
        result: std::result::Result<super::error::Result<()>, Box<dyn Any + Send>>,
    ) -> Option<LoggerError> {
        match result {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e),
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                Some(LoggerError::sink_panicked(sink.name(), panic_msg))
            }
        }
    }
}

//! Error types for the logger system
//!
//! Errors here never cross the public logging API: sinks return them, the
//! dispatcher absorbs them and reports them on the diagnostic channel (stderr).

use std::path::Path;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Append to the log file failed
    #[error("File sink error for '{path}': {source}")]
    FileSink {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Log directory could not be created
    #[error("Failed to create log directory '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A sink panicked while writing
    #[error("Sink '{sink}' panicked: {message}")]
    SinkPanicked { sink: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn file_sink(path: &Path, source: std::io::Error) -> Self {
        LoggerError::FileSink {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn create_directory(path: &Path, source: std::io::Error) -> Self {
        LoggerError::CreateDirectory {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn sink_panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkPanicked {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// Write a logger malfunction to stderr.
///
/// This is the only place the crate reports its own failures; it must not panic.
pub fn report(error: &LoggerError) {
    use std::io::Write;

    let severity = match error {
        LoggerError::SinkPanicked { .. } => "CRITICAL",
        _ => "ERROR",
    };
    let _ = writeln!(std::io::stderr().lock(), "[LOGGER {}] {}", severity, error);
}

//! Sink trait for log output destinations

use super::{error::Result, log_level::LogLevel};

/// A destination for formatted lines.
///
/// Sinks are shared across concurrently handled requests, so `write` takes
/// `&self`; implementations needing state use interior mutability.
pub trait Sink: Send + Sync {
    /// Write one formatted line. `level` is passed for presentation (e.g. colors).
    fn write(&self, level: LogLevel, line: &str) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

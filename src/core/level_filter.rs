//! Severity gate evaluated before any formatting or I/O

use super::log_level::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelFilter {
    min_level: LogLevel,
}

impl LevelFilter {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// An entry passes iff its severity is at least the configured minimum.
    #[inline]
    pub fn allows(&self, level: LogLevel) -> bool {
        level.ordinal() >= self.min_level.ordinal()
    }
}

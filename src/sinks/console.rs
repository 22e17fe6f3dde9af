//! Console sink implementation

use crate::core::{LogLevel, LoggerError, Result, Sink};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes each line to standard output, optionally colored by severity.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Apply the level's color; without the `console` feature the line is returned as is.
    pub fn paint(&self, level: LogLevel, line: &str) -> String {
        #[cfg(feature = "console")]
        if self.use_colors {
            return line.color(level.color_code()).to_string();
        }
        #[cfg(not(feature = "console"))]
        let _ = level;

        line.to_string()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, level: LogLevel, line: &str) -> Result<()> {
        let output = self.paint(level, line);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", output)
            .map_err(|e| LoggerError::io_operation("writing to stdout", "console write failed", e))
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

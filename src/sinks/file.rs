//! File sink implementation

use crate::core::{LogLevel, LoggerError, Result, Sink};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends each line, newline-terminated, to a file.
///
/// The file is opened in append mode for every write and the line goes out in
/// a single `write_all`, so concurrent writers never interleave within a line.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create the parent directory of `path` (recursively) if it is missing.
    pub fn ensure_directory(path: &Path) -> Result<()> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => std::fs::create_dir_all(dir)
                .map_err(|e| LoggerError::create_directory(dir, e)),
            _ => Ok(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, _level: LogLevel, line: &str) -> Result<()> {
        let mut record = String::with_capacity(line.len() + 1);
        record.push_str(line);
        record.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LoggerError::file_sink(&self.path, e))?;
        file.write_all(record.as_bytes())
            .map_err(|e| LoggerError::file_sink(&self.path, e))
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_lines() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("app.log");
        let sink = FileSink::new(&path);

        sink.write(LogLevel::Info, "first").unwrap();
        sink.write(LogLevel::Error, "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_ensure_directory_is_recursive() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("a").join("b").join("app.log");

        FileSink::ensure_directory(&path).unwrap();
        assert!(temp_dir.path().join("a").join("b").is_dir());
        // second call is a no-op
        FileSink::ensure_directory(&path).unwrap();
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let sink = FileSink::new(temp_dir.path().join("missing").join("app.log"));

        let err = sink.write(LogLevel::Info, "lost").unwrap_err();
        assert!(matches!(err, LoggerError::FileSink { .. }));
    }
}

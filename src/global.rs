//! Process-wide logger registry
//!
//! Application code anywhere can log through [`get_logger`] or the free
//! functions [`debug`], [`info`], [`warn`] and [`error`] without threading a
//! logger through call sites. The registry is also an ordinary value
//! ([`LoggerRegistry`]) so tests and embedding code can hold their own.
//!
//! ```
//! use http_request_logger::{global, LoggerOptions, LogLevel};
//!
//! global::initialize_logger(LoggerOptions::new().level(LogLevel::Debug).colors(false));
//! global::debug("cache warmed");
//! ```

use crate::core::{LogInput, Logger, LoggerOptions};
use parking_lot::{const_rwlock, RwLock};
use std::sync::Arc;

/// Holds zero or one logger; installing replaces the previous one outright.
pub struct LoggerRegistry {
    current: RwLock<Option<Arc<Logger>>>,
}

impl LoggerRegistry {
    pub const fn new() -> Self {
        Self {
            current: const_rwlock(None),
        }
    }

    /// Build a logger from `options` and install it.
    pub fn initialize(&self, options: LoggerOptions) -> Arc<Logger> {
        let logger = Arc::new(Logger::new(options));
        self.install(Arc::clone(&logger));
        logger
    }

    /// Install `logger`, returning the one it replaces.
    pub fn install(&self, logger: Arc<Logger>) -> Option<Arc<Logger>> {
        self.current.write().replace(logger)
    }

    /// The installed logger, created with default options on first use.
    pub fn get(&self) -> Arc<Logger> {
        if let Some(logger) = self.current.read().as_ref() {
            return Arc::clone(logger);
        }

        let mut slot = self.current.write();
        Arc::clone(slot.get_or_insert_with(|| Arc::new(Logger::default())))
    }

    pub fn is_initialized(&self) -> bool {
        self.current.read().is_some()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: LoggerRegistry = LoggerRegistry::new();

pub fn registry() -> &'static LoggerRegistry {
    &GLOBAL
}

/// Replace the process-wide logger with one built from `options`.
pub fn initialize_logger(options: LoggerOptions) -> Arc<Logger> {
    GLOBAL.initialize(options)
}

pub fn get_logger() -> Arc<Logger> {
    GLOBAL.get()
}

pub fn debug(input: impl Into<LogInput>) {
    get_logger().debug(input);
}

pub fn info(input: impl Into<LogInput>) {
    get_logger().info(input);
}

pub fn warn(input: impl Into<LogInput>) {
    get_logger().warn(input);
}

pub fn error(input: impl Into<LogInput>) {
    get_logger().error(input);
}

//! Per-request lifecycle tracking
//!
//! A [`RequestLog`] is created when a request is dispatched and moves from
//! `Started` to exactly one terminal state. Only the first terminal hook emits
//! a line; later hooks for the same request are no-ops.

use super::HttpLogger;
use crate::core::{LogLevel, PartialEntry};
use http::StatusCode;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// Lower bound reported for failed requests so they never read as unmeasured.
const MIN_ERROR_DURATION_MS: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Started,
    Completed,
    Errored,
}

impl RequestState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => RequestState::Completed,
            2 => RequestState::Errored,
            _ => RequestState::Started,
        }
    }
}

pub struct RequestLog {
    http: HttpLogger,
    method: String,
    path: String,
    ip: Option<String>,
    started: Instant,
    state: AtomicU8,
}

impl RequestLog {
    pub(crate) fn new(http: HttpLogger, method: String, path: String, ip: Option<String>) -> Self {
        Self {
            http,
            method,
            path,
            ip,
            started: Instant::now(),
            state: AtomicU8::new(RequestState::Started as u8),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn client_ip(&self) -> Option<&str> {
        self.ip.as_deref()
    }

    pub fn state(&self) -> RequestState {
        RequestState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Milliseconds since the request started, rounded to two decimals.
    pub fn elapsed_ms(&self) -> f64 {
        (self.started.elapsed().as_secs_f64() * 100_000.0).round() / 100.0
    }

    /// Terminal hook for a finalized response.
    ///
    /// Call only once the response status can no longer change; `None` means
    /// the handler never set one and reads as 200. Skipped paths produce no
    /// line. Returns whether a line was emitted.
    pub fn complete(&self, status: Option<StatusCode>) -> bool {
        if !self.finish(RequestState::Completed) {
            return false;
        }
        if self.http.is_skipped(&self.path) {
            return false;
        }

        let status = status.unwrap_or(StatusCode::OK).as_u16();
        let level = if status >= 400 {
            LogLevel::Warn
        } else {
            LogLevel::Info
        };
        let message = format!("{} {}", self.method, self.path);
        self.emit(level, status, self.elapsed_ms(), message);
        true
    }

    /// Terminal hook for a failed request.
    ///
    /// `status` is whatever the response currently holds, defaulting to 500.
    /// The skip list does not apply. Returns whether a line was emitted.
    pub fn fail(&self, status: Option<StatusCode>, error: &dyn fmt::Display) -> bool {
        if !self.finish(RequestState::Errored) {
            return false;
        }

        let duration = match self.elapsed_ms() {
            d if d > 0.0 => d,
            _ => MIN_ERROR_DURATION_MS,
        };
        let status = status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR).as_u16();
        self.emit(LogLevel::Error, status, duration, error.to_string());
        true
    }

    fn finish(&self, terminal: RequestState) -> bool {
        self.state
            .compare_exchange(
                RequestState::Started as u8,
                terminal as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    fn emit(&self, level: LogLevel, status: u16, duration: f64, message: String) {
        let mut entry = PartialEntry::new()
            .method(self.method.as_str())
            .path(self.path.as_str())
            .status_code(status)
            .duration(duration)
            .message(message)
            .http();
        if let Some(ip) = &self.ip {
            entry = entry.ip(ip.as_str());
        }
        self.http.logger().log(level, entry);
    }
}

impl fmt::Debug for RequestLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLog")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("ip", &self.ip)
            .field("state", &self.state())
            .finish()
    }
}

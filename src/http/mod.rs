//! HTTP request instrumentation
//!
//! [`HttpLogger`] turns a request lifecycle into log lines: call
//! [`HttpLogger::start`] when the request is dispatched, then exactly one of
//! [`RequestLog::complete`] (response finalized) or [`RequestLog::fail`]
//! (handler error). With the `tower` feature, `HttpLogger` is also a
//! `tower::Layer` that does this for any `http` based service.
//!
//! ```
//! use http::{HeaderMap, Method, StatusCode, Uri};
//! use http_request_logger::{logger, LoggerOptions};
//!
//! let http_logger = logger(LoggerOptions::new().colors(false).skip(["/health"]));
//!
//! let uri: Uri = "/users/42?full=1".parse().unwrap();
//! let request = http_logger.start(&Method::GET, &uri, &HeaderMap::new());
//! assert_eq!(request.path(), "/users/42");
//! assert!(request.complete(Some(StatusCode::OK)));
//! ```

pub mod client_ip;
#[cfg(feature = "tower")]
pub mod middleware;
pub mod request_log;

pub use client_ip::{parse_ip_headers, resolve_client_ip};
#[cfg(feature = "tower")]
pub use middleware::HttpLoggerService;
pub use request_log::{RequestLog, RequestState};

use crate::core::{Logger, LoggerOptions};
use crate::global;
use http::header::{HeaderMap, HeaderName};
use http::{Method, Uri};
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;

/// Build the HTTP adapter for `options`.
pub fn logger(options: LoggerOptions) -> HttpLogger {
    HttpLogger::new(options)
}

/// Cheap to clone; clones share the same logger and settings.
#[derive(Clone)]
pub struct HttpLogger {
    shared: Arc<Shared>,
}

struct Shared {
    logger: Arc<Logger>,
    skip: HashSet<String>,
    ip_headers: Vec<HeaderName>,
    include_ip: bool,
}

impl HttpLogger {
    /// With `use_global`, the process-wide logger is (re)initialized from
    /// `options` and shared; otherwise the adapter owns a dedicated logger and
    /// the global one is left untouched.
    pub fn new(options: LoggerOptions) -> Self {
        let logger = if options.use_global {
            global::initialize_logger(options.clone())
        } else {
            Arc::new(Logger::new(options.clone()))
        };
        Self::with_logger(logger, &options)
    }

    /// Use an existing logger; only the adapter settings of `options`
    /// (`skip`, `include_ip`, `ip_headers`) are read.
    pub fn with_logger(logger: Arc<Logger>, options: &LoggerOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                logger,
                skip: options.skip.iter().cloned().collect(),
                ip_headers: parse_ip_headers(&options.ip_headers),
                include_ip: options.include_ip,
            }),
        }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.shared.logger
    }

    pub fn is_skipped(&self, path: &str) -> bool {
        self.shared.skip.contains(path)
    }

    /// Begin tracking a request. Only the path of `uri` is logged.
    pub fn start(&self, method: &Method, uri: &Uri, headers: &HeaderMap) -> RequestLog {
        self.start_with_peer(method, uri, headers, None)
    }

    /// Like [`HttpLogger::start`], with the connection's peer address as the
    /// client-IP fallback.
    pub fn start_with_peer(
        &self,
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        peer: Option<IpAddr>,
    ) -> RequestLog {
        let ip = if self.shared.include_ip {
            resolve_client_ip(headers, &self.shared.ip_headers, peer)
        } else {
            None
        };
        RequestLog::new(
            self.clone(),
            method.as_str().to_string(),
            uri.path().to_string(),
            ip,
        )
    }
}

impl std::fmt::Debug for HttpLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLogger")
            .field("logger", &self.shared.logger)
            .field("skip", &self.shared.skip)
            .field("ip_headers", &self.shared.ip_headers)
            .field("include_ip", &self.shared.include_ip)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Result, Sink};
    use http::{HeaderValue, StatusCode};
    use parking_lot::Mutex;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(LogLevel, String)>>>);

    impl Sink for Capture {
        fn write(&self, level: LogLevel, line: &str) -> Result<()> {
            self.0.lock().push((level, line.to_string()));
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    fn adapter(options: LoggerOptions) -> (HttpLogger, Capture) {
        let capture = Capture::default();
        let logger = Logger::builder()
            .options(options.clone().console(false))
            .sink(capture.clone())
            .build();
        (HttpLogger::with_logger(Arc::new(logger), &options), capture)
    }

    #[test]
    fn test_completion_logs_once_at_info() {
        let (http, capture) = adapter(LoggerOptions::new().format("{method}|{path}|{statusCode}|{message}"));
        let uri: Uri = "/items?page=2".parse().unwrap();
        let request = http.start(&Method::GET, &uri, &HeaderMap::new());

        assert!(request.complete(None));
        assert!(!request.complete(Some(StatusCode::OK)));

        let lines = capture.0.lock();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], (LogLevel::Info, "GET    |/items|200|GET /items".to_string()));
        assert_eq!(request.state(), RequestState::Completed);
    }

    #[test]
    fn test_client_error_logs_at_warn() {
        let (http, capture) = adapter(LoggerOptions::new().format("{statusCode}"));
        let uri: Uri = "/missing".parse().unwrap();
        http.start(&Method::GET, &uri, &HeaderMap::new())
            .complete(Some(StatusCode::NOT_FOUND));

        assert_eq!(capture.0.lock()[0], (LogLevel::Warn, "404".to_string()));
    }

    #[test]
    fn test_error_suppresses_completion() {
        let (http, capture) = adapter(LoggerOptions::new().format("{statusCode} {message}"));
        let uri: Uri = "/boom".parse().unwrap();
        let request = http.start(&Method::POST, &uri, &HeaderMap::new());

        assert!(request.fail(None, &"database unavailable"));
        assert!(!request.complete(Some(StatusCode::INTERNAL_SERVER_ERROR)));

        let lines = capture.0.lock();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], (LogLevel::Error, "500 database unavailable".to_string()));
        assert_eq!(request.state(), RequestState::Errored);
    }

    #[test]
    fn test_error_duration_is_never_zero() {
        let (http, capture) = adapter(LoggerOptions::new().format("{duration}"));
        let uri: Uri = "/boom".parse().unwrap();
        http.start(&Method::GET, &uri, &HeaderMap::new())
            .fail(Some(StatusCode::BAD_GATEWAY), &"upstream");

        let duration: f64 = capture.0.lock()[0].1.parse().unwrap();
        assert!(duration > 0.0);
    }

    #[test]
    fn test_skip_applies_to_completion_only() {
        let (http, capture) = adapter(LoggerOptions::new().skip(["/health"]).format("{path}"));
        let uri: Uri = "/health".parse().unwrap();

        assert!(!http.start(&Method::GET, &uri, &HeaderMap::new()).complete(None));
        assert!(capture.0.lock().is_empty());

        assert!(http.start(&Method::GET, &uri, &HeaderMap::new()).fail(None, &"probe failed"));
        assert_eq!(capture.0.lock().len(), 1);
        assert_eq!(capture.0.lock()[0].0, LogLevel::Error);
    }

    #[test]
    fn test_ip_captured_only_when_enabled() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("192.0.2.100, 10.0.0.1"));
        let uri: Uri = "/".parse().unwrap();

        let (http, capture) = adapter(LoggerOptions::new().include_ip(true).format("{path}{ip}"));
        let request = http.start(&Method::GET, &uri, &headers);
        assert_eq!(request.client_ip(), Some("192.0.2.100"));
        request.complete(None);
        assert_eq!(capture.0.lock()[0].1, "/ from 192.0.2.100");

        let (http, _) = adapter(LoggerOptions::new());
        assert_eq!(http.start(&Method::GET, &uri, &headers).client_ip(), None);
    }
}

//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Concurrent appends to one file never interleave within a line
//! - Each thread's lines reach the file in the order it issued them
//! - Concurrent in-flight requests each log exactly once

use http::{HeaderMap, Method, StatusCode, Uri};
use http_request_logger::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

#[test]
fn test_concurrent_file_appends_stay_line_atomic() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("logs").join("stress.log");

    let logger = Arc::new(Logger::new(
        LoggerOptions::new()
            .console(false)
            .file(&log_file)
            .format("{path} {message}"),
    ));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(
                        PartialEntry::new()
                            .path(format!("/worker/{}", t))
                            .message(format!("{} {}", i, "x".repeat(64))),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let mut next_expected: HashMap<String, usize> = HashMap::new();
    for line in lines {
        let mut parts = line.splitn(3, ' ');
        let path = parts.next().unwrap().to_string();
        let seq: usize = parts.next().unwrap().parse().expect("corrupted line");
        let padding = parts.next().unwrap();
        assert_eq!(padding.len(), 64, "corrupted line: {line}");

        let expected = next_expected.entry(path).or_insert(0);
        assert_eq!(seq, *expected, "per-thread order broken");
        *expected += 1;
    }
    assert_eq!(logger.metrics().total_logged(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_concurrent_requests_log_exactly_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("requests.log");
    let http_logger = logger(
        LoggerOptions::new()
            .console(false)
            .file(&log_file)
            .format("{path} {statusCode}"),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let http_logger = http_logger.clone();
            thread::spawn(move || {
                let uri: Uri = format!("/req/{}", t).parse().unwrap();
                let request = Arc::new(http_logger.start(&Method::GET, &uri, &HeaderMap::new()));

                // completion and error hooks racing on the same request
                let racer = Arc::clone(&request);
                let error_hook = thread::spawn(move || racer.fail(None, &"timeout"));
                let completed = request.complete(Some(StatusCode::OK));
                let errored = error_hook.join().unwrap();
                assert!(completed ^ errored);
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let mut paths: Vec<&str> = content
        .lines()
        .map(|line| line.split(' ').next().unwrap())
        .collect();
    paths.sort_unstable();
    paths.dedup();
    assert_eq!(content.lines().count(), THREADS);
    assert_eq!(paths.len(), THREADS);
}

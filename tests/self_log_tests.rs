//! Tests for internal diagnostics routing
//!
//! The self-log handler is process-wide, so these tests live in their own
//! binary and run one at a time behind a lock.

use parking_lot::Mutex;
use rust_structured_logger::core::{self_log, LogEvent};
use rust_structured_logger::prelude::*;
use std::sync::Arc;

static SERIAL: Mutex<()> = parking_lot::const_mutex(());

struct Refuses;

impl Sink for Refuses {
    fn emit(&self, _event: &LogEvent) -> Result<()> {
        Err(LoggerError::sink("refuses", "quota exceeded"))
    }

    fn name(&self) -> &str {
        "refuses"
    }
}

fn capture_self_log() -> Arc<Mutex<Vec<String>>> {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    self_log::enable(Arc::new(move |line: &str| sink.lock().push(line.to_string())));
    lines
}

#[test]
fn test_sink_failure_is_reported() {
    let _serial = SERIAL.lock();
    let lines = capture_self_log();

    let logger = Logger::builder().sink(Refuses).build();
    logger.information("lost", &[]).unwrap();
    self_log::disable();

    let lines = lines.lock();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[LOGGER ERROR]"));
    assert!(lines[0].contains("refuses"));
    assert!(lines[0].contains("quota exceeded"));
}

#[test]
fn test_handler_that_logs_again_does_not_recurse() {
    let _serial = SERIAL.lock();
    let logger = Arc::new(Logger::builder().sink(Refuses).build());
    let seen = Arc::new(Mutex::new(0usize));

    let inner_logger = Arc::clone(&logger);
    let counter = Arc::clone(&seen);
    self_log::enable(Arc::new(move |_line: &str| {
        *counter.lock() += 1;
        // fails again; the nested report goes to stderr
        let _ = inner_logger.information("self log fired", &[]);
    }));

    logger.information("first", &[]).unwrap();
    self_log::disable();

    assert_eq!(*seen.lock(), 1);
}

#[test]
fn test_disabled_handler_receives_nothing() {
    let _serial = SERIAL.lock();
    let lines = capture_self_log();
    self_log::disable();

    let logger = Logger::builder().sink(Refuses).build();
    logger.information("to stderr", &[]).unwrap();

    assert!(lines.lock().is_empty());
}

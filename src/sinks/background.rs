//! Background delivery for slow sinks
//!
//! [`BackgroundSink`] moves a wrapped sink onto its own worker thread fed by a
//! bounded queue. The logging thread only pays for an enqueue; what happens
//! when the queue is full is decided by the [`OverflowPolicy`].

use crate::core::{self_log, LogEvent, LoggerError, Result, Sink};
use crossbeam_channel::{
    bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender, TrySendError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long dropping a `BackgroundSink` waits for the queue to drain
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Policy for handling a full queue
///
/// # Example
///
/// ```
/// use rust_structured_logger::sinks::OverflowPolicy;
/// use std::time::Duration;
///
/// let policy = OverflowPolicy::default();
/// assert_eq!(policy, OverflowPolicy::DropNewest);
///
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Discard the event being logged
    #[default]
    DropNewest,

    /// Wait until the worker makes room. Applies backpressure to callers.
    Block,

    /// Wait up to the given duration, then discard
    BlockWithTimeout(Duration),
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
        }
    }
}

enum Message {
    Event(Box<LogEvent>),
    Flush(Sender<Result<()>>),
}

/// Delivers events to the wrapped sink on a dedicated worker thread.
///
/// Errors and panics raised by the wrapped sink on the worker are reported
/// through `self_log`; they cannot reach the logging call that produced the
/// event. Dropping the sink closes the queue and waits up to
/// [`DEFAULT_SHUTDOWN_TIMEOUT`] for pending events to be written.
///
/// # Example
///
/// ```
/// use rust_structured_logger::prelude::*;
///
/// let memory = InMemorySink::new();
/// let background = BackgroundSink::new(memory.clone(), 1024).unwrap();
/// let logger = Logger::builder().sink(background).build();
///
/// logger.information("Queued {Count}", &[&1]).unwrap();
/// drop(logger);
/// assert_eq!(memory.len(), 1);
/// ```
pub struct BackgroundSink {
    sender: Option<Sender<Message>>,
    worker: Option<JoinHandle<()>>,
    policy: OverflowPolicy,
    dropped: AtomicU64,
    worker_failures: Arc<AtomicU64>,
    name: String,
}

impl BackgroundSink {
    /// Wrap `sink` with a queue of `capacity` events and the default policy
    pub fn new<S: Sink + 'static>(sink: S, capacity: usize) -> Result<Self> {
        Self::with_policy(sink, capacity, OverflowPolicy::default())
    }

    pub fn with_policy<S: Sink + 'static>(
        sink: S,
        capacity: usize,
        policy: OverflowPolicy,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(LoggerError::config(
                "BackgroundSink",
                "queue capacity must be at least 1",
            ));
        }

        let name = format!("background({})", sink.name());
        let (sender, receiver) = bounded(capacity);
        let worker_failures = Arc::new(AtomicU64::new(0));
        let failures = Arc::clone(&worker_failures);

        let worker = thread::Builder::new()
            .name("log-background-sink".to_string())
            .spawn(move || run_worker(sink, receiver, failures))
            .map_err(|e| LoggerError::io_operation("spawning background worker", name.clone(), e))?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            policy,
            dropped: AtomicU64::new(0),
            worker_failures,
            name,
        })
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Events discarded because the queue was full
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Errors and panics raised by the wrapped sink on the worker thread
    pub fn worker_failures(&self) -> u64 {
        self.worker_failures.load(Ordering::Relaxed)
    }

    /// Events waiting in the queue
    pub fn pending(&self) -> usize {
        self.sender.as_ref().map_or(0, Sender::len)
    }

    /// Close the queue and wait for the worker to finish.
    ///
    /// Returns `true` if every queued event was handed to the wrapped sink
    /// within `timeout`. Later `emit` calls fail.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());

        let Some(handle) = self.worker.take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if handle.join().is_err() {
                    self_log::write_line(&format!(
                        "[LOGGER ERROR] {} worker thread panicked during shutdown",
                        self.name
                    ));
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                self_log::write_line(&format!(
                    "[LOGGER WARNING] {} worker did not finish within {:?}. \
                     Some events may be lost.",
                    self.name, timeout
                ));
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }

    fn record_dropped(&self) {
        let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
        // first drop, then every thousandth
        if dropped == 1 || dropped % 1000 == 0 {
            self_log::write_line(&format!(
                "[LOGGER WARNING] {} queue full, {} events dropped. \
                 Consider increasing capacity or using a different overflow policy.",
                self.name, dropped
            ));
        }
    }
}

impl Sink for BackgroundSink {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(LoggerError::ChannelSendError)?;
        let message = Message::Event(Box::new(event.clone()));

        match sender.try_send(message) {
            Ok(()) => Ok(()),
            Err(TrySendError::Disconnected(_)) => Err(LoggerError::ChannelSendError),
            Err(TrySendError::Full(message)) => match self.policy {
                OverflowPolicy::DropNewest => {
                    self.record_dropped();
                    Ok(())
                }
                OverflowPolicy::Block => sender
                    .send(message)
                    .map_err(|_| LoggerError::ChannelSendError),
                OverflowPolicy::BlockWithTimeout(timeout) => {
                    match sender.send_timeout(message, timeout) {
                        Ok(()) => Ok(()),
                        Err(SendTimeoutError::Timeout(_)) => {
                            self.record_dropped();
                            Ok(())
                        }
                        Err(SendTimeoutError::Disconnected(_)) => {
                            Err(LoggerError::ChannelSendError)
                        }
                    }
                }
            },
        }
    }

    /// Wait until everything queued so far has been written, then flush
    /// the wrapped sink
    fn flush(&self) -> Result<()> {
        let Some(sender) = self.sender.as_ref() else {
            return Ok(());
        };
        let (ack, done) = bounded(1);
        sender
            .send_timeout(Message::Flush(ack), DEFAULT_SHUTDOWN_TIMEOUT)
            .map_err(|_| LoggerError::ChannelSendError)?;
        match done.recv_timeout(DEFAULT_SHUTDOWN_TIMEOUT) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                Err(LoggerError::sink(self.name.clone(), "flush timed out"))
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(LoggerError::sink(self.name.clone(), "worker stopped before flushing"))
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for BackgroundSink {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.dropped_count();
        if dropped > 0 {
            self_log::write_line(&format!(
                "[LOGGER WARNING] {} shut down with {} events dropped",
                self.name, dropped
            ));
        }
    }
}

fn run_worker<S: Sink>(sink: S, receiver: Receiver<Message>, failures: Arc<AtomicU64>) {
    // runs until every sender is gone and the queue is empty
    for message in receiver {
        match message {
            Message::Event(event) => {
                let outcome = catch_unwind(AssertUnwindSafe(|| sink.emit(&event)));
                report(&sink, "emit", &outcome, &failures);
            }
            Message::Flush(ack) => {
                let outcome = catch_unwind(AssertUnwindSafe(|| sink.flush()));
                report(&sink, "flush", &outcome, &failures);
                let reply = outcome.unwrap_or_else(|panic_info| {
                    Err(LoggerError::sink(
                        sink.name(),
                        format!(
                            "panicked during flush: {}",
                            self_log::panic_message(panic_info.as_ref())
                        ),
                    ))
                });
                // the caller may have given up waiting
                let _ = ack.send(reply);
            }
        }
    }

    let outcome = catch_unwind(AssertUnwindSafe(|| sink.flush()));
    report(&sink, "flush", &outcome, &failures);
}

fn report<S: Sink>(
    sink: &S,
    operation: &str,
    outcome: &thread::Result<Result<()>>,
    failures: &AtomicU64,
) {
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            failures.fetch_add(1, Ordering::Relaxed);
            self_log::write_line(&format!(
                "[LOGGER ERROR] Background sink ({}) {} failed: {}",
                sink.name(),
                operation,
                e
            ));
        }
        Err(panic_info) => {
            failures.fetch_add(1, Ordering::Relaxed);
            self_log::write_line(&format!(
                "[LOGGER CRITICAL] Background sink ({}) panicked during {}: {}",
                sink.name(),
                operation,
                self_log::panic_message(panic_info.as_ref())
            ));
        }
    }
}

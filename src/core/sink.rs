//! Sink trait, per-sink level gate, and fault-isolating fan-out

use super::{
    error::Result, log_event::LogEvent, metrics::PipelineMetrics, self_log,
    severity_level::SeverityLevel,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// A destination for finished log events.
///
/// `emit` may be called concurrently from several logging threads;
/// implementations guard their own resources.
pub trait Sink: Send + Sync {
    fn emit(&self, event: &LogEvent) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        (**self).emit(event)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        (**self).emit(event)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Passes events at or above `minimum_level` to the wrapped sink and
/// silently drops the rest.
pub struct RestrictedSink {
    inner: Box<dyn Sink>,
    minimum_level: SeverityLevel,
}

impl RestrictedSink {
    pub fn new(inner: Box<dyn Sink>, minimum_level: SeverityLevel) -> Self {
        Self {
            inner,
            minimum_level,
        }
    }

    pub fn minimum_level(&self) -> SeverityLevel {
        self.minimum_level
    }
}

impl Sink for RestrictedSink {
    fn emit(&self, event: &LogEvent) -> Result<()> {
        if !event.level().is_enabled(self.minimum_level) {
            return Ok(());
        }
        self.inner.emit(event)
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Dispatches each event to every owned sink in registration order.
///
/// This is the single point where sink failures are absorbed: an error or
/// panic from one sink is reported to [`self_log`] and counted, and the
/// remaining sinks still receive the event.
pub struct AggregateSink {
    sinks: Vec<Box<dyn Sink>>,
    metrics: Arc<PipelineMetrics>,
}

impl AggregateSink {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        Self::with_metrics(sinks, Arc::new(PipelineMetrics::new()))
    }

    pub fn with_metrics(sinks: Vec<Box<dyn Sink>>, metrics: Arc<PipelineMetrics>) -> Self {
        Self { sinks, metrics }
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver `event` to all sinks. Never fails.
    pub fn emit(&self, event: &LogEvent) {
        for (idx, sink) in self.sinks.iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| sink.emit(event)));
            self.report(idx, sink.as_ref(), "emit", outcome);
        }
    }

    /// Flush all sinks with the same isolation as `emit`.
    pub fn flush(&self) {
        for (idx, sink) in self.sinks.iter().enumerate() {
            let outcome = catch_unwind(AssertUnwindSafe(|| sink.flush()));
            self.report(idx, sink.as_ref(), "flush", outcome);
        }
    }

    fn report(
        &self,
        idx: usize,
        sink: &dyn Sink,
        operation: &str,
        outcome: std::thread::Result<Result<()>>,
    ) {
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.metrics.record_sink_failure();
                self_log::write_line(&format!(
                    "[LOGGER ERROR] Sink #{} ({}) {} failed: {}",
                    idx,
                    sink.name(),
                    operation,
                    e
                ));
            }
            Err(panic_info) => {
                self.metrics.record_sink_failure();
                self_log::write_line(&format!(
                    "[LOGGER CRITICAL] Sink #{} ({}) panicked during {}: {}. \
                     Other sinks continue to function.",
                    idx,
                    sink.name(),
                    operation,
                    self_log::panic_message(panic_info.as_ref())
                ));
            }
        }
    }
}

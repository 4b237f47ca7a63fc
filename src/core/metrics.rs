//! Pipeline metrics for observability
//!
//! Counters for monitoring the health of a `Logger`: how many events were
//! dispatched, filtered out, or hit a failing sink or enricher.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one logging pipeline
///
/// # Example
///
/// ```
/// use rust_structured_logger::PipelineMetrics;
///
/// let metrics = PipelineMetrics::new();
/// metrics.record_emitted();
/// metrics.record_sink_failure();
///
/// assert_eq!(metrics.events_emitted(), 1);
/// assert_eq!(metrics.sink_failures(), 1);
/// ```
#[derive(Debug)]
pub struct PipelineMetrics {
    /// Events handed to the sink set
    events_emitted: AtomicU64,

    /// Calls rejected by the logger's minimum level
    events_filtered: AtomicU64,

    /// Individual sink deliveries that returned an error or panicked
    sink_failures: AtomicU64,

    /// Log calls aborted by a failing enricher
    enricher_failures: AtomicU64,
}

impl PipelineMetrics {
    pub const fn new() -> Self {
        Self {
            events_emitted: AtomicU64::new(0),
            events_filtered: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            enricher_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_filtered(&self) -> u64 {
        self.events_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn enricher_failures(&self) -> u64 {
        self.enricher_failures.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.events_emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.events_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_enricher_failure(&self) -> u64 {
        self.enricher_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.events_emitted.store(0, Ordering::Relaxed);
        self.events_filtered.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.enricher_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PipelineMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            events_emitted: AtomicU64::new(self.events_emitted()),
            events_filtered: AtomicU64::new(self.events_filtered()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            enricher_failures: AtomicU64::new(self.enricher_failures()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = PipelineMetrics::new();
        assert_eq!(metrics.events_emitted(), 0);
        assert_eq!(metrics.events_filtered(), 0);
        assert_eq!(metrics.sink_failures(), 0);
        assert_eq!(metrics.enricher_failures(), 0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = PipelineMetrics::new();
        assert_eq!(metrics.record_filtered(), 0);
        assert_eq!(metrics.record_filtered(), 1);
        assert_eq!(metrics.events_filtered(), 2);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = PipelineMetrics::new();
        metrics.record_emitted();
        metrics.record_sink_failure();
        metrics.record_enricher_failure();

        metrics.reset();

        assert_eq!(metrics.events_emitted(), 0);
        assert_eq!(metrics.sink_failures(), 0);
        assert_eq!(metrics.enricher_failures(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = PipelineMetrics::new();
        metrics.record_emitted();

        let snapshot = metrics.clone();
        metrics.record_emitted();

        assert_eq!(snapshot.events_emitted(), 1);
        assert_eq!(metrics.events_emitted(), 2);
    }
}

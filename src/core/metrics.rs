//! Logger metrics for observability
//!
//! Counters describing what the dispatcher has done so far: entries queued
//! and dispatched, deliveries to sinks, sink failures, expirations and
//! entries dropped by a bounded queue.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use sink_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_enqueued();
/// metrics.record_dispatched();
/// metrics.record_delivery();
///
/// assert_eq!(metrics.entries_enqueued(), 1);
/// assert_eq!(metrics.deliveries(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries accepted into the pending queue
    entries_enqueued: AtomicU64,

    /// Entries taken off the queue by a drain tick
    entries_dispatched: AtomicU64,

    /// Successful `Sink::write` calls
    deliveries: AtomicU64,

    /// `Sink::write` calls that returned an error or panicked
    sink_failures: AtomicU64,

    /// Sinks removed because their expiration passed
    sinks_expired: AtomicU64,

    /// Entries discarded because a bounded queue was full
    entries_dropped: AtomicU64,

    /// Dropped entries that had already been enqueued (`DropOldest` evictions)
    entries_evicted: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            entries_enqueued: AtomicU64::new(0),
            entries_dispatched: AtomicU64::new(0),
            deliveries: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            sinks_expired: AtomicU64::new(0),
            entries_dropped: AtomicU64::new(0),
            entries_evicted: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn entries_enqueued(&self) -> u64 {
        self.entries_enqueued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_dispatched(&self) -> u64 {
        self.entries_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deliveries(&self) -> u64 {
        self.deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sinks_expired(&self) -> u64 {
        self.sinks_expired.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_dropped(&self) -> u64 {
        self.entries_dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn entries_evicted(&self) -> u64 {
        self.entries_evicted.load(Ordering::Relaxed)
    }

    /// Entries handed to the logger, whether or not they were kept
    pub fn entries_emitted(&self) -> u64 {
        let rejected = self.entries_dropped().saturating_sub(self.entries_evicted());
        self.entries_enqueued() + rejected
    }

    /// Record an enqueued entry, returning the previous count
    #[inline]
    pub fn record_enqueued(&self) -> u64 {
        self.entries_enqueued.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.entries_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivery(&self) -> u64 {
        self.deliveries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_expired(&self) -> u64 {
        self.sinks_expired.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.entries_dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Record the eviction of an already enqueued entry; also counts it as dropped
    #[inline]
    pub fn record_evicted(&self) -> u64 {
        self.entries_evicted.fetch_add(1, Ordering::Relaxed);
        self.record_dropped()
    }

    /// Share of emitted entries that were dropped, as a percentage (0.0 - 100.0)
    ///
    /// Evicted entries count once, since they were enqueued first. Returns
    /// 0.0 if nothing has been emitted.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.entries_dropped() as f64;
        let total = self.entries_emitted() as f64;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.entries_enqueued.store(0, Ordering::Relaxed);
        self.entries_dispatched.store(0, Ordering::Relaxed);
        self.deliveries.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.sinks_expired.store(0, Ordering::Relaxed);
        self.entries_dropped.store(0, Ordering::Relaxed);
        self.entries_evicted.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            entries_enqueued: AtomicU64::new(self.entries_enqueued()),
            entries_dispatched: AtomicU64::new(self.entries_dispatched()),
            deliveries: AtomicU64::new(self.deliveries()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            sinks_expired: AtomicU64::new(self.sinks_expired()),
            entries_dropped: AtomicU64::new(self.entries_dropped()),
            entries_evicted: AtomicU64::new(self.entries_evicted()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.entries_enqueued(), 0);
        assert_eq!(metrics.entries_dispatched(), 0);
        assert_eq!(metrics.deliveries(), 0);
        assert_eq!(metrics.sink_failures(), 0);
        assert_eq!(metrics.sinks_expired(), 0);
        assert_eq!(metrics.entries_dropped(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_sink_failure(), 0);
        assert_eq!(metrics.record_sink_failure(), 1);
        assert_eq!(metrics.sink_failures(), 2);
    }

    #[test]
    fn test_drop_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.drop_rate(), 0.0);

        for _ in 0..90 {
            metrics.record_enqueued();
        }
        for _ in 0..10 {
            metrics.record_dropped();
        }

        let rate = metrics.drop_rate();
        assert!((9.9..=10.1).contains(&rate), "Drop rate was {}", rate);
    }

    #[test]
    fn test_drop_rate_counts_evictions_once() {
        let metrics = LoggerMetrics::new();
        for _ in 0..10 {
            metrics.record_enqueued();
        }
        for _ in 0..9 {
            metrics.record_evicted();
        }

        assert_eq!(metrics.entries_dropped(), 9);
        assert_eq!(metrics.entries_emitted(), 10);
        assert!((89.9..=90.1).contains(&metrics.drop_rate()));
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_delivery();
        metrics.record_sink_expired();

        let snapshot = metrics.clone();
        metrics.reset();

        assert_eq!(metrics.deliveries(), 0);
        assert_eq!(metrics.sinks_expired(), 0);
        assert_eq!(snapshot.deliveries(), 1);
        assert_eq!(snapshot.sinks_expired(), 1);
    }
}

//! Service metrics
//!
//! Counters describing what happened to the events handed to a service.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for log service observability
///
/// # Example
///
/// ```
/// use log_service::ServiceMetrics;
///
/// let metrics = ServiceMetrics::new();
/// metrics.record_accepted();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.accepted(), 1);
/// assert_eq!(metrics.filtered(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ServiceMetrics {
    /// Events taken off the channel by the writer
    accepted: AtomicU64,

    /// Events formatted and written to the sink
    written: AtomicU64,

    /// Events dropped for being below the minimum level
    filtered: AtomicU64,

    /// Lines written on the fatal path
    fatal: AtomicU64,
}

impl ServiceMetrics {
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            written: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            fatal: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn fatal(&self) -> u64 {
        self.fatal.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_written(&self) {
        self.written.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_filtered(&self) {
        self.filtered.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_fatal(&self) {
        self.fatal.fetch_add(1, Ordering::Relaxed);
    }

    /// Percentage of accepted events that were dropped by the level filter
    pub fn filter_rate(&self) -> f64 {
        let accepted = self.accepted();
        if accepted == 0 {
            return 0.0;
        }
        (self.filtered() as f64 / accepted as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = ServiceMetrics::new();
        assert_eq!(metrics.accepted(), 0);
        assert_eq!(metrics.written(), 0);
        assert_eq!(metrics.filtered(), 0);
        assert_eq!(metrics.fatal(), 0);
        assert_eq!(metrics.filter_rate(), 0.0);
    }

    #[test]
    fn test_filter_rate() {
        let metrics = ServiceMetrics::new();
        for _ in 0..4 {
            metrics.record_accepted();
        }
        metrics.record_filtered();

        let rate = metrics.filter_rate();
        assert!((24.9..=25.1).contains(&rate), "Filter rate was {}", rate);
    }
}

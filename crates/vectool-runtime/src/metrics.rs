//! Execution metrics for the dispatcher.
//!
//! Lock-free atomic counters, safe to bump from any task. Use
//! [`MetricsSnapshot`] for a copyable view.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Shared call counters collected by [`crate::Dispatcher`].
#[derive(Debug, Default)]
pub struct ExecutionMetrics {
    /// Calls attempted, including unknown tools and invalid arguments.
    pub total_calls: AtomicU64,
    /// Calls that returned a result.
    pub successful_calls: AtomicU64,
    /// Calls that returned an error, timeouts included.
    pub failed_calls: AtomicU64,
    /// Calls cut off at their deadline.
    pub timed_out_calls: AtomicU64,
    /// Calls whose handler panicked.
    pub panicked_calls: AtomicU64,
}

/// A point-in-time snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub total_calls: u64,
    pub successful_calls: u64,
    pub failed_calls: u64,
    pub timed_out_calls: u64,
    pub panicked_calls: u64,
}

impl ExecutionMetrics {
    /// Creates a new zeroed metrics instance wrapped in an [`Arc`].
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_attempt(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successful_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self) {
        self.timed_out_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_panic(&self) {
        self.panicked_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_calls: self.total_calls.load(Ordering::Relaxed),
            successful_calls: self.successful_calls.load(Ordering::Relaxed),
            failed_calls: self.failed_calls.load(Ordering::Relaxed),
            timed_out_calls: self.timed_out_calls.load(Ordering::Relaxed),
            panicked_calls: self.panicked_calls.load(Ordering::Relaxed),
        }
    }
}

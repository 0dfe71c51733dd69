//! Per-call execution context handed to every store operation.

use std::time::{Duration, Instant};

use crate::error::StoreError;

/// Deadline-bearing context for one tool call.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// The tool being executed.
    pub tool: String,
    /// Unique call ID for tracing.
    pub call_id: u64,
    /// Point in time after which the call must stop.
    pub deadline: Instant,
    timeout: Duration,
}

impl CallContext {
    /// Creates a context whose deadline is `timeout` from now.
    pub fn new(tool: impl Into<String>, call_id: u64, timeout: Duration) -> Self {
        Self {
            tool: tool.into(),
            call_id,
            deadline: Instant::now() + timeout,
            timeout,
        }
    }

    /// A context with a generous deadline, for direct store use outside the dispatcher.
    pub fn background() -> Self {
        Self::new("background", 0, Duration::from_secs(3600))
    }

    /// The timeout this context was created with.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time left before the deadline (zero once passed).
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Fails with `DeadlineExceeded` once the deadline has passed.
    ///
    /// Stores call this at the start of every operation.
    pub fn check(&self) -> Result<(), StoreError> {
        if self.is_expired() {
            Err(StoreError::DeadlineExceeded {
                timeout_ms: self.timeout.as_millis() as u64,
            })
        } else {
            Ok(())
        }
    }
}

//! Bounded concurrency for tool calls.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::RuntimeError;

/// Scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Maximum concurrently running calls.
    pub max_concurrent: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { max_concurrent: 64 }
    }
}

/// Semaphore-backed limiter. Cloning shares the same permits.
#[derive(Debug, Clone)]
pub struct Scheduler {
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
}

impl Scheduler {
    /// Creates a scheduler with `max_concurrent` permits (at least one).
    pub fn new(config: &SchedulerConfig) -> Self {
        let max_concurrent = config.max_concurrent.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    /// Waits for a free slot. The slot is held until the permit is dropped.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, RuntimeError> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| RuntimeError::SchedulerClosed)
    }

    /// Waits until every in-flight call has released its permit.
    pub async fn drain(&self) {
        if let Ok(all) = self.semaphore.acquire_many(self.max_concurrent as u32).await {
            drop(all);
        }
    }

    /// Currently free slots.
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Configured limit.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}

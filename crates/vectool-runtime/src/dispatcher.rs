//! Routes a call to its tool: lookup, argument checks, bounded concurrency,
//! deadline and panic containment.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use vectool_protocol::schema::{validate_arguments, SchemaError};
use vectool_store::CallContext;
use vectool_types::{ErrorKind, ToolError, ToolResult};

use crate::args::ToolArgs;
use crate::error::RuntimeError;
use crate::metrics::ExecutionMetrics;
use crate::registry::ToolRegistry;
use crate::runtime_config::{RuntimeConfig, TimeoutPolicy};
use crate::scheduler::{Scheduler, SchedulerConfig};

/// Executes tool calls for every transport.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    timeouts: TimeoutPolicy,
    scheduler: Scheduler,
    metrics: Arc<ExecutionMetrics>,
    next_call_id: AtomicU64,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, config: &RuntimeConfig) -> Self {
        Self {
            registry,
            timeouts: TimeoutPolicy::from(config),
            scheduler: Scheduler::new(&SchedulerConfig {
                max_concurrent: config.max_concurrent,
            }),
            metrics: ExecutionMetrics::new_shared(),
            next_call_id: AtomicU64::new(1),
        }
    }

    /// Invokes `name` with `arguments`. Never panics; every failure is a `ToolError`.
    #[tracing::instrument(skip(self, arguments), fields(call_id))]
    pub async fn invoke(&self, name: &str, arguments: Value) -> ToolResult {
        let call_id = self.next_call_id.fetch_add(1, Ordering::Relaxed);
        tracing::Span::current().record("call_id", call_id);
        self.metrics.record_attempt();

        let result = self.execute(name, call_id, arguments).await;
        match &result {
            Ok(_) => {
                self.metrics.record_success();
                debug!(tool = name, "call succeeded");
            }
            Err(e) => {
                self.metrics.record_failure();
                match e.kind {
                    ErrorKind::Timeout => self.metrics.record_timeout(),
                    ErrorKind::Fatal => warn!(tool = name, error = %e, "call failed"),
                    _ => debug!(tool = name, error = %e, "call rejected"),
                }
            }
        }
        result
    }

    async fn execute(&self, name: &str, call_id: u64, arguments: Value) -> ToolResult {
        let tool = self.registry.get(name).ok_or_else(|| RuntimeError::ToolNotFound {
            name: name.to_string(),
        })?;

        let args = ToolArgs::from_value(arguments)?;
        validate_arguments(tool.input_schema(), &args.as_value()).map_err(schema_error)?;

        let permit = self.scheduler.acquire().await?;
        let timeout = self.timeouts.for_tool(name, tool.timeout());
        let ctx = CallContext::new(name, call_id, timeout);
        let handler = tool.handler();

        let mut task = AbortOnDrop(tokio::spawn(async move {
            let _permit = permit;
            handler.call(&ctx, args).await
        }));

        match tokio::time::timeout(timeout, &mut task.0).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) if join_err.is_panic() => {
                self.metrics.record_panic();
                let detail = panic_detail(join_err.into_panic());
                Err(RuntimeError::Panicked {
                    tool: name.to_string(),
                    detail,
                }
                .into())
            }
            Ok(Err(_)) => Err(RuntimeError::Cancelled {
                tool: name.to_string(),
            }
            .into()),
            Err(_elapsed) => {
                task.0.abort();
                warn!(tool = name, timeout_ms = timeout.as_millis() as u64, "call timed out");
                Err(RuntimeError::Timeout {
                    tool: name.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                }
                .into())
            }
        }
    }

    /// Waits up to `grace` for in-flight calls to finish.
    ///
    /// Returns `false` if calls were still running when the grace period ended.
    pub async fn shutdown(&self, grace: Duration) -> bool {
        let drained = tokio::time::timeout(grace, self.scheduler.drain())
            .await
            .is_ok();
        if drained {
            info!("dispatcher drained");
        } else {
            warn!(
                in_flight = self.in_flight(),
                grace_secs = grace.as_secs(),
                "shutdown grace period elapsed with calls in flight"
            );
        }
        drained
    }

    /// Calls currently holding a scheduler permit.
    pub fn in_flight(&self) -> usize {
        self.scheduler.max_concurrent() - self.scheduler.available_permits()
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }
}

/// Aborts the handler task when the caller stops waiting for it, so a
/// transport dropping an `invoke` future also frees the call's slot.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn schema_error(e: SchemaError) -> ToolError {
    let field = e.field().unwrap_or("arguments").to_string();
    ToolError::invalid_argument(&field, e)
}

fn panic_detail(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

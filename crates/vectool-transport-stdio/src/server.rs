//! Concurrent JSON-RPC server loop over the stdio transport.
//!
//! Requests are dispatched on their own tasks and answered as they complete;
//! all writes go through this loop, so frames never interleave.
//! Notifications (no `id`) are handled without a response.

use std::future::{pending, Future};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use vectool_mcp::{JsonRpcOutput, McpHandler};
use vectool_protocol::{error_codes, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest};

use crate::error::TransportError;
use crate::transport::StdioTransport;

/// JSON-RPC server that reads from a transport and dispatches to a handler.
pub struct McpServer<R, W> {
    transport: StdioTransport<R, W>,
    handler: Arc<McpHandler>,
}

impl<R, W> McpServer<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(transport: StdioTransport<R, W>, handler: Arc<McpHandler>) -> Self {
        Self { transport, handler }
    }

    /// Runs until the input stream closes and every outstanding call is answered.
    pub async fn run(&mut self) -> Result<(), TransportError> {
        self.run_until(pending(), Duration::ZERO).await
    }

    /// Like [`run`](Self::run), but also stops reading when `shutdown` resolves.
    ///
    /// After `shutdown`, accepted calls get up to `grace` to answer; whatever
    /// is still running then is aborted without a response.
    pub async fn run_until(
        &mut self,
        shutdown: impl Future<Output = ()>,
        grace: Duration,
    ) -> Result<(), TransportError> {
        info!("stdio server starting");
        tokio::pin!(shutdown);

        let mut in_flight: JoinSet<JsonRpcOutput> = JoinSet::new();
        let mut reading = true;
        let mut shutting_down = false;
        let grace_timer = tokio::time::sleep(Duration::ZERO);
        tokio::pin!(grace_timer);

        loop {
            if !reading && in_flight.is_empty() {
                break;
            }
            tokio::select! {
                line = self.transport.read_line(), if reading => match line? {
                    Some(line) if line.is_empty() => {}
                    Some(line) => {
                        if let Some(output) = self.accept(&line, &mut in_flight) {
                            self.write_output(&output).await?;
                        }
                    }
                    None => {
                        info!(in_flight = in_flight.len(), "stdin closed, draining");
                        reading = false;
                    }
                },
                () = &mut shutdown, if !shutting_down => {
                    info!(
                        in_flight = in_flight.len(),
                        grace_ms = grace.as_millis() as u64,
                        "shutdown requested, draining"
                    );
                    reading = false;
                    shutting_down = true;
                    grace_timer.as_mut().reset(deadline_after(grace));
                }
                () = &mut grace_timer, if shutting_down && !in_flight.is_empty() => {
                    warn!(abandoned = in_flight.len(), "grace period elapsed, aborting calls");
                    in_flight.abort_all();
                    break;
                }
                Some(joined) = in_flight.join_next() => match joined {
                    Ok(output) => self.write_output(&output).await?,
                    Err(e) => error!(error = %e, "request task failed"),
                },
                else => break,
            }
        }

        info!("stdio server stopped");
        Ok(())
    }

    /// Parses one line. Requests are spawned; anything answerable right away
    /// (parse errors, invalid frames) is returned for immediate writing.
    fn accept(&self, line: &str, in_flight: &mut JoinSet<JsonRpcOutput>) -> Option<JsonRpcOutput> {
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "failed to parse JSON-RPC message");
                return Some(JsonRpcOutput::Error(JsonRpcErrorResponse::without_id(
                    error_codes::PARSE_ERROR,
                    format!("parse error: {e}"),
                )));
            }
        };

        if value.get("id").is_some_and(|id| !id.is_null()) {
            return match serde_json::from_value::<JsonRpcRequest>(value) {
                Ok(request) => {
                    debug!(method = %request.method, id = ?request.id, "received request");
                    let handler = Arc::clone(&self.handler);
                    in_flight.spawn(async move { handler.handle(request).await });
                    None
                }
                Err(e) => Some(invalid_request(e)),
            };
        }

        match serde_json::from_value::<JsonRpcNotification>(value) {
            Ok(notification) => {
                debug!(method = %notification.method, "received notification");
                self.handler.handle_notification(&notification);
                None
            }
            Err(e) => Some(invalid_request(e)),
        }
    }

    async fn write_output(&mut self, output: &JsonRpcOutput) -> Result<(), TransportError> {
        let json = output.to_json().map_err(|e| {
            error!(error = %e, "failed to serialize response");
            TransportError::Serialize(e.to_string())
        })?;
        self.transport.write_line(&json).await
    }

    /// Consumes the server, returning the transport's writer.
    pub fn into_writer(self) -> W {
        self.transport.into_writer()
    }
}

fn deadline_after(grace: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(grace)
        .unwrap_or_else(|| now + Duration::from_secs(86_400))
}

fn invalid_request(e: serde_json::Error) -> JsonRpcOutput {
    warn!(error = %e, "invalid JSON-RPC frame");
    JsonRpcOutput::Error(JsonRpcErrorResponse::without_id(
        error_codes::INVALID_REQUEST,
        format!("invalid request: {e}"),
    ))
}

//! Request routing for the JSON-RPC tool surface.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use vectool_protocol::mcp::methods;
use vectool_protocol::{
    error_codes, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
};
use vectool_runtime::Dispatcher;

use crate::dispatch::{initialize, tools_call, tools_list};

/// One response frame.
#[derive(Debug, Clone)]
pub enum JsonRpcOutput {
    Success(JsonRpcResponse),
    Error(JsonRpcErrorResponse),
}

impl JsonRpcOutput {
    /// Serializes the frame to a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Success(r) => serde_json::to_string(r),
            Self::Error(e) => serde_json::to_string(e),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The `result` member, for successful frames.
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Success(r) => Some(&r.result),
            Self::Error(_) => None,
        }
    }
}

/// Routes JSON-RPC requests to the dispatcher.
pub struct McpHandler {
    dispatcher: Arc<Dispatcher>,
}

impl McpHandler {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Handles one request and produces its response frame.
    #[tracing::instrument(skip(self, request), fields(method = %request.method))]
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcOutput {
        let JsonRpcRequest {
            id, method, params, ..
        } = request;
        match method.as_str() {
            methods::INITIALIZE => initialize::handle_initialize(id, &params),
            methods::PING => JsonRpcOutput::Success(JsonRpcResponse::success(
                id,
                Value::Object(Default::default()),
            )),
            methods::TOOLS_LIST => tools_list::handle_tools_list(id, self.dispatcher.registry()),
            methods::TOOLS_CALL => tools_call::handle_tools_call(id, &params, &self.dispatcher).await,
            other => {
                warn!(method = other, "unknown method");
                JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                    id,
                    error_codes::METHOD_NOT_FOUND,
                    format!("unknown method: {other}"),
                ))
            }
        }
    }

    /// Notifications carry no id and never produce output.
    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        match notification.method.as_str() {
            methods::NOTIFICATIONS_INITIALIZED => debug!("client initialized"),
            methods::NOTIFICATIONS_CANCELLED => debug!(params = ?notification.params, "client cancelled a request"),
            other => debug!(method = other, "ignoring notification"),
        }
    }
}

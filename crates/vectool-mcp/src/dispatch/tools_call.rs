//! Handles the `tools/call` method.

use serde_json::Value;

use vectool_protocol::mcp::tools::{ToolsCallParams, ToolsCallResult};
use vectool_protocol::{error_codes, JsonRpcErrorResponse, RequestId};
use vectool_runtime::Dispatcher;

use super::respond;
use crate::handler::JsonRpcOutput;

/// Handles the `tools/call` request.
///
/// Tool failures are reported in-band: readable text content with
/// `isError: true`. Only malformed params produce a JSON-RPC error.
pub(crate) async fn handle_tools_call(
    id: RequestId,
    params: &Option<Value>,
    dispatcher: &Dispatcher,
) -> JsonRpcOutput {
    let call = match params {
        Some(p) => match serde_json::from_value::<ToolsCallParams>(p.clone()) {
            Ok(cp) => cp,
            Err(e) => {
                return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("invalid tools/call params: {e}"),
                ));
            }
        },
        None => {
            return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                id,
                error_codes::INVALID_PARAMS,
                "tools/call requires params",
            ));
        }
    };

    tracing::debug!(tool = %call.name, "executing tool via stdio");
    let result = match dispatcher.invoke(&call.name, call.arguments).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => ToolsCallResult::text(text),
            Err(e) => ToolsCallResult::error(format!("fatal: result serialization failed: {e}")),
        },
        Err(e) => ToolsCallResult::error(format!("{}: {}", e.kind, e.message)),
    };
    respond(id, result)
}

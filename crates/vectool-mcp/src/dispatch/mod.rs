//! Method handlers.
//!
//! Each sub-module handles one method as a free function, keeping
//! `McpHandler` itself thin (struct + routing only).

pub(crate) mod initialize;
pub(crate) mod tools_call;
pub(crate) mod tools_list;

use serde::Serialize;

use vectool_protocol::{error_codes, JsonRpcErrorResponse, JsonRpcResponse, RequestId};

use crate::handler::JsonRpcOutput;

/// Wraps a serializable result, or an internal error if it cannot be serialized.
pub(crate) fn respond<T: Serialize>(id: RequestId, result: T) -> JsonRpcOutput {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcOutput::Success(JsonRpcResponse::success(id, v)),
        Err(e) => JsonRpcOutput::Error(JsonRpcErrorResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            e.to_string(),
        )),
    }
}

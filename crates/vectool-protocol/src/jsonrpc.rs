//! Message envelopes for the stdio binding.
//!
//! Each line on stdin is one of these envelopes; each line written to
//! stdout is a [`JsonRpcResponse`] or a [`JsonRpcErrorResponse`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

const VERSION: &str = "2.0";

/// A call that expects an answer carrying the same `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// A fire-and-forget message; the server never answers it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    pub result: Value,
}

/// Protocol-level failure: malformed line, unknown method, bad params.
///
/// Tool failures are not reported this way; they travel inside a
/// successful `tools/call` result. `id` serializes as `null` when the line
/// was too broken to read one from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: String,
    pub id: Option<RequestId>,
    pub error: JsonRpcError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// Client-chosen correlation id. `1` and `"1"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
}

/// Codes used in [`JsonRpcError::code`].
pub mod error_codes {
    /// The line is not JSON.
    pub const PARSE_ERROR: i32 = -32700;
    /// JSON, but neither a request nor a notification.
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    /// The server failed to build its own answer.
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: VERSION.into(),
            id,
            method: method.into(),
            params,
        }
    }
}

impl JsonRpcResponse {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: VERSION.into(),
            id,
            result,
        }
    }
}

impl JsonRpcErrorResponse {
    /// Answers the request `id` with a protocol error.
    pub fn error(id: RequestId, code: i32, message: impl Into<String>) -> Self {
        Self::build(Some(id), code, message.into())
    }

    /// Protocol error for a line whose id could not be recovered.
    pub fn without_id(code: i32, message: impl Into<String>) -> Self {
        Self::build(None, code, message.into())
    }

    fn build(id: Option<RequestId>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: VERSION.into(),
            id,
            error: JsonRpcError { code, message },
        }
    }
}

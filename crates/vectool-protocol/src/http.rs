//! JSON bodies of the HTTP binding.
//!
//! Business failures travel inside a `200` response's `error` field;
//! non-2xx statuses are reserved for transport failures.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// One entry of `GET /tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// `GET /tools/list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResponse {
    pub tools: Vec<ToolDescriptor>,
}

/// `POST /tools/call` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// `POST /tools/call` response body: exactly one of `result` / `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCallResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error kind accompanying `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ToolCallResponse {
    /// A successful call.
    pub fn success(result: Value) -> Self {
        Self {
            result: Some(result),
            ..Self::default()
        }
    }

    /// A business failure.
    pub fn failure(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            kind: Some(kind.into()),
            ..Self::default()
        }
    }
}

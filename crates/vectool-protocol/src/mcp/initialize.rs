//! MCP initialize method types.
//!
//! The initialize handshake is the first message exchanged on the stdio
//! channel; the server answers with its capabilities and identity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool-related capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCapability {
    /// Whether the tool list can change during the session.
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Server capabilities returned during initialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tools capability (present if server exposes tools).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolCapability>,
}

/// Client or server identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

/// Request params for `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeParams {
    /// Protocol version requested by client.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Client capabilities, kept opaque.
    #[serde(default)]
    pub capabilities: Value,
    /// Client info.
    #[serde(rename = "clientInfo")]
    pub client_info: Implementation,
}

/// Response for `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    /// Protocol version agreed by server.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities.
    pub capabilities: ServerCapabilities,
    /// Server info.
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
}

/// MCP protocol version supported by this implementation.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn initialize_params_accept_arbitrary_capabilities() {
        let params: InitializeParams = serde_json::from_value(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {"roots": {"listChanged": true}},
            "clientInfo": {"name": "inspector", "version": "1.0.0"}
        }))
        .expect("de");
        assert_eq!(params.client_info.name, "inspector");
    }

    #[test]
    fn initialize_result_shape() {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolCapability::default()),
            },
            server_info: Implementation {
                name: "vectool".to_string(),
                version: "0.1.0".to_string(),
            },
        };
        let v = serde_json::to_value(&result).expect("ser");
        assert_eq!(v["serverInfo"]["name"], "vectool");
        assert_eq!(v["capabilities"]["tools"]["listChanged"], false);
    }
}

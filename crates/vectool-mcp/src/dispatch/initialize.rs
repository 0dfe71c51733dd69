//! Handles the `initialize` method.

use serde_json::Value;

use vectool_protocol::mcp::initialize::{
    Implementation, InitializeParams, InitializeResult, ServerCapabilities, ToolCapability,
    PROTOCOL_VERSION,
};
use vectool_protocol::{error_codes, JsonRpcErrorResponse, RequestId};

use super::respond;
use crate::handler::JsonRpcOutput;

/// Name reported in `serverInfo`.
pub(crate) const SERVER_NAME: &str = "vectool";

/// Handles the `initialize` request and returns the server capabilities.
pub(crate) fn handle_initialize(id: RequestId, params: &Option<Value>) -> JsonRpcOutput {
    if let Some(p) = params {
        match serde_json::from_value::<InitializeParams>(p.clone()) {
            Ok(init) => tracing::info!(
                client = %init.client_info.name,
                client_version = %init.client_info.version,
                protocol = %init.protocol_version,
                "client connected"
            ),
            Err(e) => {
                return JsonRpcOutput::Error(JsonRpcErrorResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("invalid initialize params: {e}"),
                ));
            }
        }
    }

    respond(
        id,
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolCapability {
                    list_changed: false,
                }),
            },
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_protocol_and_server_info() {
        let out = handle_initialize(RequestId::Number(1), &None);
        let result = out.result().expect("success");
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "vectool");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[test]
    fn accepts_client_params() {
        let params = Some(json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "0.0.1"}
        }));
        assert!(!handle_initialize(RequestId::Number(2), &params).is_error());
    }

    #[test]
    fn rejects_malformed_params() {
        let out = handle_initialize(RequestId::Number(3), &Some(json!({"protocolVersion": 5})));
        match out {
            JsonRpcOutput::Error(e) => assert_eq!(e.error.code, error_codes::INVALID_PARAMS),
            JsonRpcOutput::Success(_) => panic!("expected error"),
        }
    }
}

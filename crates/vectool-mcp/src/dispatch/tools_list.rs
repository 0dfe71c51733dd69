//! Handles the `tools/list` method.

use vectool_protocol::mcp::tools::{McpToolDefinition, ToolsListResult};
use vectool_protocol::RequestId;
use vectool_runtime::ToolRegistry;

use super::respond;
use crate::handler::JsonRpcOutput;

/// Lists every registered tool, sorted by name.
pub(crate) fn handle_tools_list(id: RequestId, registry: &ToolRegistry) -> JsonRpcOutput {
    let tools = registry
        .list()
        .into_iter()
        .map(|tool| McpToolDefinition {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema().clone(),
        })
        .collect();

    respond(
        id,
        ToolsListResult {
            tools,
            next_cursor: None,
        },
    )
}

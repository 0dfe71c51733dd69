//! # vectool-transport-stdio
//!
//! Stdio transport adapter for JSON-RPC tool calls.
//!
//! Provides line-delimited JSON transport over stdin/stdout,
//! and a concurrent server loop that ties it to an `McpHandler`.

pub mod error;
pub mod server;
pub mod transport;

pub use error::TransportError;
// McpHandler lives in vectool-mcp; re-exported for convenience.
pub use server::McpServer;
pub use transport::StdioTransport;
pub use vectool_mcp::{JsonRpcOutput, McpHandler};

//! # vectool-protocol
//!
//! Wire formats for both transport bindings: JSON-RPC 2.0 and the MCP
//! `initialize` / `tools/*` payloads used over stdio, the JSON bodies of
//! the HTTP endpoints, and argument validation against a tool's declared
//! input schema.

pub mod http;
pub mod jsonrpc;
pub mod mcp;
pub mod schema;

pub use jsonrpc::*;
pub use mcp::methods;

//! # vectool-mcp
//!
//! JSON-RPC method dispatch for the stdio binding.
//!
//! Provides `McpHandler` and `JsonRpcOutput` for routing JSON-RPC requests
//! to `initialize`, `ping`, `tools/list` and `tools/call`.

mod dispatch;
pub mod handler;

pub use handler::{JsonRpcOutput, McpHandler};

//! # vectool-types
//!
//! Domain types for the vectool dispatch runtime.
//! This crate contains pure data types with no behaviour beyond
//! construction helpers and JSON Schema derivation.

pub mod document;
pub mod error;
pub mod tool;

// Re-exports for convenience.
pub use document::{CollectionInfo, Document, QueryResult, SearchResult};
pub use error::{ErrorKind, ToolError, ToolResult};
pub use tool::{ToolArgument, ToolDefinition};

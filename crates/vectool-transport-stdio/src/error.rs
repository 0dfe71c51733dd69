//! Transport-layer error types.

use thiserror::Error;
use vectool_types::ToolError;

/// Errors from the stdio transport layer.
///
/// Malformed frames are answered in-band and never surface here; these
/// errors end the session.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from stdin.
    #[error("read error: {0}")]
    Read(String),
    /// Failed to write to stdout.
    #[error("write error: {0}")]
    Write(String),
    /// A response frame could not be serialized.
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl From<TransportError> for ToolError {
    fn from(e: TransportError) -> Self {
        ToolError::fatal(e.to_string())
    }
}

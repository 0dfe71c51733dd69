//! Error types for the HTTP transport layer.

use thiserror::Error;
use vectool_types::ToolError;

/// Errors that can occur in the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// Failed to bind to the TCP address.
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        /// The address string.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server encountered an I/O error while serving.
    #[error("server error: {0}")]
    Serve(String),
    /// A CORS setting could not be parsed.
    #[error("invalid CORS {setting}: '{value}'")]
    InvalidCors { setting: &'static str, value: String },
}

impl From<HttpTransportError> for ToolError {
    fn from(e: HttpTransportError) -> Self {
        ToolError::fatal(e.to_string())
    }
}

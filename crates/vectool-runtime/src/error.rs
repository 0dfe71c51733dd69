//! Runtime-specific error types.

use thiserror::Error;
use vectool_types::{ErrorKind, ToolError};

/// Errors from the registry and dispatcher.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Two tools registered under one name.
    #[error("duplicate tool registration: {name}")]
    DuplicateTool { name: String },
    /// Tool not found in registry.
    #[error("tool not found: {name}")]
    ToolNotFound { name: String },
    /// Execution timed out.
    #[error("tool '{tool}' timed out after {timeout_ms}ms")]
    Timeout { tool: String, timeout_ms: u64 },
    /// The handler panicked.
    #[error("tool '{tool}' panicked: {detail}")]
    Panicked { tool: String, detail: String },
    /// The handler task was cancelled by the runtime (e.g. while it shuts
    /// down) before producing a result.
    #[error("tool '{tool}' was cancelled")]
    Cancelled { tool: String },
    /// The scheduler was closed; no new calls are accepted.
    #[error("dispatcher is shutting down")]
    SchedulerClosed,
}

impl RuntimeError {
    /// The error kind this maps to on the wire.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ToolNotFound { .. } => ErrorKind::NotFound,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::SchedulerClosed => ErrorKind::Transient,
            Self::DuplicateTool { .. } | Self::Panicked { .. } | Self::Cancelled { .. } => {
                ErrorKind::Fatal
            }
        }
    }
}

impl From<RuntimeError> for ToolError {
    fn from(e: RuntimeError) -> Self {
        ToolError::new(e.kind(), e.to_string())
    }
}

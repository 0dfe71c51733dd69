//! Unified error type carried by every tool result.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Classification of tool failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing or malformed caller input. Never retried.
    InvalidArgument,
    /// Collection, document or tool does not exist.
    NotFound,
    /// Collection name already taken.
    AlreadyExists,
    /// The call exceeded its deadline. The identical call may be retried.
    Timeout,
    /// Backend connectivity problem. Retry with backoff.
    Transient,
    /// Programming or configuration defect.
    Fatal,
}

impl ErrorKind {
    /// Returns the wire name of this kind (`not_found`, `timeout`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::Timeout => "timeout",
            Self::Transient => "transient",
            Self::Fatal => "fatal",
        }
    }

    /// Whether the caller may retry the identical call.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Timeout | Self::Transient)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured tool failure: `{kind, message}` plus optional context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional context (tool name, collection, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Outcome of one tool call.
pub type ToolResult = Result<Value, ToolError>;

impl ToolError {
    /// Creates a new `ToolError`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
        }
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates an argument error naming the offending field.
    pub fn invalid_argument(field: &str, problem: impl fmt::Display) -> Self {
        Self::new(ErrorKind::InvalidArgument, format!("argument '{field}': {problem}"))
    }

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Creates an already-exists error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AlreadyExists, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Creates a transient error.
    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transient, message)
    }

    /// Creates a fatal error.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fatal, message)
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({ctx})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

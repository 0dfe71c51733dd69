//! Errors returned by store implementations.

use thiserror::Error;
use vectool_types::{ErrorKind, ToolError};

/// Errors returned by [`crate::VectorStore`] implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The collection does not exist.
    #[error("collection '{collection}' not found")]
    CollectionNotFound { collection: String },
    /// The document does not exist in the collection.
    #[error("document '{id}' not found in collection '{collection}'")]
    DocumentNotFound { collection: String, id: String },
    /// A collection with this name already exists.
    #[error("collection '{collection}' already exists")]
    AlreadyExists { collection: String },
    /// Backend connectivity failure; the caller may retry.
    #[error("backend unavailable: {message}")]
    Transient { message: String },
    /// Unrecoverable backend or configuration failure.
    #[error("backend error: {message}")]
    Fatal { message: String },
    /// The call's deadline passed before the operation ran.
    #[error("deadline of {timeout_ms}ms exceeded")]
    DeadlineExceeded { timeout_ms: u64 },
}

impl StoreError {
    /// Shorthand for a missing collection.
    pub fn collection_not_found(collection: &str) -> Self {
        Self::CollectionNotFound {
            collection: collection.to_string(),
        }
    }

    /// The error kind this maps to on the wire.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CollectionNotFound { .. } | Self::DocumentNotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Transient { .. } => ErrorKind::Transient,
            Self::Fatal { .. } => ErrorKind::Fatal,
            Self::DeadlineExceeded { .. } => ErrorKind::Timeout,
        }
    }
}

impl From<StoreError> for ToolError {
    fn from(e: StoreError) -> Self {
        ToolError::new(e.kind(), e.to_string())
    }
}

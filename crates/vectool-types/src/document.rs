//! Stored documents and the shapes returned by collection reads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The stored unit of a collection.
///
/// Every field defaults when absent so callers can insert partial
/// documents; an empty `id` asks the store to generate one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique within the owning collection.
    #[serde(default)]
    pub id: String,
    /// Source location.
    #[serde(default)]
    pub url: String,
    /// Short text used for matching.
    #[serde(default)]
    pub text: String,
    /// Full content body.
    #[serde(default)]
    pub content: String,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Optional embedding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

impl Document {
    /// Creates a document with the given url and text and no id.
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// A document with its relevance score in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub document: Document,
    pub score: f64,
}

/// Result of a `query` call: the hits plus the original query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total: usize,
}

/// Collection metadata with its live document count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub document_count: usize,
}

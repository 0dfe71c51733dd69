//! Abstract capability trait (port) for vector stores.

use async_trait::async_trait;

use vectool_types::{CollectionInfo, Document, QueryResult, SearchResult};

use crate::context::CallContext;
use crate::error::StoreError;

/// The storage capability set every backend provides.
///
/// Every operation receives the caller's [`CallContext`] and must observe
/// its deadline. Implementations must be safe to call concurrently.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Opens the backend connection.
    async fn connect(&self, ctx: &CallContext) -> Result<(), StoreError>;

    /// Closes the backend connection.
    async fn close(&self, ctx: &CallContext) -> Result<(), StoreError>;

    /// Names of all collections.
    async fn list_collections(&self, ctx: &CallContext) -> Result<Vec<String>, StoreError>;

    /// Creates an empty collection. Fails with `AlreadyExists` if the name is taken.
    async fn create_collection(
        &self,
        ctx: &CallContext,
        name: &str,
        kind: &str,
        description: &str,
    ) -> Result<(), StoreError>;

    /// Removes a collection and every document in it.
    async fn delete_collection(&self, ctx: &CallContext, name: &str) -> Result<(), StoreError>;

    /// Upserts documents, generating ids for those without one.
    /// Returns the stored ids in input order.
    async fn insert(
        &self,
        ctx: &CallContext,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<String>, StoreError>;

    /// A window of documents. Order is unspecified and may differ between calls.
    async fn list_documents(
        &self,
        ctx: &CallContext,
        collection: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Document>, StoreError>;

    /// Number of documents in the collection.
    async fn count_documents(&self, ctx: &CallContext, collection: &str)
        -> Result<usize, StoreError>;

    /// Looks up one document.
    async fn get_document(
        &self,
        ctx: &CallContext,
        collection: &str,
        id: &str,
    ) -> Result<Document, StoreError>;

    /// Removes one document.
    async fn delete_document(
        &self,
        ctx: &CallContext,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError>;

    /// Up to `limit` documents with relevance scores in `[0, 1]`, best first.
    async fn search(
        &self,
        ctx: &CallContext,
        collection: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>, StoreError>;

    /// `search` plus the original query string and hit count.
    async fn query(
        &self,
        ctx: &CallContext,
        collection: &str,
        query: &str,
        limit: usize,
    ) -> Result<QueryResult, StoreError> {
        let results = self.search(ctx, collection, query, limit).await?;
        Ok(QueryResult {
            query: query.to_string(),
            total: results.len(),
            results,
        })
    }

    /// Name, type, description and live document count.
    async fn collection_info(
        &self,
        ctx: &CallContext,
        collection: &str,
    ) -> Result<CollectionInfo, StoreError>;
}

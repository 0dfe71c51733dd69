//! `VectorStore` trait implementation for `MemoryStore`.

use async_trait::async_trait;

use vectool_store::{CallContext, StoreError, VectorStore};
use vectool_types::{CollectionInfo, Document, SearchResult};

use crate::store::MemoryStore;

impl MemoryStore {
    /// Sleeps for the configured latency, bounded by the call deadline.
    async fn simulate_latency(&self, ctx: &CallContext) -> Result<(), StoreError> {
        ctx.check()?;
        if tokio::time::timeout(ctx.remaining(), tokio::time::sleep(self.options.latency))
            .await
            .is_err()
        {
            return Err(StoreError::DeadlineExceeded {
                timeout_ms: ctx.timeout().as_millis() as u64,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn connect(&self, ctx: &CallContext) -> Result<(), StoreError> {
        self.simulate_latency(ctx).await?;
        tracing::debug!("memory store connected");
        Ok(())
    }

    async fn close(&self, ctx: &CallContext) -> Result<(), StoreError> {
        self.simulate_latency(ctx).await
    }

    async fn list_collections(&self, ctx: &CallContext) -> Result<Vec<String>, StoreError> {
        ctx.check()?;
        Ok(self.names())
    }

    async fn create_collection(
        &self,
        ctx: &CallContext,
        name: &str,
        kind: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        ctx.check()?;
        self.create(name, kind, description)
    }

    async fn delete_collection(&self, ctx: &CallContext, name: &str) -> Result<(), StoreError> {
        ctx.check()?;
        self.remove(name)
    }

    async fn insert(
        &self,
        ctx: &CallContext,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<Vec<String>, StoreError> {
        ctx.check()?;
        self.upsert(collection, documents)
    }

    async fn list_documents(
        &self,
        ctx: &CallContext,
        collection: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Document>, StoreError> {
        ctx.check()?;
        self.window(collection, limit, offset)
    }

    async fn count_documents(
        &self,
        ctx: &CallContext,
        collection: &str,
    ) -> Result<usize, StoreError> {
        ctx.check()?;
        self.count(collection)
    }

    async fn get_document(
        &self,
        ctx: &CallContext,
        collection: &str,
        id: &str,
    ) -> Result<Document, StoreError> {
        ctx.check()?;
        self.fetch(collection, id)
    }

    async fn delete_document(
        &self,
        ctx: &CallContext,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        ctx.check()?;
        self.discard(collection, id)
    }

    async fn search(
        &self,
        ctx: &CallContext,
        collection: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>, StoreError> {
        ctx.check()?;
        self.ranked(collection, query, limit)
    }

    async fn collection_info(
        &self,
        ctx: &CallContext,
        collection: &str,
    ) -> Result<CollectionInfo, StoreError> {
        ctx.check()?;
        self.info(collection)
    }
}

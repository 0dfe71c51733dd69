//! In-memory store state and its two lock levels.
//!
//! Lock order: the outer map lock is held only to find, add or remove an
//! `Arc<Collection>` and is released before any collection lock is taken.
//! No guard ever lives across an `.await`; all locking happens in the
//! synchronous helpers below.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tracing::debug;

use vectool_store::StoreError;
use vectool_types::{CollectionInfo, Document, SearchResult};

use crate::ids::generate_id;
use crate::scoring::{rank, simulate_embedding};

/// Tunables for the reference store.
#[derive(Debug, Clone)]
pub struct MemoryStoreOptions {
    /// Simulated latency of `connect` / `close`.
    pub latency: Duration,
    /// When set, documents inserted without a vector get a simulated
    /// embedding of this many dimensions.
    pub embedding_dimensions: Option<usize>,
}

impl Default for MemoryStoreOptions {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(5),
            embedding_dimensions: None,
        }
    }
}

type DocumentMap = HashMap<String, Document>;

/// One collection with its own document lock.
pub(crate) struct Collection {
    pub(crate) name: String,
    pub(crate) kind: String,
    pub(crate) description: String,
    documents: RwLock<DocumentMap>,
}

impl Collection {
    fn new(name: &str, kind: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            description: description.to_string(),
            documents: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, DocumentMap> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DocumentMap> {
        self.documents.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Concurrency-safe, process-local vector store.
///
/// Operations on different collections never contend beyond the brief
/// outer-map lookup.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Arc<Collection>>>,
    pub(crate) options: MemoryStoreOptions,
}

impl MemoryStore {
    /// Creates an empty store with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given options.
    pub fn with_options(options: MemoryStoreOptions) -> Self {
        Self {
            collections: RwLock::default(),
            options,
        }
    }

    /// Resolves a collection handle, releasing the outer lock on return.
    fn collection(&self, name: &str) -> Result<Arc<Collection>, StoreError> {
        let map = self.collections.read().unwrap_or_else(PoisonError::into_inner);
        map.get(name)
            .cloned()
            .ok_or_else(|| StoreError::collection_not_found(name))
    }

    pub(crate) fn names(&self) -> Vec<String> {
        let map = self.collections.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = map.keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn create(&self, name: &str, kind: &str, description: &str) -> Result<(), StoreError> {
        let mut map = self.collections.write().unwrap_or_else(PoisonError::into_inner);
        if map.contains_key(name) {
            return Err(StoreError::AlreadyExists {
                collection: name.to_string(),
            });
        }
        map.insert(name.to_string(), Arc::new(Collection::new(name, kind, description)));
        debug!(collection = name, kind, "collection created");
        Ok(())
    }

    pub(crate) fn remove(&self, name: &str) -> Result<(), StoreError> {
        let removed = self
            .collections
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        match removed {
            Some(collection) => {
                debug!(collection = name, documents = collection.read().len(), "collection deleted");
                Ok(())
            }
            None => Err(StoreError::collection_not_found(name)),
        }
    }

    pub(crate) fn upsert(&self, name: &str, documents: Vec<Document>) -> Result<Vec<String>, StoreError> {
        let collection = self.collection(name)?;

        let prepared: Vec<Document> = documents
            .into_iter()
            .map(|mut doc| {
                if doc.id.is_empty() {
                    doc.id = generate_id();
                }
                if let (None, Some(dims)) = (&doc.vector, self.options.embedding_dimensions) {
                    let source = if doc.content.is_empty() { &doc.text } else { &doc.content };
                    doc.vector = Some(simulate_embedding(source, dims));
                }
                doc
            })
            .collect();
        let ids: Vec<String> = prepared.iter().map(|d| d.id.clone()).collect();

        let mut docs = collection.write();
        for doc in prepared {
            docs.insert(doc.id.clone(), doc);
        }
        Ok(ids)
    }

    pub(crate) fn window(&self, name: &str, limit: usize, offset: usize) -> Result<Vec<Document>, StoreError> {
        let collection = self.collection(name)?;
        let docs = collection.read();
        Ok(docs.values().skip(offset).take(limit).cloned().collect())
    }

    pub(crate) fn count(&self, name: &str) -> Result<usize, StoreError> {
        Ok(self.collection(name)?.read().len())
    }

    pub(crate) fn fetch(&self, name: &str, id: &str) -> Result<Document, StoreError> {
        let collection = self.collection(name)?;
        let docs = collection.read();
        docs.get(id).cloned().ok_or_else(|| StoreError::DocumentNotFound {
            collection: name.to_string(),
            id: id.to_string(),
        })
    }

    pub(crate) fn discard(&self, name: &str, id: &str) -> Result<(), StoreError> {
        let collection = self.collection(name)?;
        let mut docs = collection.write();
        docs.remove(id).map(|_| ()).ok_or_else(|| StoreError::DocumentNotFound {
            collection: name.to_string(),
            id: id.to_string(),
        })
    }

    pub(crate) fn ranked(&self, name: &str, query: &str, limit: usize) -> Result<Vec<SearchResult>, StoreError> {
        let collection = self.collection(name)?;
        let docs = collection.read();
        Ok(rank(docs.values(), query, limit))
    }

    pub(crate) fn info(&self, name: &str) -> Result<CollectionInfo, StoreError> {
        let collection = self.collection(name)?;
        let document_count = collection.read().len();
        Ok(CollectionInfo {
            name: collection.name.clone(),
            kind: collection.kind.clone(),
            description: collection.description.clone(),
            document_count,
        })
    }
}

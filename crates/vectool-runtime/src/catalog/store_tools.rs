//! Tools backed by the vector store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use vectool_store::{CallContext, VectorStore};
use vectool_types::{ToolArgument, ToolDefinition, ToolError};

use super::CollectionPreset;
use crate::args::ToolArgs;
use crate::types::{Tool, ToolHandler};

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_COLLECTION_TYPE: &str = "text";

/// One store-backed operation of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    ListCollections,
    CreateCollection,
    DeleteCollection,
    InsertDocuments,
    ListDocuments,
    CountDocuments,
    GetDocument,
    DeleteDocument,
    Search,
    Query,
    GetCollectionInfo,
}

impl StoreOp {
    pub const ALL: [StoreOp; 11] = [
        Self::ListCollections,
        Self::CreateCollection,
        Self::DeleteCollection,
        Self::InsertDocuments,
        Self::ListDocuments,
        Self::CountDocuments,
        Self::GetDocument,
        Self::DeleteDocument,
        Self::Search,
        Self::Query,
        Self::GetCollectionInfo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ListCollections => "list_collections",
            Self::CreateCollection => "create_collection",
            Self::DeleteCollection => "delete_collection",
            Self::InsertDocuments => "insert_documents",
            Self::ListDocuments => "list_documents",
            Self::CountDocuments => "count_documents",
            Self::GetDocument => "get_document",
            Self::DeleteDocument => "delete_document",
            Self::Search => "search",
            Self::Query => "query",
            Self::GetCollectionInfo => "get_collection_info",
        }
    }

    /// Published metadata for this operation.
    pub fn definition(self) -> ToolDefinition {
        let collection = || ToolArgument::required("collection", "string", "Collection name");
        let limit = || {
            ToolArgument::optional("limit", "integer", "Maximum number of results")
                .with_default(json!(DEFAULT_LIMIT))
        };
        let def = ToolDefinition::new(self.name(), self.description());
        match self {
            Self::ListCollections => def,
            Self::CreateCollection => def
                .arg(ToolArgument::required("name", "string", "Collection name"))
                .arg(
                    ToolArgument::optional("type", "string", "Collection type tag")
                        .with_default(json!(DEFAULT_COLLECTION_TYPE)),
                )
                .arg(ToolArgument::optional("description", "string", "Collection description"))
                .arg(ToolArgument::optional(
                    "preset",
                    "string",
                    "Configured preset supplying type and description",
                )),
            Self::DeleteCollection => {
                def.arg(ToolArgument::required("name", "string", "Collection name"))
            }
            Self::InsertDocuments => def.arg(collection()).arg(ToolArgument::required(
                "documents",
                "array",
                "Documents to insert: objects with id, url, text, content, metadata, vector",
            )),
            Self::ListDocuments => def.arg(collection()).arg(limit()).arg(
                ToolArgument::optional("offset", "integer", "Number of documents to skip")
                    .with_default(json!(0)),
            ),
            Self::CountDocuments | Self::GetCollectionInfo => def.arg(collection()),
            Self::GetDocument | Self::DeleteDocument => def
                .arg(collection())
                .arg(ToolArgument::required("id", "string", "Document id")),
            Self::Search | Self::Query => def
                .arg(collection())
                .arg(ToolArgument::required("query", "string", "Search text"))
                .arg(limit()),
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::ListCollections => "List all collections",
            Self::CreateCollection => "Create a new collection",
            Self::DeleteCollection => "Delete a collection and all its documents",
            Self::InsertDocuments => "Insert or overwrite documents in a collection",
            Self::ListDocuments => "List documents in a collection",
            Self::CountDocuments => "Count the documents in a collection",
            Self::GetDocument => "Fetch one document by id",
            Self::DeleteDocument => "Delete one document by id",
            Self::Search => "Search a collection for relevant documents",
            Self::Query => "Query a collection and report the hit count",
            Self::GetCollectionInfo => "Describe a collection",
        }
    }

    /// Wraps this operation as a registry entry.
    pub fn tool(
        self,
        store: Arc<dyn VectorStore>,
        presets: Arc<HashMap<String, CollectionPreset>>,
    ) -> Tool {
        Tool::new(
            self.definition(),
            Arc::new(StoreToolHandler {
                op: self,
                store,
                presets,
            }),
        )
    }
}

struct StoreToolHandler {
    op: StoreOp,
    store: Arc<dyn VectorStore>,
    presets: Arc<HashMap<String, CollectionPreset>>,
}

impl StoreToolHandler {
    fn resolve_collection_shape(&self, args: &ToolArgs) -> Result<(String, String), ToolError> {
        let preset = match args.optional_str("preset")? {
            Some(name) => Some(self.presets.get(name).ok_or_else(|| {
                ToolError::invalid_argument("preset", format!("unknown preset '{name}'"))
            })?),
            None => None,
        };
        let kind = match (args.optional_str("type")?, preset) {
            (Some(kind), _) => kind.to_string(),
            (None, Some(p)) => p.kind.clone(),
            (None, None) => DEFAULT_COLLECTION_TYPE.to_string(),
        };
        let description = match (args.optional_str("description")?, preset) {
            (Some(d), _) => d.to_string(),
            (None, Some(p)) => p.description.clone(),
            (None, None) => String::new(),
        };
        Ok((kind, description))
    }
}

#[async_trait]
impl ToolHandler for StoreToolHandler {
    async fn call(&self, ctx: &CallContext, args: ToolArgs) -> Result<Value, ToolError> {
        let store = self.store.as_ref();
        match self.op {
            StoreOp::ListCollections => {
                let collections = store.list_collections(ctx).await?;
                Ok(json!({ "collections": collections }))
            }
            StoreOp::CreateCollection => {
                let name = args.require_str("name")?;
                let (kind, description) = self.resolve_collection_shape(&args)?;
                store.create_collection(ctx, name, &kind, &description).await?;
                Ok(json!({ "created": name }))
            }
            StoreOp::DeleteCollection => {
                let name = args.require_str("name")?;
                store.delete_collection(ctx, name).await?;
                Ok(json!({ "deleted": name }))
            }
            StoreOp::InsertDocuments => {
                let collection = args.require_str("collection")?;
                let documents = args.documents("documents")?;
                let ids = store.insert(ctx, collection, documents).await?;
                Ok(json!({ "inserted": ids.len(), "ids": ids }))
            }
            StoreOp::ListDocuments => {
                let collection = args.require_str("collection")?;
                let limit = args.limit("limit", DEFAULT_LIMIT)?;
                let offset = args.optional_usize("offset", 0)?;
                let documents = store.list_documents(ctx, collection, limit, offset).await?;
                Ok(json!({ "count": documents.len(), "documents": documents }))
            }
            StoreOp::CountDocuments => {
                let collection = args.require_str("collection")?;
                let count = store.count_documents(ctx, collection).await?;
                Ok(json!({ "collection": collection, "count": count }))
            }
            StoreOp::GetDocument => {
                let collection = args.require_str("collection")?;
                let id = args.require_str("id")?;
                let document = store.get_document(ctx, collection, id).await?;
                to_value(&document)
            }
            StoreOp::DeleteDocument => {
                let collection = args.require_str("collection")?;
                let id = args.require_str("id")?;
                store.delete_document(ctx, collection, id).await?;
                Ok(json!({ "deleted": id }))
            }
            StoreOp::Search => {
                let collection = args.require_str("collection")?;
                let query = args.require_str("query")?;
                let limit = args.limit("limit", DEFAULT_LIMIT)?;
                let results = store.search(ctx, collection, query, limit).await?;
                Ok(json!({ "results": results }))
            }
            StoreOp::Query => {
                let collection = args.require_str("collection")?;
                let query = args.require_str("query")?;
                let limit = args.limit("limit", DEFAULT_LIMIT)?;
                to_value(&store.query(ctx, collection, query, limit).await?)
            }
            StoreOp::GetCollectionInfo => {
                let collection = args.require_str("collection")?;
                to_value(&store.collection_info(ctx, collection).await?)
            }
        }
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::fatal(format!("serialization failed: {e}")))
}

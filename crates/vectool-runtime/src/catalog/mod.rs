//! The built-in tool catalog.
//!
//! Store tools delegate to a [`VectorStore`]; assist tools shell out to an
//! external LLM command.

mod assist;
mod store_tools;

use std::collections::HashMap;
use std::sync::Arc;

use vectool_store::VectorStore;

use crate::error::RuntimeError;
use crate::registry::{RegistryBuilder, ToolRegistry};
use crate::types::Tool;

pub use assist::{AssistCommand, AssistKind};
pub use store_tools::StoreOp;

/// Type and description applied when `create_collection` names a preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionPreset {
    pub kind: String,
    pub description: String,
}

/// Everything the catalog needs besides the store.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Named collection presets.
    pub presets: HashMap<String, CollectionPreset>,
    /// External command behind the assist tools.
    pub assist: AssistCommand,
}

/// Every catalog tool, store tools first.
pub fn catalog_tools(store: Arc<dyn VectorStore>, options: &CatalogOptions) -> Vec<Tool> {
    let presets = Arc::new(options.presets.clone());
    let mut tools: Vec<Tool> = StoreOp::ALL
        .iter()
        .map(|op| op.tool(Arc::clone(&store), Arc::clone(&presets)))
        .collect();
    tools.extend(
        AssistKind::ALL
            .iter()
            .map(|kind| kind.tool(options.assist.clone())),
    );
    tools
}

/// Builds the registry holding the full catalog.
pub fn build_registry(
    store: Arc<dyn VectorStore>,
    options: &CatalogOptions,
) -> Result<Arc<ToolRegistry>, RuntimeError> {
    let mut builder = RegistryBuilder::new();
    builder.register_all(catalog_tools(store, options))?;
    Ok(builder.build())
}

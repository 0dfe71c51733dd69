//! Immutable name → tool mapping, built once at boot.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::RuntimeError;
use crate::types::Tool;

/// Collects tools before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    tools: BTreeMap<String, Tool>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool. Fails if the name is already taken.
    pub fn register(&mut self, tool: Tool) -> Result<&mut Self, RuntimeError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(RuntimeError::DuplicateTool { name });
        }
        debug!(tool = %name, "tool registered");
        self.tools.insert(name, tool);
        Ok(self)
    }

    /// Adds every tool in `tools`, stopping at the first duplicate.
    pub fn register_all(
        &mut self,
        tools: impl IntoIterator<Item = Tool>,
    ) -> Result<&mut Self, RuntimeError> {
        for tool in tools {
            self.register(tool)?;
        }
        Ok(self)
    }

    /// Freezes the registry.
    pub fn build(self) -> Arc<ToolRegistry> {
        Arc::new(ToolRegistry { tools: self.tools })
    }
}

/// Read-only tool lookup shared by every transport.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Tool>,
}

impl ToolRegistry {
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// All tools, sorted by name.
    pub fn list(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

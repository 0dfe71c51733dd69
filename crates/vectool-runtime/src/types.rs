//! Tool entries and the handler trait.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use vectool_store::CallContext;
use vectool_types::{ToolDefinition, ToolError};

use crate::args::ToolArgs;

/// The code behind a tool.
///
/// Handlers run on their own task under the call's deadline; a handler that
/// overruns is dropped at its next `.await`.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Executes one call.
    async fn call(&self, ctx: &CallContext, args: ToolArgs) -> Result<Value, ToolError>;
}

/// A registered tool: metadata, cached input schema, optional deadline and handler.
#[derive(Clone)]
pub struct Tool {
    definition: ToolDefinition,
    input_schema: Value,
    timeout: Option<Duration>,
    handler: Arc<dyn ToolHandler>,
}

impl Tool {
    /// Creates a tool from its definition and handler.
    pub fn new(definition: ToolDefinition, handler: Arc<dyn ToolHandler>) -> Self {
        let input_schema = definition.input_schema();
        Self {
            definition,
            input_schema,
            timeout: None,
            handler,
        }
    }

    /// Declares a tool-specific deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn description(&self) -> &str {
        &self.definition.description
    }

    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    /// JSON Schema of the arguments, as published by both transports.
    pub fn input_schema(&self) -> &Value {
        &self.input_schema
    }

    /// Tool-specific deadline, if declared.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn handler(&self) -> Arc<dyn ToolHandler> {
        Arc::clone(&self.handler)
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.definition.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

//! Shared fixtures for runtime integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use vectool_runtime::{
    build_registry, CatalogOptions, Dispatcher, RegistryBuilder, RuntimeConfig, Tool, ToolArgs,
    ToolHandler,
};
use vectool_store::CallContext;
use vectool_store_memory::{MemoryStore, MemoryStoreOptions};
use vectool_types::{ToolArgument, ToolDefinition, ToolError};

/// Dispatcher over the full catalog backed by a fresh zero-latency store.
pub fn catalog_dispatcher(options: CatalogOptions) -> Dispatcher {
    let store = Arc::new(MemoryStore::with_options(MemoryStoreOptions {
        latency: Duration::ZERO,
        ..MemoryStoreOptions::default()
    }));
    let registry = build_registry(store, &options).expect("catalog registers");
    Dispatcher::new(registry, &RuntimeConfig::default())
}

/// Sleeps for `delay` without looking at its deadline.
pub struct Sleeper {
    pub delay: Duration,
}

#[async_trait]
impl ToolHandler for Sleeper {
    async fn call(&self, _ctx: &CallContext, _args: ToolArgs) -> Result<Value, ToolError> {
        tokio::time::sleep(self.delay).await;
        Ok(Value::String("woke".into()))
    }
}

/// Blocks its worker thread for `delay` without ever yielding.
pub struct Blocker {
    pub delay: Duration,
}

#[async_trait]
impl ToolHandler for Blocker {
    async fn call(&self, _ctx: &CallContext, _args: ToolArgs) -> Result<Value, ToolError> {
        std::thread::sleep(self.delay);
        Ok(Value::String("unblocked".into()))
    }
}

/// Always panics.
pub struct Panicker;

#[async_trait]
impl ToolHandler for Panicker {
    async fn call(&self, _ctx: &CallContext, _args: ToolArgs) -> Result<Value, ToolError> {
        panic!("handler exploded");
    }
}

/// Returns its arguments.
pub struct Echo;

#[async_trait]
impl ToolHandler for Echo {
    async fn call(&self, _ctx: &CallContext, args: ToolArgs) -> Result<Value, ToolError> {
        Ok(args.into_value())
    }
}

pub fn echo_tool() -> Tool {
    Tool::new(
        ToolDefinition::new("echo", "Echo arguments")
            .arg(ToolArgument::required("text", "string", "Text"))
            .arg(ToolArgument::optional("times", "integer", "Repeat count")),
        Arc::new(Echo),
    )
}

pub fn dispatcher_with(tools: Vec<Tool>, config: RuntimeConfig) -> Dispatcher {
    let mut builder = RegistryBuilder::new();
    builder.register_all(tools).expect("register");
    Dispatcher::new(builder.build(), &config)
}

//! # vectool-runtime
//!
//! Tool registry and dispatcher for vectool.
//! Holds the immutable tool catalog, enforces per-call deadlines and bounded
//! concurrency, and contains handler panics.
//!
//! Build the catalog with [`build_registry`], then route calls through
//! [`Dispatcher::invoke`].

pub mod args;
pub mod catalog;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod runtime_config;
pub mod scheduler;
pub mod types;

pub use args::ToolArgs;
pub use catalog::{
    build_registry, catalog_tools, AssistCommand, AssistKind, CatalogOptions, CollectionPreset,
    StoreOp,
};
pub use dispatcher::Dispatcher;
pub use error::RuntimeError;
pub use metrics::{ExecutionMetrics, MetricsSnapshot};
pub use registry::{RegistryBuilder, ToolRegistry};
pub use runtime_config::{RuntimeConfig, TimeoutPolicy};
pub use scheduler::{Scheduler, SchedulerConfig};
pub use types::{Tool, ToolHandler};

//! # vectool-config
//!
//! Configuration for vectool.
//! Supports layered config: defaults -> TOML file -> `VECTOOL_` env vars.

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AssistConfig, BackendConfig, CollectionPreset, CorsConfig, EmbeddingsConfig, LoggingConfig,
    ServerConfig, TimeoutConfig, VectoolConfig,
};

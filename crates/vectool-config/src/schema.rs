//! Configuration schema types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::loader::ConfigError;

/// Top-level vectool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VectoolConfig {
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,
    /// Cross-origin policy for the HTTP transport.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Call deadlines and concurrency.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    /// Name of the backend the tools talk to.
    #[serde(default = "default_backend_name")]
    pub default_backend: String,
    /// Known backends.
    #[serde(default = "default_backends")]
    pub backends: Vec<BackendConfig>,
    /// Named collection presets for `create_collection`.
    #[serde(default)]
    pub presets: HashMap<String, CollectionPreset>,
    /// External AI-assist executable.
    #[serde(default)]
    pub assist: AssistConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for VectoolConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            timeouts: TimeoutConfig::default(),
            default_backend: default_backend_name(),
            backends: default_backends(),
            presets: HashMap::new(),
            assist: AssistConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl VectoolConfig {
    /// Returns the backend named by `default_backend`.
    ///
    /// Fails when it is missing, disabled, or of a kind this build cannot serve.
    pub fn resolve_backend(&self) -> Result<&BackendConfig, ConfigError> {
        let backend = self
            .backends
            .iter()
            .find(|b| b.name == self.default_backend)
            .ok_or_else(|| ConfigError::UnknownBackend {
                name: self.default_backend.clone(),
            })?;
        if !backend.enabled {
            return Err(ConfigError::BackendDisabled {
                name: backend.name.clone(),
            });
        }
        if backend.kind != "memory" {
            return Err(ConfigError::UnsupportedBackend {
                name: backend.name.clone(),
                kind: backend.kind.clone(),
            });
        }
        Ok(backend)
    }
}

fn default_backend_name() -> String {
    "memory".to_string()
}

fn default_backends() -> Vec<BackendConfig> {
    vec![BackendConfig::default()]
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}

/// CORS policy. An empty origin list disables CORS handling entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `"*"` allows any.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Allowed request methods.
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,
    /// Allowed request headers; `"*"` allows any.
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,
    /// Preflight cache lifetime.
    #[serde(default = "default_cors_max_age")]
    pub max_age_secs: u64,
}

impl CorsConfig {
    /// Whether a CORS layer should be installed.
    pub fn is_enabled(&self) -> bool {
        !self.allowed_origins.is_empty()
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            max_age_secs: default_cors_max_age(),
        }
    }
}

fn default_cors_methods() -> Vec<String> {
    vec!["GET".into(), "POST".into(), "OPTIONS".into()]
}
fn default_cors_headers() -> Vec<String> {
    vec!["content-type".into()]
}
fn default_cors_max_age() -> u64 {
    3600
}

/// Call deadlines and concurrency limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Deadline for tools without an override, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub default_ms: u64,
    /// Per-tool deadline overrides, in milliseconds.
    #[serde(default)]
    pub per_tool: HashMap<String, u64>,
    /// How long shutdown waits for in-flight calls.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace_secs: u64,
    /// Maximum concurrently executing tool calls.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl TimeoutConfig {
    /// Returns the default deadline as a `Duration`.
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_ms)
    }

    /// Per-tool overrides as `Duration`s.
    pub fn per_tool_timeouts(&self) -> HashMap<String, Duration> {
        self.per_tool
            .iter()
            .map(|(tool, ms)| (tool.clone(), Duration::from_millis(*ms)))
            .collect()
    }

    /// Returns the shutdown grace period as a `Duration`.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_ms: default_timeout_ms(),
            per_tool: HashMap::new(),
            shutdown_grace_secs: default_shutdown_grace(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}
fn default_shutdown_grace() -> u64 {
    10
}
fn default_max_concurrent() -> usize {
    64
}

/// One storage backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Identifier referenced by `default_backend`.
    pub name: String,
    /// Backend implementation, e.g. `memory`.
    #[serde(default = "default_backend_name")]
    pub kind: String,
    /// Remote endpoint, for networked backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Credential, for networked backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Free-form backend options.
    #[serde(default)]
    pub options: HashMap<String, String>,
    /// Disabled backends cannot be selected.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Simulated connect/close latency.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Embedding simulation.
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
}

impl BackendConfig {
    /// Returns the simulated latency as a `Duration`.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            name: default_backend_name(),
            kind: default_backend_name(),
            url: None,
            api_key: None,
            options: HashMap::new(),
            enabled: default_enabled(),
            latency_ms: default_latency_ms(),
            embeddings: EmbeddingsConfig::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
fn default_latency_ms() -> u64 {
    5
}

/// Pseudo-embedding generation on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsConfig {
    /// Attach a simulated vector to documents inserted without one.
    #[serde(default)]
    pub simulate: bool,
    /// Vector length.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
}

impl EmbeddingsConfig {
    /// Dimension to simulate, if simulation is on.
    pub fn simulated_dimensions(&self) -> Option<usize> {
        self.simulate.then_some(self.dimensions)
    }
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            simulate: false,
            dimensions: default_dimensions(),
        }
    }
}

fn default_dimensions() -> usize {
    384
}

/// Type and description applied by `create_collection` when a preset is named.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionPreset {
    /// Collection type tag.
    #[serde(rename = "type", default = "default_collection_type")]
    pub kind: String,
    /// Collection description.
    #[serde(default)]
    pub description: String,
}

fn default_collection_type() -> String {
    "text".to_string()
}

/// External AI-assist executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Program to run.
    #[serde(default = "default_assist_command")]
    pub command: String,
    /// Arguments placed before `-p <prompt>`.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            command: default_assist_command(),
            args: Vec::new(),
        }
    }
}

fn default_assist_command() -> String {
    "gemini".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "vectool_runtime=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

//! Configuration loader (defaults + file + env merge).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;
use vectool_types::ToolError;

use crate::schema::VectoolConfig;

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),

    /// The configured config file does not exist.
    #[error("config file not found: {path}")]
    MissingFile { path: String },

    /// `default_backend` names no configured backend.
    #[error("default backend '{name}' is not configured")]
    UnknownBackend { name: String },

    /// `default_backend` names a disabled backend.
    #[error("backend '{name}' is disabled")]
    BackendDisabled { name: String },

    /// The backend kind is not built into this binary.
    #[error("backend '{name}' has unsupported kind '{kind}'")]
    UnsupportedBackend { name: String, kind: String },
}

impl From<ConfigError> for ToolError {
    fn from(e: ConfigError) -> Self {
        ToolError::fatal(e.to_string())
    }
}

/// Environment variable prefix; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "VECTOOL_";

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. TOML config file (if given; must exist)
/// 3. Environment variables (`VECTOOL_` prefix, `__` nesting)
pub fn load_config(config_path: Option<&str>) -> Result<VectoolConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(VectoolConfig::default()));

    if let Some(path) = config_path {
        if !Path::new(path).exists() {
            return Err(ConfigError::MissingFile {
                path: path.to_string(),
            });
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectool_types::ErrorKind;

    #[test]
    fn defaults_without_file() {
        figment::Jail::expect_with(|_jail| {
            let config = load_config(None).expect("defaults load");
            assert_eq!(config.default_backend, "memory");
            assert_eq!(config.timeouts.max_concurrent, 64);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("VECTOOL_SERVER__PORT", "9191");
            jail.set_env("VECTOOL_TIMEOUTS__DEFAULT_MS", "1500");
            let config = load_config(None).expect("load");
            assert_eq!(config.server.port, 9191);
            assert_eq!(config.timeouts.default_ms, 1500);
            Ok(())
        });
    }

    #[test]
    fn env_wins_over_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("vectool.toml", "[server]\nport = 7000\nhost = \"0.0.0.0\"\n")?;
            jail.set_env("VECTOOL_SERVER__PORT", "7001");
            let config = load_config(Some("vectool.toml")).expect("load");
            assert_eq!(config.server.port, 7001);
            assert_eq!(config.server.host, "0.0.0.0");
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn config_error_maps_to_fatal() {
        let err: ToolError = ConfigError::UnknownBackend { name: "x".into() }.into();
        assert_eq!(err.kind, ErrorKind::Fatal);
        assert!(err.message.contains("'x'"));
    }
}

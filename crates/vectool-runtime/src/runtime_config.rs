//! Configuration for the dispatcher.

use std::collections::HashMap;
use std::time::Duration;

/// Configuration for the dispatcher.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Deadline for tools without an override.
    pub default_timeout: Duration,
    /// Per-tool deadline overrides, keyed by tool name.
    pub per_tool_timeouts: HashMap<String, Duration>,
    /// Scheduler concurrency limit.
    pub max_concurrent: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(30),
            per_tool_timeouts: HashMap::new(),
            max_concurrent: 64,
        }
    }
}

/// Resolves the deadline of each call.
///
/// Precedence: configured per-tool override, then the tool's own declared
/// timeout, then the process-wide default.
#[derive(Debug, Clone)]
pub struct TimeoutPolicy {
    default: Duration,
    overrides: HashMap<String, Duration>,
}

impl TimeoutPolicy {
    /// Creates a policy from a default and per-tool overrides.
    pub fn new(default: Duration, overrides: HashMap<String, Duration>) -> Self {
        Self { default, overrides }
    }

    /// The process-wide default.
    pub fn default_timeout(&self) -> Duration {
        self.default
    }

    /// Deadline for `tool`, given the tool's declared timeout if any.
    pub fn for_tool(&self, tool: &str, declared: Option<Duration>) -> Duration {
        self.overrides
            .get(tool)
            .copied()
            .or(declared)
            .unwrap_or(self.default)
    }
}

impl From<&RuntimeConfig> for TimeoutPolicy {
    fn from(config: &RuntimeConfig) -> Self {
        Self::new(config.default_timeout, config.per_tool_timeouts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.default_timeout, Duration::from_secs(30));
        assert_eq!(cfg.max_concurrent, 64);
        assert!(cfg.per_tool_timeouts.is_empty());
    }

    #[test]
    fn override_beats_declared_beats_default() {
        let mut overrides = HashMap::new();
        overrides.insert("search".to_string(), Duration::from_millis(100));
        let policy = TimeoutPolicy::new(Duration::from_secs(1), overrides);

        assert_eq!(
            policy.for_tool("search", Some(Duration::from_secs(9))),
            Duration::from_millis(100)
        );
        assert_eq!(
            policy.for_tool("query", Some(Duration::from_secs(9))),
            Duration::from_secs(9)
        );
        assert_eq!(policy.for_tool("query", None), Duration::from_secs(1));
    }
}

//! Operator configuration.
//!
//! Layered lowest to highest: built-in defaults, `REGISTRY_*` environment
//! variables, then command-line flags.

use std::path::PathBuf;

use doc_registry::config::RegistryConfig;
use thiserror::Error;

use crate::cli::Cli;

/// Environment variable naming the state file.
pub const ENV_STATE_PATH: &str = "REGISTRY_STATE_PATH";
/// Environment variable holding the log filter directive.
pub const ENV_LOG: &str = "REGISTRY_LOG";
/// Environment variable bounding signatories per document.
pub const ENV_MAX_SIGNATORIES: &str = "REGISTRY_MAX_SIGNATORIES";

/// Default state file, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = "registry-state.json";
/// Default log filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable holds an unusable value.
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: &'static str, value: String },
}

/// Resolved operator configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminConfig {
    /// Path of the JSON state file.
    pub state_path: PathBuf,
    /// `tracing-subscriber` filter directive.
    pub log_filter: String,
    /// Upper bound on signatories per document.
    pub max_signatories: Option<usize>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(DEFAULT_STATE_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_signatories: None,
        }
    }
}

impl AdminConfig {
    /// Resolves defaults, then the process environment, then `cli`.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Ok(Self::default()
            .with_env_overrides(|var| std::env::var(var).ok())?
            .with_cli_overrides(cli))
    }

    /// Applies `REGISTRY_*` overrides read through `lookup`.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = lookup(ENV_STATE_PATH) {
            self.state_path = PathBuf::from(path);
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        if let Some(max) = lookup(ENV_MAX_SIGNATORIES) {
            let parsed = max.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: ENV_MAX_SIGNATORIES,
                value: max.clone(),
            })?;
            self.max_signatories = Some(parsed);
        }
        Ok(self)
    }

    /// Applies global command-line flags.
    #[must_use]
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.state {
            self.state_path = path.clone();
        }
        if let Some(filter) = &cli.log {
            self.log_filter = filter.clone();
        }
        if let Some(max) = cli.max_signatories {
            self.max_signatories = Some(max);
        }
        self
    }

    /// Registry tunables derived from this configuration.
    #[must_use]
    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig {
            max_signatories: self.max_signatories,
        }
    }
}

//! Configuration loader
//!
//! Layers an optional TOML file under environment overrides, e.g.
//! `REMATCH_LIMITS__MAX_RECORDS=64` or `REMATCH_BACKEND=rust_regex`.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::config::types::MatchConfig;
use crate::domain::ConfigError;

pub const DEFAULT_ENV_PREFIX: &str = "REMATCH";

/// Builds a [`MatchConfig`] from a file and the environment
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path; skipped when unset
    config_path: Option<PathBuf>,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Read `path` before the environment. The file must exist.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<MatchConfig, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: MatchConfig = builder
            .build()
            .and_then(|loaded| loaded.try_deserialize())
            .map_err(|err| ConfigError::Load(err.to_string()))?;

        config.validate()?;
        debug!(
            backend = ?config.backend,
            max_records = config.limits.max_records,
            "loaded match configuration"
        );
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

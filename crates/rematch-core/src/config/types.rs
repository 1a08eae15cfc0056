//! Configuration types
//!
//! Limits and defaults are passed explicitly into every operation; there is no
//! process-wide state.

use serde::{Deserialize, Serialize};

use crate::domain::{CapabilityFlags, ConfigError};

/// Hard ceilings a configuration may not exceed
pub const PATTERN_LENGTH_CEILING: usize = 16_384;
pub const RECORD_CEILING: usize = 3_200_000;
pub const TEXT_LENGTH_CEILING: usize = 104_857_600;

/// Capacity limits for one service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Longest input text accepted for matching
    pub max_text_length: usize,
    /// Longest raw or normalized pattern
    pub max_pattern_length: usize,
    /// Most match records a single session may hold
    pub max_records: usize,
    /// Longest buffer substitution or replacement may produce
    pub max_output_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_text_length: 8192,
            max_pattern_length: 1024,
            max_records: 1024,
            max_output_length: 8192,
        }
    }
}

/// Which matcher implementation compiled patterns run on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// PCRE2; supports backreferences
    #[default]
    Pcre2,
    /// The `regex` crate; backreferences are syntax errors
    RustRegex,
}

/// Complete configuration for a [`RegexService`](crate::RegexService)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub backend: Backend,
    pub limits: Limits,
    /// Options OR-ed into every compile request
    pub default_flags: CapabilityFlags,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            limits: Limits::default(),
            default_flags: CapabilityFlags::new().extended().newline_special(),
        }
    }
}

impl MatchConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig =
            toml::from_str(source).map_err(|err| ConfigError::Load(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|err| ConfigError::Load(err.to_string()))
    }

    /// Reject zero limits and limits above the hard ceilings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        let checks = [
            ("max_text_length", limits.max_text_length, TEXT_LENGTH_CEILING),
            ("max_pattern_length", limits.max_pattern_length, PATTERN_LENGTH_CEILING),
            ("max_records", limits.max_records, RECORD_CEILING),
            ("max_output_length", limits.max_output_length, TEXT_LENGTH_CEILING),
        ];

        for (name, value, ceiling) in checks {
            if value == 0 {
                return Err(ConfigError::Validation(format!("{} must be greater than 0", name)));
            }
            if value > ceiling {
                return Err(ConfigError::Validation(format!(
                    "{} of {} exceeds maximum size of {}",
                    name, value, ceiling
                )));
            }
        }
        Ok(())
    }
}

//! Regex Service Facade
//!
//! Provides one entry point for compiling patterns, collecting matches and
//! replacing text under a single [`MatchConfig`]. This enables:
//! - Explicit limits per service instead of process-wide state
//! - Swapping the matcher backend without touching callers
//! - One-shot convenience calls for simple use

use crate::application::compiler::{CompiledPattern, PatternCompiler};
use crate::application::aggregator::MatchAggregator;
use crate::application::replacer::{Replacement, ReplacementCoordinator};
use crate::config::{Backend, Limits, MatchConfig};
use crate::domain::{CapabilityFlags, CompileError, ConfigError, MatchError, MatchSession, Result};

/// Regex matching and replacement service
///
/// Holds a validated configuration. Compiled patterns are independent of the
/// service and can be reused across calls.
///
/// # Example
/// ```ignore
/// use rematch_core::{CapabilityFlags, RegexServiceBuilder};
///
/// let service = RegexServiceBuilder::new()
///     .with_default_flags(CapabilityFlags::new().extended().global())
///     .build()?;
///
/// let compiled = service.compile(b"black|Brown", CapabilityFlags::new().icase())?;
/// let replaced = service.replace(b"Mr Black and Mr Brown", &compiled, b"Blue")?;
/// assert_eq!(replaced.output(), b"Mr Blue and Mr Blue");
/// ```
#[derive(Debug, Clone)]
pub struct RegexService {
    config: MatchConfig,
}

impl Default for RegexService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RegexService {
    /// Create a service after validating `config`
    pub fn new(config: MatchConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(RegexService { config })
    }

    /// Create a service with the default configuration
    pub fn with_defaults() -> Self {
        RegexService { config: MatchConfig::default() }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Compile `pattern` with `flags` merged into the configured defaults
    pub fn compile(&self, pattern: &[u8], flags: CapabilityFlags) -> std::result::Result<CompiledPattern, CompileError> {
        PatternCompiler::new(&self.config).compile(pattern, flags)
    }

    /// Collect every match record of `compiled` in `text`
    pub fn match_all(&self, text: &[u8], compiled: &CompiledPattern) -> std::result::Result<MatchSession, MatchError> {
        MatchAggregator::new(self.config.limits).aggregate(text, compiled)
    }

    /// Replace every whole match of `compiled` in `text` with `template`
    pub fn replace(
        &self,
        text: &[u8],
        compiled: &CompiledPattern,
        template: &[u8],
    ) -> std::result::Result<Replacement, MatchError> {
        ReplacementCoordinator::new(self.config.limits).replace(text, compiled, template)
    }

    /// Compile and match in one call
    pub fn match_text(&self, text: &[u8], pattern: &[u8], flags: CapabilityFlags) -> Result<MatchSession> {
        let compiled = self.compile(pattern, flags)?;
        Ok(self.match_all(text, &compiled)?)
    }

    /// Compile and replace in one call
    pub fn replace_text(
        &self,
        text: &[u8],
        pattern: &[u8],
        template: &[u8],
        flags: CapabilityFlags,
    ) -> Result<Replacement> {
        let compiled = self.compile(pattern, flags)?;
        Ok(self.replace(text, &compiled, template)?)
    }
}

/// Builder for constructing a RegexService
///
/// Starts from the default configuration; `build` validates the result.
#[derive(Debug, Clone, Default)]
pub struct RegexServiceBuilder {
    config: MatchConfig,
}

impl RegexServiceBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the capacity limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.config.limits = limits;
        self
    }

    /// Set the flags OR-ed into every compile request
    pub fn with_default_flags(mut self, flags: CapabilityFlags) -> Self {
        self.config.default_flags = flags;
        self
    }

    /// Set the matcher backend
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Build the service
    ///
    /// Returns an error if the configured limits are invalid
    pub fn build(self) -> std::result::Result<RegexService, ConfigError> {
        RegexService::new(self.config)
    }
}

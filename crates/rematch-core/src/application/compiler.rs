//! Pattern Compiler
//!
//! Validates a raw pattern, resolves its flags, normalizes it and hands the
//! result to the configured matcher backend.

use tracing::{debug, warn};

use crate::application::normalizer::PatternNormalizer;
use crate::application::ports::Matcher;
use crate::config::MatchConfig;
use crate::domain::{CapabilityFlags, CompileError, FlagWarning, Pattern, ResolvedFlags};
use crate::infrastructure;

/// A pattern ready to run, with the flags it was compiled under
#[derive(Debug)]
pub struct CompiledPattern {
    pattern: Pattern,
    flags: ResolvedFlags,
    warnings: Vec<FlagWarning>,
    matcher: Box<dyn Matcher>,
}

impl CompiledPattern {
    /// Assemble a compiled pattern around an existing matcher.
    pub fn from_parts(pattern: Pattern, flags: ResolvedFlags, matcher: Box<dyn Matcher>) -> Self {
        CompiledPattern { pattern, flags, warnings: Vec::new(), matcher }
    }

    pub fn pattern(&self) -> &Pattern { &self.pattern }
    pub fn flags(&self) -> &ResolvedFlags { &self.flags }
    /// Options that were requested but dropped during flag resolution
    pub fn warnings(&self) -> &[FlagWarning] { &self.warnings }
    pub fn group_count(&self) -> usize { self.matcher.group_count() }
    pub fn matcher(&self) -> &dyn Matcher { self.matcher.as_ref() }
}

pub struct PatternCompiler<'a> {
    config: &'a MatchConfig,
}

impl<'a> PatternCompiler<'a> {
    pub fn new(config: &'a MatchConfig) -> Self {
        PatternCompiler { config }
    }

    pub fn compile(&self, raw: &[u8], requested: CapabilityFlags) -> Result<CompiledPattern, CompileError> {
        let max_len = self.config.limits.max_pattern_length;

        // 1. Validate raw pattern
        if raw.is_empty() {
            return Err(CompileError::EmptyPattern);
        }
        if raw.len() > max_len {
            return Err(CompileError::PatternTooLong { len: raw.len(), max: max_len });
        }

        // 2. Resolve flags against the configured defaults
        let (flags, warnings) = requested.union(self.config.default_flags).resolve();
        for warning in &warnings {
            warn!(pattern = %String::from_utf8_lossy(raw), "{}", warning);
        }

        // 3. Expand shorthands
        let normalized = PatternNormalizer::new(max_len).normalize(raw)?;

        // 4. Build the matcher
        let matcher = infrastructure::build_matcher(self.config.backend, &normalized, &flags)?;

        debug!(
            raw_len = raw.len(),
            normalized_len = normalized.len(),
            groups = matcher.group_count(),
            backend = ?self.config.backend,
            flags = %flags,
            "compiled pattern"
        );

        Ok(CompiledPattern {
            pattern: Pattern::new(raw, normalized),
            flags,
            warnings,
            matcher,
        })
    }
}

//! `regex` crate matcher adapter
//!
//! Linear-time matching over bytes. Unicode mode is off, so `\xHH` and `.`
//! work on single bytes. Backreferences are not supported and are reported
//! as syntax errors.

use std::fmt;

use regex::bytes::{Regex, RegexBuilder};

use crate::application::ports::{Matcher, MatcherFault};
use crate::domain::{CompileError, ResolvedFlags, Span};

pub struct RustRegexMatcher {
    source: String,
    regex: Regex,
}

impl RustRegexMatcher {
    pub fn new(source: &str, flags: &ResolvedFlags) -> Result<Self, CompileError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.icase())
            .multi_line(flags.newline_special())
            .dot_matches_new_line(!flags.newline_special())
            .unicode(false)
            .build()
            .map_err(|err| CompileError::Syntax { code: None, message: err.to_string() })?;

        Ok(RustRegexMatcher { source: source.to_string(), regex })
    }

    pub fn source(&self) -> &str { &self.source }
}

impl fmt::Debug for RustRegexMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RustRegexMatcher").field("source", &self.source).finish()
    }
}

impl Matcher for RustRegexMatcher {
    fn group_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    fn exec(&self, haystack: &[u8], slots: &mut [Option<Span>]) -> Result<bool, MatcherFault> {
        let Some(captures) = self.regex.captures(haystack) else {
            return Ok(false);
        };

        for (index, slot) in slots.iter_mut().enumerate() {
            *slot = captures.get(index).map(|m| Span::new(m.start(), m.end()));
        }
        Ok(true)
    }
}

//! PCRE2 matcher adapter
//!
//! Runs in non-UTF mode so patterns and subjects are arbitrary bytes.
//! Supports backreferences.
//!
//! Without `newline_special` a `$` must only match at the very end of the
//! subject. The crate exposes no dollar-end-only option, so such anchors are
//! rewritten to `\z` before the pattern is built.

use std::fmt;

use pcre2::bytes::{Regex, RegexBuilder};

use crate::application::ports::{Matcher, MatcherFault};
use crate::domain::{CompileError, ResolvedFlags, Span};
use crate::infrastructure::posix::copy_bracket;

pub struct Pcre2Matcher {
    source: String,
    regex: Regex,
}

impl Pcre2Matcher {
    pub fn new(source: &str, flags: &ResolvedFlags) -> Result<Self, CompileError> {
        let source = if flags.newline_special() { source.to_string() } else { dollar_end_only(source) };
        let regex = RegexBuilder::new()
            .caseless(flags.icase())
            .multi_line(flags.newline_special())
            .dotall(!flags.newline_special())
            .utf(false)
            .jit_if_available(true)
            .build(&source)
            .map_err(|err| CompileError::Syntax {
                code: Some(err.code()),
                message: err.to_string(),
            })?;

        Ok(Pcre2Matcher { source, regex })
    }

    pub fn source(&self) -> &str { &self.source }
}

/// Rewrite each unescaped `$` outside a bracket expression to `\z`.
fn dollar_end_only(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 4);
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '[' => copy_bracket(&mut chars, &mut out),
            '$' => out.push_str("\\z"),
            c => out.push(c),
        }
    }

    out
}

impl fmt::Debug for Pcre2Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pcre2Matcher").field("source", &self.source).finish()
    }
}

impl Matcher for Pcre2Matcher {
    fn group_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    fn exec(&self, haystack: &[u8], slots: &mut [Option<Span>]) -> Result<bool, MatcherFault> {
        let captures = match self.regex.captures(haystack) {
            Ok(Some(captures)) => captures,
            Ok(None) => return Ok(false),
            Err(err) => return Err(MatcherFault::new(err.to_string())),
        };

        for (index, slot) in slots.iter_mut().enumerate() {
            *slot = captures.get(index).map(|m| Span::new(m.start(), m.end()));
        }
        Ok(true)
    }
}

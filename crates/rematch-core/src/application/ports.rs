//! Application Ports
//!
//! The single-shot matcher is an external capability. Engines in this crate
//! only see it through [`Matcher`]; adapters live in `infrastructure`.

use std::fmt;

use thiserror::Error;

use crate::domain::{MatchError, Span};

/// An internal failure of the matcher itself (not "no match").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MatcherFault {
    message: String,
}

impl MatcherFault {
    pub fn new(message: impl Into<String>) -> Self {
        MatcherFault { message: message.into() }
    }

    pub fn message(&self) -> &str { &self.message }
}

impl From<MatcherFault> for MatchError {
    fn from(fault: MatcherFault) -> Self {
        MatchError::Fault { message: fault.message }
    }
}

/// A compiled pattern that can search a byte buffer once
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Capture groups in the pattern, not counting the whole-match slot.
    fn group_count(&self) -> usize;

    /// Search `haystack` for the leftmost match.
    ///
    /// `slots` has `group_count() + 1` entries. On a match every entry is
    /// overwritten: `Some` with offsets relative to `haystack` for slots that
    /// participated, `None` for those that did not. Returns `Ok(false)` when
    /// nothing matched.
    fn exec(&self, haystack: &[u8], slots: &mut [Option<Span>]) -> Result<bool, MatcherFault>;
}

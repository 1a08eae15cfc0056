//! Substitution Engine
//!
//! Byte-exact find/replace over an immutable buffer. The same primitive
//! expands pattern shorthands, expands backreferences in replacement
//! templates, and splices replacements into the final text.

use crate::domain::{CapacityError, Resource};

/// How an inserted replacement is framed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketMode {
    /// Insert the replacement as is
    Bare,
    /// Wrap in `[`...`]` unless the occurrence directly follows `[` or `|`
    Wrap,
}

/// How many occurrences are replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only the first occurrence at or after the start offset
    Local,
    /// Every occurrence, resuming right after each inserted replacement
    Global,
}

/// Find/replace with a bounded output size
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionEngine {
    max_len: usize,
    resource: Resource,
}

impl SubstitutionEngine {
    /// `resource` names the limit in errors raised by this engine.
    pub fn new(max_len: usize, resource: Resource) -> Self {
        SubstitutionEngine { max_len, resource }
    }

    pub fn max_len(&self) -> usize { self.max_len }

    /// Replace `search` in `input` starting the scan at `start`.
    ///
    /// Returns a copy of `input` when there is no occurrence. Fails when
    /// `search` is empty, or when `input` or the result would be longer than
    /// the engine's limit.
    pub fn substitute(
        &self,
        input: &[u8],
        search: &[u8],
        replacement: &[u8],
        brackets: BracketMode,
        scope: Scope,
        start: usize,
    ) -> Result<Vec<u8>, CapacityError> {
        if search.is_empty() {
            return Err(CapacityError::EmptySearch);
        }
        if input.len() > self.max_len {
            return Err(CapacityError::exceeded(self.resource, self.max_len, input.len()));
        }

        let mut cursor = start.min(input.len());
        let mut output = Vec::with_capacity(input.len());
        output.extend_from_slice(&input[..cursor]);

        while let Some(found) = find(&input[cursor..], search) {
            let at = cursor + found;
            output.extend_from_slice(&input[cursor..at]);

            // the byte before the occurrence is read from the output, so a
            // previous replacement counts as context
            let wrap = brackets == BracketMode::Wrap
                && !matches!(output.last(), Some(b'[') | Some(b'|'));
            let framing = if wrap { 2 } else { 0 };
            let rest = input.len() - (at + search.len());
            let needed = output.len() + framing + replacement.len() + rest;
            if needed > self.max_len {
                return Err(CapacityError::exceeded(self.resource, self.max_len, needed));
            }

            if wrap {
                output.push(b'[');
                output.extend_from_slice(replacement);
                output.push(b']');
            } else {
                output.extend_from_slice(replacement);
            }

            cursor = at + search.len();
            if scope == Scope::Local {
                break;
            }
        }

        output.extend_from_slice(&input[cursor..]);
        Ok(output)
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

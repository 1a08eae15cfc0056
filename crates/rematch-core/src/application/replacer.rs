//! Replacement Coordinator
//!
//! Aggregates matches, then splices an expanded template over every whole
//! match. Anchor-only matches at either end of the input append or prepend
//! the template once instead.

use std::borrow::Cow;

use serde::Serialize;
use tracing::debug;

use crate::application::aggregator::MatchAggregator;
use crate::application::compiler::CompiledPattern;
use crate::application::substitute::{BracketMode, Scope, SubstitutionEngine};
use crate::config::Limits;
use crate::domain::{CapacityError, MatchError, MatchRecord, Resource, SessionStatus};

/// The outcome of one replace call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    output: Vec<u8>,
    replacements: usize,
    status: SessionStatus,
}

impl Replacement {
    pub fn output(&self) -> &[u8] { &self.output }
    pub fn output_lossy(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.output) }
    pub fn into_output(self) -> Vec<u8> { self.output }
    /// Whole matches the template was written over
    pub fn replacements(&self) -> usize { self.replacements }
    /// `NoMatch` when the output is the unchanged input
    pub fn status(&self) -> SessionStatus { self.status }
}

#[derive(Debug, Clone, Copy)]
pub struct ReplacementCoordinator {
    aggregator: MatchAggregator,
    substitution: SubstitutionEngine,
}

impl ReplacementCoordinator {
    pub fn new(limits: Limits) -> Self {
        ReplacementCoordinator {
            aggregator: MatchAggregator::new(limits),
            substitution: SubstitutionEngine::new(limits.max_output_length, Resource::Output),
        }
    }

    pub fn replace(
        &self,
        input: &[u8],
        compiled: &CompiledPattern,
        template: &[u8],
    ) -> Result<Replacement, MatchError> {
        // 1. Aggregate
        let session = self.aggregator.aggregate(input, compiled)?;
        if session.whole_matches().next().is_none() {
            debug!("no whole match, input returned unchanged");
            return Ok(Replacement {
                output: input.to_vec(),
                replacements: 0,
                status: SessionStatus::NoMatch,
            });
        }

        // 2. Splice the template over each whole match
        let records = session.records();
        let mut output = input.to_vec();
        let mut delta: isize = 0;
        let mut replacements = 0;

        for (position, record) in records.iter().enumerate() {
            if !record.is_whole_match() {
                continue;
            }
            let groups = &records[position + 1..];

            if record.start() == output.len() {
                let expanded = self.expand_template(template, groups)?;
                self.check_output(output.len() + expanded.len())?;
                output.extend_from_slice(&expanded);
                replacements += 1;
                break;
            } else if record.start() == 0 && record.end() == 0 {
                let expanded = self.expand_template(template, groups)?;
                self.check_output(output.len() + expanded.len())?;
                let mut prefixed = expanded;
                prefixed.extend_from_slice(&output);
                output = prefixed;
                replacements += 1;
                break;
            } else if !record.span().is_empty() {
                let expanded = self.expand_template(template, groups)?;
                let at = record.start().checked_add_signed(-delta).unwrap_or(0);
                output = self.substitution.substitute(
                    &output,
                    record.text(),
                    &expanded,
                    BracketMode::Bare,
                    Scope::Local,
                    at,
                )?;
                delta += record.text().len() as isize - expanded.len() as isize;
                replacements += 1;
            }
        }

        debug!(replacements, output_len = output.len(), "replacement complete");
        Ok(Replacement { output, replacements, status: SessionStatus::Matched })
    }

    /// Expand `\1`..`\99` in `template` from the groups that follow a whole
    /// match in the record sequence.
    ///
    /// Groups run until the next whole-match record. References to groups
    /// that are absent expand to nothing. A reference takes two digits when
    /// two follow the backslash, so `\10` is group 10. The template is read
    /// once from left to right; inserted group text is never expanded again.
    pub fn expand_template(&self, template: &[u8], following: &[MatchRecord]) -> Result<Vec<u8>, CapacityError> {
        let max = self.substitution.max_len();
        if template.len() > max {
            return Err(CapacityError::exceeded(Resource::Output, max, template.len()));
        }

        let groups: Vec<&MatchRecord> = following.iter().take_while(|record| !record.is_whole_match()).collect();
        let group_text = |number: usize| {
            groups
                .iter()
                .find(|record| record.submatch() == number)
                .map(|record| record.text())
                .unwrap_or_default()
        };

        let mut expanded = Vec::with_capacity(template.len());
        let mut cursor = 0;
        while cursor < template.len() {
            match group_reference(&template[cursor..]) {
                Some((number, consumed)) => {
                    expanded.extend_from_slice(group_text(number));
                    cursor += consumed;
                }
                None => {
                    expanded.push(template[cursor]);
                    cursor += 1;
                }
            }
            if expanded.len() > max {
                return Err(CapacityError::exceeded(Resource::Output, max, expanded.len()));
            }
        }
        Ok(expanded)
    }

    fn check_output(&self, needed: usize) -> Result<(), CapacityError> {
        let max = self.substitution.max_len();
        if needed > max {
            return Err(CapacityError::exceeded(Resource::Output, max, needed));
        }
        Ok(())
    }
}

/// Parse a `\N` or `\NN` group reference at the start of `bytes`.
///
/// Returns the group number and the bytes consumed. `\0` is not a reference.
fn group_reference(bytes: &[u8]) -> Option<(usize, usize)> {
    let digit = |at: usize| bytes.get(at).filter(|b| b.is_ascii_digit()).map(|b| usize::from(b - b'0'));

    if bytes.first() != Some(&b'\\') {
        return None;
    }
    let first = digit(1).filter(|&d| d > 0)?;
    match digit(2) {
        Some(second) => Some((first * 10 + second, 3)),
        None => Some((first, 2)),
    }
}

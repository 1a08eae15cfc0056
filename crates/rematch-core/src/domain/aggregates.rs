//! Domain Aggregate Roots
//!
//! A [`MatchSession`] owns every [`MatchRecord`] produced by one run of a
//! compiled pattern over one input. Records are appended in
//! (occurrence, submatch) order while the session is built and are read-only
//! afterwards.

use std::borrow::Cow;

use serde::Serialize;

use crate::domain::flags::ResolvedFlags;
use crate::domain::value_objects::Span;

/// The result of one capture slot in one occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    occurrence: usize,
    submatch: usize,
    span: Span,
    text: Vec<u8>,
}

impl MatchRecord {
    pub fn new(occurrence: usize, submatch: usize, span: Span, text: Vec<u8>) -> Self {
        MatchRecord { occurrence, submatch, span, text }
    }

    /// 1-based index of the whole-pattern match this record belongs to
    pub fn occurrence(&self) -> usize { self.occurrence }
    /// 0 for the whole match, otherwise the capture group number
    pub fn submatch(&self) -> usize { self.submatch }
    pub fn span(&self) -> Span { self.span }
    pub fn start(&self) -> usize { self.span.start() }
    pub fn end(&self) -> usize { self.span.end() }
    pub fn text(&self) -> &[u8] { &self.text }
    pub fn text_lossy(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.text) }
    pub fn is_whole_match(&self) -> bool { self.submatch == 0 }
}

/// Whether a session found anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SessionStatus {
    Matched,
    NoMatch,
}

/// Everything one exec produced for one input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSession {
    text: Vec<u8>,
    records: Vec<MatchRecord>,
    occurrences: usize,
    groups: usize,
    flags: ResolvedFlags,
}

impl MatchSession {
    pub fn new(
        text: Vec<u8>,
        records: Vec<MatchRecord>,
        occurrences: usize,
        groups: usize,
        flags: ResolvedFlags,
    ) -> Self {
        MatchSession { text, records, occurrences, groups, flags }
    }

    /// Snapshot of the input the session ran over
    pub fn text(&self) -> &[u8] { &self.text }
    pub fn records(&self) -> &[MatchRecord] { &self.records }
    pub fn into_records(self) -> Vec<MatchRecord> { self.records }
    /// Number of whole-pattern matches found
    pub fn occurrence_count(&self) -> usize { self.occurrences }
    /// Capture groups declared by the pattern, per occurrence
    pub fn submatch_count(&self) -> usize { self.groups }
    pub fn flags(&self) -> &ResolvedFlags { &self.flags }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn status(&self) -> SessionStatus {
        if self.occurrences == 0 {
            SessionStatus::NoMatch
        } else {
            SessionStatus::Matched
        }
    }

    pub fn whole_matches(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().filter(|record| record.is_whole_match())
    }

    /// Capture group records of one occurrence, in submatch order.
    pub fn groups_of(&self, occurrence: usize) -> impl Iterator<Item = &MatchRecord> {
        self.records
            .iter()
            .filter(move |record| record.occurrence == occurrence && !record.is_whole_match())
    }
}

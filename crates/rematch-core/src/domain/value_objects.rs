//! Domain Value Objects
//!
//! Immutable types describing a pattern and the byte ranges it produces.

use std::borrow::Cow;

use serde::Serialize;

/// A half-open byte range `[start, end)` into a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span from the bounds as given. A span with `start > end` is
    /// kept as is so callers can reject it.
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn start(&self) -> usize { self.start }
    pub fn end(&self) -> usize { self.end }
    pub fn len(&self) -> usize { self.end.saturating_sub(self.start) }
    pub fn is_empty(&self) -> bool { self.start == self.end }

    /// The same span moved `offset` bytes to the right.
    pub fn shifted(&self, offset: usize) -> Self {
        Span { start: self.start + offset, end: self.end + offset }
    }
}

/// A pattern as written by the caller and as handed to the matcher
///
/// The normalized form is the raw form with shorthand classes and hex
/// escapes expanded. Both are kept so presentation code can show either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pattern {
    raw: Vec<u8>,
    normalized: Vec<u8>,
}

impl Pattern {
    pub fn new(raw: impl Into<Vec<u8>>, normalized: impl Into<Vec<u8>>) -> Self {
        Pattern { raw: raw.into(), normalized: normalized.into() }
    }

    pub fn raw(&self) -> &[u8] { &self.raw }
    pub fn normalized(&self) -> &[u8] { &self.normalized }
    pub fn raw_lossy(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.raw) }
    pub fn normalized_lossy(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.normalized) }
}

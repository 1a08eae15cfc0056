//! Infrastructure Layer - Matcher Adapters
//!
//! Concrete [`Matcher`](crate::application::Matcher) implementations and the
//! factory the compiler uses to pick one.

pub mod pcre2_matcher;
pub mod posix;
pub mod regex_matcher;

pub use pcre2_matcher::Pcre2Matcher;
pub use posix::basic_to_extended;
pub use regex_matcher::RustRegexMatcher;

use crate::application::ports::Matcher;
use crate::config::Backend;
use crate::domain::{CompileError, ResolvedFlags};

/// Build a matcher for the normalized `pattern` on the chosen backend.
///
/// Bytes above ASCII are written as `\xHH` escapes first, so any byte
/// pattern reaches the backend as a byte-level literal. Without the
/// `extended` flag the source is then read as POSIX basic syntax and
/// translated.
pub fn build_matcher(
    backend: Backend,
    pattern: &[u8],
    flags: &ResolvedFlags,
) -> Result<Box<dyn Matcher>, CompileError> {
    let escaped = escape_high_bytes(pattern);
    let source = if flags.extended() { escaped } else { basic_to_extended(&escaped) };

    match backend {
        Backend::Pcre2 => Ok(Box::new(Pcre2Matcher::new(&source, flags)?)),
        Backend::RustRegex => Ok(Box::new(RustRegexMatcher::new(&source, flags)?)),
    }
}

/// Write every byte of 0x80 and above as `\xHH`.
///
/// A backslash directly in front of such a byte escaped it as a literal, so
/// it is dropped in favour of the hex escape.
pub fn escape_high_bytes(pattern: &[u8]) -> String {
    let mut out = String::with_capacity(pattern.len());
    for &byte in pattern {
        if byte.is_ascii() {
            out.push(char::from(byte));
            continue;
        }
        let backslashes = out.bytes().rev().take_while(|&b| b == b'\\').count();
        if backslashes % 2 == 1 {
            out.pop();
        }
        out.push_str(&format!("\\x{:02x}", byte));
    }
    out
}

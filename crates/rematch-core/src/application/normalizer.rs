//! Pattern Normalizer
//!
//! Rewrites shorthand class tokens and `\xHH` literal escapes into syntax the
//! matcher accepts. Order matters: the `\p` class expands into hex escapes, so
//! classes run first.

use crate::application::substitute::{BracketMode, Scope, SubstitutionEngine};
use crate::domain::{CapacityError, Resource};

/// Shorthand tokens and their bracket-expression contents, applied in order
const SHORTHAND_CLASSES: [(&[u8], &[u8]); 12] = [
    (b"\\w", b"A-Za-z0-9_"),
    (b"\\W", b"^A-Za-z0-9_"),
    (b"\\a", b"A-Za-z"),
    (b"\\s", b" "),
    (b"\\t", b" \t"),
    (b"\\d", b"0-9"),
    (b"\\D", b"^0-9"),
    (b"\\l", b"a-z"),
    (b"\\p", b"\\x20-\\x7E"),
    (b"\\u", b"A-Z"),
    (b"\\r", b"\r"),
    (b"\\n", b"\n"),
];

/// Printable codes that `\xHH` escapes are expanded for
const HEX_LITERALS: std::ops::RangeInclusive<u8> = 33..=127;

#[derive(Debug, Clone, Copy)]
pub struct PatternNormalizer {
    substitution: SubstitutionEngine,
}

impl PatternNormalizer {
    /// `max_len` bounds the normalized pattern.
    pub fn new(max_len: usize) -> Self {
        PatternNormalizer {
            substitution: SubstitutionEngine::new(max_len, Resource::Pattern),
        }
    }

    pub fn normalize(&self, raw: &[u8]) -> Result<Vec<u8>, CapacityError> {
        let mut pattern = raw.to_vec();

        for (token, class) in SHORTHAND_CLASSES {
            pattern = self.substitution.substitute(
                &pattern,
                token,
                class,
                BracketMode::Wrap,
                Scope::Global,
                0,
            )?;
        }

        for code in HEX_LITERALS {
            let escape = format!("\\x{:x}", code);
            pattern = self.substitution.substitute(
                &pattern,
                escape.as_bytes(),
                &[code],
                BracketMode::Bare,
                Scope::Global,
                0,
            )?;
        }

        Ok(pattern)
    }
}

//! POSIX basic regular expression translation
//!
//! In basic syntax `\(`, `\)`, `\{`, `\}`, `\|`, `\+` and `\?` are operators
//! and their bare forms are literals. Both backends read extended syntax, so
//! basic patterns are rewritten before they are built.

use std::iter::Peekable;
use std::str::Chars;

const BASIC_OPERATORS: [char; 7] = ['(', ')', '{', '}', '|', '+', '?'];

/// Rewrite a basic-syntax pattern into the equivalent extended syntax.
pub fn basic_to_extended(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 8);
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) if BASIC_OPERATORS.contains(&next) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '[' => copy_bracket(&mut chars, &mut out),
            c if BASIC_OPERATORS.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }

    out
}

/// Copy a bracket expression through its closing `]`. A `]` right after the
/// opening `[` or `[^` is a member, as are `[:class:]` style elements.
pub(crate) fn copy_bracket(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    out.push('[');
    if chars.peek() == Some(&'^') {
        out.push('^');
        chars.next();
    }
    if chars.peek() == Some(&']') {
        out.push(']');
        chars.next();
    }

    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            ']' => return,
            '[' => {
                if let Some(&delimiter @ (':' | '.' | '=')) = chars.peek() {
                    out.push(delimiter);
                    chars.next();
                    copy_element(chars, out, delimiter);
                }
            }
            _ => {}
        }
    }
}

fn copy_element(chars: &mut Peekable<Chars<'_>>, out: &mut String, delimiter: char) {
    while let Some(c) = chars.next() {
        out.push(c);
        if c == delimiter && chars.peek() == Some(&']') {
            out.push(']');
            chars.next();
            return;
        }
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Escape-aware cursor primitives for the text-level rules.
//!
//! A backslash always consumes the byte after it; a `[...]` met while
//! searching for a `)` is skipped as a unit, so nothing inside a class can
//! affect paren depth. All offsets are byte offsets; regex metacharacters
//! are ASCII, so walking bytes never splits a multi-byte character.

/// Which matching delimiter to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delim {
    Paren,
    Bracket,
}

/// Find the index of the delimiter matching the opener at `open`.
///
/// Returns `None` when the text ends before depth returns to zero; the
/// caller abandons that candidate construct and keeps scanning.
pub fn matching_close(text: &str, open: usize, delim: Delim) -> Option<usize> {
    match delim {
        Delim::Paren => matching_paren(text.as_bytes(), open),
        Delim::Bracket => matching_bracket(text.as_bytes(), open),
    }
}

fn matching_paren(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' => {
                let close = matching_bracket(bytes, i)?;
                i = close + 1;
            }
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }

    None
}

fn matching_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let mut i = open + 1;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b']' => return Some(i),
            _ => i += 1,
        }
    }

    None
}

/// Index just past the escape sequence starting at `i` (which holds `\`).
///
/// Double-escaped text spends two bytes on the backslash itself, so the
/// escaped character sits one further along.
pub fn skip_escape(text: &str, i: usize, double_escaped: bool) -> usize {
    let width = if double_escaped && text.as_bytes().get(i + 1) == Some(&b'\\') { 3 } else { 2 };
    (i + width).min(text.len())
}

/// Whether `text` contains a `|` outside any group or character class.
pub fn has_top_level_alternation(text: &str, double_escaped: bool) -> bool {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i = skip_escape(text, i, double_escaped),
            b'[' => match matching_bracket(bytes, i) {
                Some(close) => i = close + 1,
                None => return false,
            },
            b'(' => {
                depth += 1;
                i += 1;
            }
            b')' => {
                depth -= 1;
                i += 1;
            }
            b'|' if depth == 0 => return true,
            _ => i += 1,
        }
    }

    false
}

/// Whether the byte at `i` begins a quantifier.
pub fn has_quantifier_after(text: &str, i: usize) -> bool {
    matches!(text.as_bytes().get(i), Some(b'*' | b'+' | b'?' | b'{'))
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;

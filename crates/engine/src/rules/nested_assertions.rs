// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lookarounds that trivially wrap a single assertion.
//!
//! Two shapes collapse to their content verbatim:
//! - `(?=^)`, `(?<!$)`, `(?!\b)` ... : the content is exactly one anchor.
//! - `(?=(?=a))`, `(?!(?!b))` ... : the content is exactly one lookaround
//!   of the same direction (either polarity; assertions are zero-width,
//!   so the outer wrap adds nothing).
//!
//! A quantifier after the outer group or a top-level `|` in the content
//! disqualifies the candidate. After a match the cursor jumps past the
//! whole outer construct so absorbed inner constructs are not re-examined.

use crate::finding::{Finding, Fix, FindingKind, Span};
use crate::rules::Rule;
use crate::scan::{self, Delim};
use crate::source::PatternSource;

const OPENERS: [&str; 4] = ["(?=", "(?!", "(?<=", "(?<!"];

pub struct NestedAssertions;

impl Rule for NestedAssertions {
    fn name(&self) -> &'static str {
        "nested-assertions"
    }

    fn description(&self) -> &'static str {
        "Trivially nested assertions in regular expressions"
    }

    fn run(&self, source: &PatternSource) -> Vec<Finding> {
        check(source)
    }
}

pub fn check(source: &PatternSource) -> Vec<Finding> {
    let text = source.text;
    if memchr::memmem::find(text.as_bytes(), b"(?").is_none() {
        return Vec::new();
    }

    let bytes = text.as_bytes();
    let mut findings = Vec::new();
    let mut i = 0;

    while i < text.len() {
        match bytes[i] {
            b'[' => match scan::matching_close(text, i, Delim::Bracket) {
                Some(close) => {
                    i = close + 1;
                    continue;
                }
                None => break,
            },
            b'\\' => {
                i = scan::skip_escape(text, i, source.double_escaped);
                continue;
            }
            _ => {}
        }

        let Some(opener) = opener_at(text, i) else {
            i += 1;
            continue;
        };

        let outer_start = i;
        let Some(close) = scan::matching_close(text, outer_start, Delim::Paren) else {
            i += 1;
            continue;
        };
        let outer_end = close + 1;

        if scan::has_quantifier_after(text, outer_end) {
            i += 1;
            continue;
        }

        let content = &text[outer_start + opener.len()..close];
        if scan::has_top_level_alternation(content, source.double_escaped) {
            i += 1;
            continue;
        }

        if is_trivial_anchor(content, source.double_escaped) {
            findings.push(finding(source, outer_start, outer_end, content));
            i = outer_end;
            continue;
        }

        if let Some(inner) = opener_at(content, 0) {
            let same_direction = is_lookahead(opener) == is_lookahead(inner);
            if same_direction
                && scan::matching_close(content, 0, Delim::Paren) == Some(content.len() - 1)
            {
                findings.push(finding(source, outer_start, outer_end, content));
            }
        }

        i = outer_end;
    }

    findings
}

fn finding(source: &PatternSource, start: usize, end: usize, content: &str) -> Finding {
    let range = Span::new(start, end).shift(source.base_offset);
    let kind = FindingKind::UnnecessaryNesting {
        outer: source.text[start..end].to_string(),
        inner: content.to_string(),
    };

    if source.fixable {
        Finding::with_fix(range, kind, Fix { range, text: content.to_string() })
    } else {
        Finding::new(range, kind)
    }
}

fn opener_at(text: &str, at: usize) -> Option<&'static str> {
    let rest = text.get(at..)?;
    OPENERS.into_iter().find(|opener| rest.starts_with(opener))
}

fn is_lookahead(opener: &str) -> bool {
    opener == "(?=" || opener == "(?!"
}

/// The four zero-width anchors, with the backslash doubled when the text
/// comes from a string literal. `(?!\B)` collapses to `\B` like every
/// other anchor: polarity is deliberately not inverted here, matching
/// long-standing behavior.
fn is_trivial_anchor(content: &str, double_escaped: bool) -> bool {
    match content {
        "^" | "$" => true,
        r"\b" | r"\B" => !double_escaped,
        r"\\b" | r"\\B" => double_escaped,
        _ => false,
    }
}

#[cfg(test)]
#[path = "nested_assertions_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Empty alternation branches (`a||b`, `(x|)`), which match zero
//! characters and usually indicate a mistake.
//!
//! Pure text scan: branches are found at every nesting level by walking
//! groups with the escape-aware scanner. A branch is empty only when it
//! spans zero characters; whitespace is a meaningful pattern atom. An
//! empty last branch is reported at the `|` that precedes it, any other
//! empty branch at its own start.

use memchr::memchr;

use crate::finding::{Finding, FindingKind, Span};
use crate::rules::Rule;
use crate::scan::{self, Delim};
use crate::source::PatternSource;

pub struct EmptyAlternatives;

impl Rule for EmptyAlternatives {
    fn name(&self) -> &'static str {
        "empty-alternatives"
    }

    fn description(&self) -> &'static str {
        "Empty alternatives in regular expressions"
    }

    fn run(&self, source: &PatternSource) -> Vec<Finding> {
        check(source)
    }
}

pub fn check(source: &PatternSource) -> Vec<Finding> {
    if memchr(b'|', source.text.as_bytes()).is_none() {
        return Vec::new();
    }

    let mut positions = Vec::new();
    scan_group(source.text, 0, source.text.len(), source.double_escaped, &mut positions);

    positions
        .into_iter()
        .map(|pos| {
            let range = Span::new(pos, pos + 1).shift(source.base_offset);
            Finding::new(range, FindingKind::EmptyAlternative)
        })
        .collect()
}

/// Collect empty-branch report positions for the group content in
/// `[group_start, group_end)`, recursing into nested groups.
fn scan_group(
    text: &str,
    group_start: usize,
    group_end: usize,
    double_escaped: bool,
    out: &mut Vec<usize>,
) {
    let bytes = text.as_bytes();
    let content_start = content_start(text, group_start, group_end);

    let mut pipes = Vec::new();
    let mut i = content_start;

    while i < group_end {
        match bytes[i] {
            b'(' => match scan::matching_close(text, i, Delim::Paren) {
                Some(close) if close < group_end => {
                    scan_group(text, i + 1, close, double_escaped, out);
                    i = close + 1;
                }
                _ => i += 1,
            },
            b'[' => match scan::matching_close(text, i, Delim::Bracket) {
                Some(close) if close < group_end => i = close + 1,
                _ => i += 1,
            },
            b'\\' => i = scan::skip_escape(text, i, double_escaped),
            b'|' => {
                pipes.push(i);
                i += 1;
            }
            _ => i += 1,
        }
    }

    let Some(&last_pipe) = pipes.last() else { return };

    let mut boundaries = Vec::with_capacity(pipes.len() + 1);
    let mut branch_start = content_start;
    for &pipe in &pipes {
        boundaries.push((branch_start, pipe));
        branch_start = pipe + 1;
    }
    boundaries.push((branch_start, group_end));

    for (index, &(start, end)) in boundaries.iter().enumerate() {
        if start != end {
            continue;
        }
        let is_last = index == boundaries.len() - 1;
        out.push(if is_last { last_pipe } else { start });
    }
}

/// Skip a group-opener prefix (`?:`, `?=`, `?!`, `?<=`, `?<!`,
/// `?<name>`) so the opener's characters never count as branch content.
fn content_start(text: &str, group_start: usize, group_end: usize) -> usize {
    let rest = text.get(group_start..group_end).unwrap_or("");

    if rest.starts_with("?<=") || rest.starts_with("?<!") {
        return group_start + 3;
    }
    if rest.starts_with("?:") || rest.starts_with("?=") || rest.starts_with("?!") {
        return group_start + 2;
    }
    if rest.starts_with("?<") {
        let bytes = text.as_bytes();
        let mut i = group_start + 2;
        while i < group_end {
            match bytes[i] {
                b'\\' => i += 2,
                b'>' => return i + 1,
                _ => i += 1,
            }
        }
    }

    group_start
}

#[cfg(test)]
#[path = "empty_alternatives_tests.rs"]
mod tests;

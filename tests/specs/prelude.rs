// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use rexlint::{Finding, FindingKind, PatternSource, Span, analyze};

/// Analyze a regex literal. The pattern starts at host offset 0 and the
/// flags directly after it, so pattern findings index into `text` and
/// flag findings index into `flags` shifted by `text.len()`.
pub fn findings(text: &str, flags: &str) -> Vec<Finding> {
    analyze(&PatternSource::literal(text, flags, 0, text.len()))
}

/// Analyze a string-literal constructor argument.
pub fn string_findings(text: &str, flags: &str) -> Vec<Finding> {
    analyze(&PatternSource::string_argument(text, flags, 0, text.len()))
}

pub fn kinds(text: &str, flags: &str) -> Vec<FindingKind> {
    findings(text, flags).into_iter().map(|f| f.kind).collect()
}

/// Apply every pattern-range fix to `text`, rightmost first so earlier
/// ranges stay valid.
pub fn fixed_pattern(text: &str, flags: &str) -> String {
    let mut fixes: Vec<_> = findings(text, flags)
        .into_iter()
        .filter_map(|f| f.fix)
        .filter(|fix| fix.range.end <= text.len())
        .collect();
    fixes.sort_by_key(|fix| std::cmp::Reverse(fix.range.start));

    let mut result = text.to_string();
    for fix in fixes {
        result.replace_range(fix.range.start..fix.range.end, &fix.text);
    }
    result
}

/// Apply every flags-range fix to `flags`.
pub fn fixed_flags(text: &str, flags: &str) -> String {
    let base = text.len();
    let mut fixes: Vec<_> = findings(text, flags)
        .into_iter()
        .filter_map(|f| f.fix)
        .filter(|fix| fix.range.start >= base)
        .collect();
    fixes.sort_by_key(|fix| std::cmp::Reverse(fix.range.start));

    let mut result = flags.to_string();
    for fix in fixes {
        result.replace_range(fix.range.start - base..fix.range.end - base, &fix.text);
    }
    result
}

pub fn assert_clean(text: &str, flags: &str) {
    let found = findings(text, flags);
    assert!(found.is_empty(), "expected no findings for /{text}/{flags}, got {found:?}");
}

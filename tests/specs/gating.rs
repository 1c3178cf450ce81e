// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for how findings gate each other.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use similar_asserts::assert_eq;

use crate::prelude::*;

#[test]
fn flag_problems_silence_every_pattern_rule() {
    // `a||b` would report an empty alternative, but the flags are bad.
    let found = findings("a||b", "q");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, FindingKind::InvalidFlag { flag: 'q' });
}

#[test]
fn flag_problems_silence_the_pattern_parse() {
    let found = findings("(", "uv");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, FindingKind::ConflictingFlags);
}

#[test]
fn a_parse_failure_reports_exactly_once() {
    // The unclosed group also contains an empty alternative and a nested
    // quantifier candidate; none of that is reported.
    let found = findings("((?:a?)+|", "");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, FindingKind::InvalidPattern);
    assert_eq!(found[0].range, Span { start: 0, end: 9 });
    assert!(found[0].fix.is_none());
}

#[test]
fn string_constructor_arguments_gate_the_same_way() {
    // As in `RegExp("(")`.
    let found = string_findings("(", "");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, FindingKind::InvalidPattern);
}

#[test]
fn rules_accumulate_on_valid_patterns() {
    // An empty alternative and an unused flag in one occurrence.
    let found = findings("1||2", "i");
    let codes: Vec<_> = found.iter().map(|f| f.kind.code()).collect();
    assert_eq!(codes, vec!["empty_alternative", "unused_ignore_case"]);
}

#[test]
fn dynamic_sources_report_without_fixes() {
    let source = PatternSource::literal("(?:a?)+", "", 0, 7).without_fixes();
    let found = analyze(&source);
    assert_eq!(found.len(), 1);
    assert!(found[0].fix.is_none());
}

#[test]
fn string_sources_analyze_the_effective_pattern() {
    // `\\d` is one escape once the string literal is decoded; treating
    // the pair as two would misparse the quantifier nesting.
    let found = string_findings(r"(?:\\d+)*", "");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].fix.as_ref().unwrap().text, r"\\d*");
}

#[test]
fn offsets_shift_into_host_coordinates() {
    // As in `/a||b/i` at the start of a file: pattern at 1, flags at 6.
    let source = PatternSource::literal("a||b", "i", 1, 6);
    let found = analyze(&source);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].range, Span { start: 3, end: 4 });
    assert_eq!(found[1].range, Span { start: 6, end: 7 });
}

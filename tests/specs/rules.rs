// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end detection specs, one section per rule.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use similar_asserts::assert_eq;

use crate::prelude::*;

// =============================================================================
// EMPTY ALTERNATIVES
// =============================================================================

#[test]
fn empty_alternative_between_branches() {
    let found = findings("a||b", "");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, FindingKind::EmptyAlternative);
    assert_eq!(found[0].range, Span { start: 2, end: 3 });
}

#[test]
fn empty_alternative_inside_a_group() {
    assert_eq!(kinds("(x|)", ""), vec![FindingKind::EmptyAlternative]);
}

#[test]
fn whitespace_branches_are_not_empty() {
    assert_clean("a| |b", "");
}

// =============================================================================
// NESTED ASSERTIONS
// =============================================================================

#[test]
fn lookahead_around_an_anchor() {
    let found = findings("(?=^)a", "");
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].kind,
        FindingKind::UnnecessaryNesting { outer: "(?=^)".to_string(), inner: "^".to_string() }
    );
}

#[test]
fn doubled_boundary_in_a_string_source() {
    let found = string_findings(r"(?!\\b)x", "");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].fix.as_ref().unwrap().text, r"\\b");
}

#[test]
fn anchor_with_content_is_meaningful() {
    assert_clean("(?=^a)", "");
}

// =============================================================================
// LOOKAROUND ASSERTIONS
// =============================================================================

#[test]
fn trailing_lookahead_merges_into_its_parent() {
    assert_eq!(fixed_pattern("(?=a(?=b))", ""), "(?=ab)");
}

#[test]
fn leading_lookbehind_merges_into_its_parent() {
    assert_eq!(fixed_pattern("(?<=(?<=a)b)", ""), "(?<=ab)");
}

#[test]
fn negative_inner_lookahead_is_meaningful() {
    assert_clean("(?!a(?!b))", "");
}

#[test]
fn opposite_directions_never_merge() {
    assert_clean("(?=a(?<=b))", "");
    assert_clean("(?<=(?=a)b)", "");
}

#[test]
fn directly_nested_lookaheads_trip_both_collapses() {
    // The outer wrapper is trivial and the inner one is absorbed; both
    // reports describe the same simplification.
    let found = findings("(?=(?=a))", "");
    assert_eq!(found.len(), 2);
}

// =============================================================================
// NESTED QUANTIFIERS
// =============================================================================

#[test]
fn optional_under_plus_collapses_to_star() {
    let found = findings("(?:a?)+", "");
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].kind,
        FindingKind::NestedQuantifiers {
            original: "(?:a?)+".to_string(),
            replacement: "a*".to_string(),
        }
    );
    assert_eq!(fixed_pattern("(?:a?)+", ""), "a*");
}

#[test]
fn capturing_groups_never_collapse() {
    assert_clean("(a?)+", "");
}

#[test]
fn mismatched_greediness_never_collapses() {
    assert_clean("(?:a??)+", "");
}

// =============================================================================
// SET OPERANDS
// =============================================================================

#[test]
fn disjoint_intersection_is_always_empty() {
    let found = findings(r"[\w&&\s]", "v");
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].kind,
        FindingKind::IntersectionDisjoint { left: r"\w".to_string(), right: r"\s".to_string() }
    );
    assert_eq!(fixed_pattern(r"[\w&&\s]", "v"), "[^^]");
}

#[test]
fn subset_intersection_keeps_the_subset() {
    assert_eq!(fixed_pattern(r"[\w&&\d]", "v"), r"[\d]");
    assert_eq!(fixed_pattern("[[a-z]&&[a-m]]", "v"), "[a-m]");
}

#[test]
fn disjoint_subtraction_keeps_the_left_operand() {
    assert_eq!(fixed_pattern("[[a-z]--[0-9]]", "v"), "[a-z]");
}

#[test]
fn subset_subtraction_is_always_empty() {
    assert_eq!(fixed_pattern(r"[\d--\w]", "v"), "[^^]");
}

#[test]
fn set_operators_are_plain_characters_without_the_v_flag() {
    assert_clean(r"[\w&&\s]", "");
}

// =============================================================================
// UNUSED FLAGS
// =============================================================================

#[test]
fn ignore_case_on_a_letterless_pattern() {
    let found = findings("123", "i");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, FindingKind::UnusedFlag { flag: 'i' });
    // The flag sits right after the three pattern bytes.
    assert_eq!(found[0].range, Span { start: 3, end: 4 });
    assert_eq!(fixed_flags("123", "i"), "");
}

#[test]
fn multiline_without_anchors_and_dot_all_without_dots() {
    assert_eq!(
        kinds("abc", "gms"),
        vec![FindingKind::UnusedFlag { flag: 'm' }, FindingKind::UnusedFlag { flag: 's' }]
    );
    assert_eq!(fixed_flags("abc", "gms"), "g");
}

#[test]
fn used_flags_stay() {
    assert_clean("a.c", "is");
    assert_clean("^x", "m");
}

// =============================================================================
// VALIDITY
// =============================================================================

#[test]
fn unparsable_pattern_reports_once_over_the_whole_text() {
    let found = findings("(", "");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, FindingKind::InvalidPattern);
    assert_eq!(found[0].range, Span { start: 0, end: 1 });
}

#[test]
fn unknown_and_duplicate_flags_are_reported() {
    assert_eq!(
        kinds("a", "gqg"),
        vec![
            FindingKind::InvalidFlag { flag: 'q' },
            FindingKind::DuplicateFlag { flag: 'g' },
        ]
    );
}

#[test]
fn unicode_modes_are_mutually_exclusive() {
    assert_eq!(kinds("a", "uv"), vec![FindingKind::ConflictingFlags]);
}

#[test]
fn everyday_patterns_are_clean() {
    assert_clean(r"^\d{4}-\d{2}-\d{2}$", "");
    assert_clean(r"[a-z]+(?:-[a-z]+)*", "g");
    assert_clean(r"(?<year>\d{4})", "u");
}

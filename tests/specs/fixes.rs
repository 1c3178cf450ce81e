// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for fix text: applying a fix yields the simplified pattern, and
//! the simplified pattern is clean on re-analysis.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use similar_asserts::assert_eq;

use crate::prelude::*;

fn assert_fixes_to(text: &str, flags: &str, expected: &str) {
    let fixed = fixed_pattern(text, flags);
    assert_eq!(fixed, expected, "fixing /{text}/{flags}");
    assert_clean(&fixed, flags);
}

#[test]
fn nested_assertion_fixes_settle() {
    assert_fixes_to("(?=^)", "", "^");
    assert_fixes_to("(?!$)x", "", "$x");
    assert_fixes_to(r"(?<=\b)a", "", r"\ba");
}

#[test]
fn lookaround_fixes_settle() {
    assert_fixes_to("(?=a(?=b))", "", "(?=ab)");
    assert_fixes_to("(?<=(?<=x)y)z", "", "(?<=xy)z");
}

#[test]
fn quantifier_fixes_settle() {
    assert_fixes_to("(?:a?)+", "", "a*");
    assert_fixes_to("x(?:b+)*y", "", "xb*y");
    assert_fixes_to(r"(?:\d+)+", "", r"\d+");
}

#[test]
fn set_operand_fixes_settle() {
    assert_fixes_to("[[a-z]--[0-9]]", "v", "[a-z]");
    assert_fixes_to(r"[\w&&\d]", "v", r"[\d]");
}

#[test]
fn multiple_fixes_apply_together() {
    assert_fixes_to("(?=^)(?:a+)+", "", "^a+");
}

#[test]
fn fix_ranges_equal_report_ranges() {
    for (text, flags) in [("(?=^)", ""), ("(?:a?)+", ""), (r"[\d--\w]", "v")] {
        for finding in findings(text, flags) {
            let fix = finding.fix.expect("fixable finding");
            assert_eq!(fix.range, finding.range, "for /{text}/{flags}");
        }
    }
}

#[test]
fn flag_fix_deletes_only_the_flag() {
    assert_eq!(fixed_flags("[0-9]+", "gi"), "g");
    assert_eq!(fixed_pattern("[0-9]+", "gi"), "[0-9]+");
}

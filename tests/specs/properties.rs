// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Property-based specs over arbitrary pattern text.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;

use crate::prelude::*;

proptest! {
    /// Analysis always terminates with in-bounds ranges, whatever bytes
    /// the host hands over.
    #[test]
    fn ranges_stay_inside_the_occurrence(text in ".{0,40}", flags in "[a-z]{0,4}") {
        for finding in findings(&text, &flags) {
            prop_assert!(finding.range.start <= finding.range.end);
            prop_assert!(finding.range.end <= text.len() + flags.len());
            if let Some(fix) = finding.fix {
                prop_assert!(fix.range.end <= text.len() + flags.len());
            }
        }
    }

    /// No pipe, no empty-alternative finding.
    #[test]
    fn empty_alternatives_need_a_pipe(text in "[^|]{0,40}") {
        for finding in findings(&text, "") {
            prop_assert_ne!(finding.kind.code(), "empty_alternative");
        }
    }

    /// A bad flag character gates everything down to flag findings.
    #[test]
    fn invalid_flags_always_win(text in ".{0,20}") {
        for finding in findings(&text, "z") {
            prop_assert_eq!(finding.kind.code(), "invalid_flag");
        }
    }

    /// Collapsing a generated quantifier pair settles in one pass.
    #[test]
    fn quantifier_fixes_are_idempotent(atom in "[a-z]", inner in "[?*+]", outer in "[*+]") {
        let text = format!("(?:{atom}{inner}){outer}");
        let fixed = fixed_pattern(&text, "");
        for finding in findings(&fixed, "") {
            prop_assert_ne!(finding.kind.code(), "nested_quantifiers");
        }
    }

    /// String-literal doubling never changes what gets reported, only
    /// where.
    #[test]
    fn doubling_preserves_finding_kinds(text in r"[a-z|()?*+\\]{0,20}") {
        let plain: Vec<_> =
            findings(&text, "").into_iter().map(|f| f.kind.code()).collect();
        let doubled_text = text.replace('\\', "\\\\");
        let doubled: Vec<_> =
            string_findings(&doubled_text, "").into_iter().map(|f| f.kind.code()).collect();
        prop_assert_eq!(plain, doubled);
    }
}

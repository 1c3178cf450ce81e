// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flags validation and structural pattern validation.
//!
//! Flag checks run over the raw flags text: unknown characters, repeats,
//! and the mutually exclusive `u`/`v` pair. Any flag finding gates the
//! rest of the engine. A pattern that fails the structural parse yields a
//! single finding over the whole pattern; no fix is offered for either
//! class of problem.

use crate::finding::{Finding, FindingKind, Span};
use crate::parser::{self, Flags};
use crate::rules::Rule;
use crate::source::{EffectivePattern, PatternSource};

pub struct Validity;

impl Rule for Validity {
    fn name(&self) -> &'static str {
        "validity"
    }

    fn description(&self) -> &'static str {
        "Syntactically invalid regular expressions"
    }

    fn run(&self, source: &PatternSource) -> Vec<Finding> {
        check(source)
    }
}

pub fn check(source: &PatternSource) -> Vec<Finding> {
    let flag_findings = check_flags(source);
    if !flag_findings.is_empty() {
        return flag_findings;
    }

    let effective = EffectivePattern::new(source.text, source.double_escaped);
    let flags = Flags::parse(source.flags);
    match parser::parse(effective.text(), flags) {
        Ok(_) => Vec::new(),
        Err(error) => {
            tracing::debug!(%error, "pattern failed structural parse");
            let range = Span::new(0, source.text.len()).shift(source.base_offset);
            vec![Finding::new(range, FindingKind::InvalidPattern)]
        }
    }
}

/// Vet the flags text alone. Reports every bad flag character, in order.
pub fn check_flags(source: &PatternSource) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen: Vec<char> = Vec::new();
    let mut unicode_seen = false;

    for (i, flag) in source.flags.char_indices() {
        let range = Span::new(i, i + flag.len_utf8()).shift(source.flags_offset);

        if !Flags::VALID.contains(&flag) {
            findings.push(Finding::new(range, FindingKind::InvalidFlag { flag }));
            continue;
        }
        if seen.contains(&flag) {
            findings.push(Finding::new(range, FindingKind::DuplicateFlag { flag }));
            continue;
        }
        seen.push(flag);

        // `u` and `v` select incompatible modes; the later one is flagged.
        if flag == 'u' || flag == 'v' {
            if unicode_seen {
                findings.push(Finding::new(range, FindingKind::ConflictingFlags));
            }
            unicode_seen = true;
        }
    }

    findings
}

#[cfg(test)]
#[path = "validity_tests.rs"]
mod tests;

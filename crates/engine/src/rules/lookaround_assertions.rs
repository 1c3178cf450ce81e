// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Positive lookarounds absorbed by the enclosing lookaround.
//!
//! Inside a lookahead, a positive lookahead that closes the content —
//! `(?=a(?=b))` — asserts nothing the enclosing one couldn't: the inner
//! wrapper drops and its content joins the concatenation, `(?=ab)`.
//! Symmetrically for a positive lookbehind that opens a lookbehind's
//! content: `(?<=(?<=a)b)` becomes `(?<=ab)`.
//!
//! The inner assertion must be positive and same-direction; a negative
//! inner assertion (`(?!a(?!b))`) changes meaning if unwrapped, and
//! opposite directions never merge. The report and the fix cover the
//! inner assertion only.

use crate::finding::{Finding, Fix, FindingKind};
use crate::parser::{self, Alternation, Flags, Group, GroupKind, Node, Pattern};
use crate::rules::Rule;
use crate::source::{EffectivePattern, PatternSource};

pub struct LookaroundAssertions;

impl Rule for LookaroundAssertions {
    fn name(&self) -> &'static str {
        "lookaround-assertions"
    }

    fn description(&self) -> &'static str {
        "Unnecessary boundary lookaround assertions"
    }

    fn run(&self, source: &PatternSource) -> Vec<Finding> {
        check(source)
    }
}

pub fn check(source: &PatternSource) -> Vec<Finding> {
    let effective = EffectivePattern::new(source.text, source.double_escaped);
    let flags = Flags::parse(source.flags);
    match parser::parse(effective.text(), flags) {
        Ok(pattern) => check_parsed(source, &effective, &pattern),
        Err(_) => Vec::new(),
    }
}

pub(crate) fn check_parsed(
    source: &PatternSource,
    effective: &EffectivePattern,
    pattern: &Pattern,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    visit_alternation(&pattern.alternation, source, effective, &mut findings);
    findings
}

fn visit_alternation(
    alternation: &Alternation,
    source: &PatternSource,
    effective: &EffectivePattern,
    out: &mut Vec<Finding>,
) {
    for branch in &alternation.branches {
        for element in &branch.elements {
            visit_node(element, false, source, effective, out);
        }
    }
}

fn visit_node(
    node: &Node,
    quantified: bool,
    source: &PatternSource,
    effective: &EffectivePattern,
    out: &mut Vec<Finding>,
) {
    match node {
        Node::Group(group) => {
            if !quantified {
                inspect(group, source, effective, out);
            }
            visit_alternation(&group.body, source, effective, out);
        }
        Node::Quantifier(quantifier) => {
            visit_node(&quantifier.element, true, source, effective, out)
        }
        Node::Class(_) | Node::Assertion(_) | Node::Atom(_) => {}
    }
}

fn inspect(
    outer: &Group,
    source: &PatternSource,
    effective: &EffectivePattern,
    out: &mut Vec<Finding>,
) {
    if !outer.kind.is_lookaround() {
        return;
    }
    let [branch] = outer.body.branches.as_slice() else {
        return;
    };

    // The absorbable assertion sits at the content boundary the
    // direction looks toward: last element for lookahead, first for
    // lookbehind.
    let (candidate, behind) = match outer.kind {
        GroupKind::Lookahead { .. } => (branch.elements.last(), false),
        GroupKind::Lookbehind { .. } => (branch.elements.first(), true),
        _ => return,
    };
    let Some(Node::Group(inner)) = candidate else {
        return;
    };

    let absorbable = match inner.kind {
        GroupKind::Lookahead { negate: false } => !behind,
        GroupKind::Lookbehind { negate: false } => behind,
        _ => false,
    };
    if !absorbable || inner.body.branches.len() != 1 {
        return;
    }

    let range = effective.to_source(inner.span).shift(source.base_offset);
    let content = effective.slice_source(source.text, inner.body.span).to_string();
    let kind = if behind {
        FindingKind::UnnecessaryLookbehind { inner: content.clone() }
    } else {
        FindingKind::UnnecessaryLookahead { inner: content.clone() }
    };

    out.push(if source.fixable {
        Finding::with_fix(range, kind, Fix { range, text: content })
    } else {
        Finding::new(range, kind)
    });
}

#[cfg(test)]
#[path = "lookaround_assertions_tests.rs"]
mod tests;

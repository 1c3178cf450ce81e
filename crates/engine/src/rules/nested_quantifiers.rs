// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Nested simple quantifiers that collapse to one.
//!
//! A simple quantifier (`?`, `*`, `+`) wrapping a non-capturing group
//! whose single alternative holds exactly one simply-quantified element
//! reduces by the combination table: `(?:a?)+` is `a*`, `(?:a+)*` is
//! `a*`, and so on. Bounded `{m,n}` forms, mismatched greediness, and any
//! pair with `?` on the outside do not reduce. Capturing groups are left
//! alone: unwrapping one would renumber captures.

use crate::finding::{Finding, Fix, FindingKind};
use crate::parser::{self, Alternation, Flags, GroupKind, Node, Pattern, Quantifier};
use crate::rules::Rule;
use crate::source::{EffectivePattern, PatternSource};

pub struct NestedQuantifiers;

impl Rule for NestedQuantifiers {
    fn name(&self) -> &'static str {
        "nested-quantifiers"
    }

    fn description(&self) -> &'static str {
        "Trivially nested quantifiers in regular expressions"
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
            visit_node(element, source, effective, out);
        }
    }
}

fn visit_node(
    node: &Node,
    source: &PatternSource,
    effective: &EffectivePattern,
    out: &mut Vec<Finding>,
) {
    match node {
        Node::Quantifier(quantifier) => {
            inspect(quantifier, source, effective, out);
            visit_node(&quantifier.element, source, effective, out);
        }
        Node::Group(group) => visit_alternation(&group.body, source, effective, out),
        Node::Class(_) | Node::Assertion(_) | Node::Atom(_) => {}
    }
}

fn inspect(
    outer: &Quantifier,
    source: &PatternSource,
    effective: &EffectivePattern,
    out: &mut Vec<Finding>,
) {
    let Some(outer_simple) = simple_quantifier(outer) else { return };

    let Node::Group(group) = &*outer.element else { return };
    if group.kind != GroupKind::NonCapturing {
        return;
    }
    let [branch] = group.body.branches.as_slice() else { return };
    let [Node::Quantifier(inner)] = branch.elements.as_slice() else {
        return;
    };

    let Some(inner_simple) = simple_quantifier(inner) else { return };
    if inner.greedy != outer.greedy {
        return;
    }
    let Some(merged) = combine(inner_simple, outer_simple) else { return };

    let atom_raw = effective.slice_source(source.text, inner.element.span());
    let suffix = if outer.greedy { "" } else { "?" };
    let replacement = format!("{atom_raw}{merged}{suffix}");
    let original = effective.slice_source(source.text, outer.span).to_string();

    let range = effective.to_source(outer.span).shift(source.base_offset);
    let kind = FindingKind::NestedQuantifiers { original, replacement: replacement.clone() };

    out.push(if source.fixable {
        Finding::with_fix(range, kind, Fix { range, text: replacement })
    } else {
        Finding::new(range, kind)
    });
}

/// `?`, `*`, or `+`; any other bound blocks the rule.
fn simple_quantifier(quantifier: &Quantifier) -> Option<char> {
    match (quantifier.min, quantifier.max) {
        (0, Some(1)) => Some('?'),
        (0, None) => Some('*'),
        (1, None) => Some('+'),
        _ => None,
    }
}

/// The six reducible (inner, outer) pairs. `?` as the outer quantifier
/// never reduces.
fn combine(inner: char, outer: char) -> Option<char> {
    match (inner, outer) {
        ('+', '+') => Some('+'),
        ('+', '*') | ('*', '+') | ('*', '*') | ('?', '+') | ('?', '*') => Some('*'),
        _ => None,
    }
}

#[cfg(test)]
#[path = "nested_quantifiers_tests.rs"]
mod tests;

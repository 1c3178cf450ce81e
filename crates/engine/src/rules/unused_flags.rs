// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Flags that cannot affect what the pattern matches.
//!
//! Three flags are checkable from the node tree alone:
//! - `i` does nothing when the pattern contains no cased letter,
//! - `m` does nothing without a `^` or `$` anchor,
//! - `s` does nothing without a `.`.
//!
//! Shorthand classes are conservatively treated as letter-free: `\w`
//! matches the same set with or without `i`. The fix deletes the flag
//! character from the flags text.

use crate::finding::{Finding, Fix, FindingKind, Span};
use crate::parser::{
    self, Alternation, AssertionKind, AtomKind, CharClass, ClassBody, ClassItem, Flags, Node,
    Pattern, SetExpr, SetOperation,
};
use crate::rules::Rule;
use crate::source::{EffectivePattern, PatternSource};

pub struct UnusedFlags;

impl Rule for UnusedFlags {
    fn name(&self) -> &'static str {
        "unused-flags"
    }

    fn description(&self) -> &'static str {
        "Regular expression flags without effect"
    }

    fn run(&self, source: &PatternSource) -> Vec<Finding> {
        check(source)
    }
}

pub fn check(source: &PatternSource) -> Vec<Finding> {
    let effective = EffectivePattern::new(source.text, source.double_escaped);
    let flags = Flags::parse(source.flags);
    match parser::parse(effective.text(), flags) {
        Ok(pattern) => check_parsed(source, &pattern),
        Err(_) => Vec::new(),
    }
}

pub(crate) fn check_parsed(source: &PatternSource, pattern: &Pattern) -> Vec<Finding> {
    let flags = Flags::parse(source.flags);
    if !flags.ignore_case && !flags.multiline && !flags.dot_all {
        return Vec::new();
    }

    let mut usage = Usage::default();
    scan_alternation(&pattern.alternation, &mut usage);

    let mut findings = Vec::new();
    if flags.ignore_case && !usage.letter {
        push_unused(source, 'i', &mut findings);
    }
    if flags.multiline && !usage.anchor {
        push_unused(source, 'm', &mut findings);
    }
    if flags.dot_all && !usage.dot {
        push_unused(source, 's', &mut findings);
    }
    findings
}

fn push_unused(source: &PatternSource, flag: char, out: &mut Vec<Finding>) {
    // Flag characters are ASCII, so the byte index is the char index.
    let Some(index) = source.flags.find(flag) else { return };
    let range = Span::new(index, index + 1).shift(source.flags_offset);
    let kind = FindingKind::UnusedFlag { flag };

    out.push(if source.fixable {
        Finding::with_fix(range, kind, Fix { range, text: String::new() })
    } else {
        Finding::new(range, kind)
    });
}

#[derive(Default)]
struct Usage {
    letter: bool,
    anchor: bool,
    dot: bool,
}

fn scan_alternation(alternation: &Alternation, usage: &mut Usage) {
    for branch in &alternation.branches {
        for element in &branch.elements {
            scan_node(element, usage);
        }
    }
}

fn scan_node(node: &Node, usage: &mut Usage) {
    match node {
        Node::Group(group) => scan_alternation(&group.body, usage),
        Node::Quantifier(quantifier) => scan_node(&quantifier.element, usage),
        Node::Class(class) => scan_class(class, usage),
        Node::Assertion(assertion) => {
            if matches!(assertion.kind, AssertionKind::Start | AssertionKind::End) {
                usage.anchor = true;
            }
        }
        Node::Atom(atom) => match atom.kind {
            AtomKind::Literal(c) => usage.letter |= is_cased(c),
            AtomKind::Dot => usage.dot = true,
            AtomKind::Perl(_) | AtomKind::Backreference | AtomKind::Opaque => {}
        },
    }
}

fn scan_class(class: &CharClass, usage: &mut Usage) {
    match &class.body {
        ClassBody::Items(items) => {
            for item in items {
                scan_class_item(item, usage);
            }
        }
        ClassBody::Operation(operation) => scan_operation(operation, usage),
    }
}

fn scan_operation(operation: &SetOperation, usage: &mut Usage) {
    for side in [&operation.left, &operation.right] {
        match &**side {
            SetExpr::Operation(nested) => scan_operation(nested, usage),
            SetExpr::Operand(item) => scan_class_item(item, usage),
        }
    }
}

fn scan_class_item(item: &ClassItem, usage: &mut Usage) {
    match item {
        ClassItem::Literal { value, .. } => usage.letter |= is_cased(*value),
        ClassItem::Range { lo, hi, .. } => usage.letter |= range_has_letter(*lo, *hi),
        ClassItem::Nested(class) => scan_class(class, usage),
        ClassItem::Perl { .. } | ClassItem::Opaque { .. } => {}
    }
}

fn is_cased(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn range_has_letter(lo: char, hi: char) -> bool {
    let (lo, hi) = (lo as u32, hi as u32);
    (lo <= 0x5A && hi >= 0x41) || (lo <= 0x7A && hi >= 0x61)
}

#[cfg(test)]
#[path = "unused_flags_tests.rs"]
mod tests;

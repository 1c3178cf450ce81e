// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unnecessary operands in Unicode-set class operations.
//!
//! Active only under the `v` flag. For each binary `&&`/`--` whose
//! operands both resolve to known code-point sets:
//! - disjoint intersection: the whole expression is empty; the fix
//!   substitutes the never-matching `^^` token.
//! - subset intersection: the superset operand is redundant; the fix is
//!   the subset operand, unwrapped of its own brackets.
//! - disjoint subtraction: the right operand does nothing; the fix is the
//!   left operand alone.
//! - subset subtraction: the result is empty; `^^` again.
//!
//! Operands the engine does not model (`\p{...}`, `\q{...}`) produce no
//! finding.

use crate::finding::{Finding, Fix, FindingKind};
use crate::parser::set::{CodePointSet, expr_set};
use crate::parser::{
    self, Alternation, CharClass, ClassBody, ClassItem, Flags, Node, Pattern, SetExpr, SetOp,
    SetOperation,
};
use crate::rules::Rule;
use crate::source::{EffectivePattern, PatternSource};

/// Replacement that can never match: a class containing only `^`,
/// negated.
const EMPTY_SET_TOKEN: &str = "^^";

pub struct SetOperands;

impl Rule for SetOperands {
    fn name(&self) -> &'static str {
        "set-operands"
    }

    fn description(&self) -> &'static str {
        "Unnecessary character class set operands"
    }

    fn run(&self, source: &PatternSource) -> Vec<Finding> {
        check(source)
    }
}

pub fn check(source: &PatternSource) -> Vec<Finding> {
    let flags = Flags::parse(source.flags);
    if !flags.unicode_sets {
        return Vec::new();
    }
    let effective = EffectivePattern::new(source.text, source.double_escaped);
    match parser::parse(effective.text(), flags) {
        Ok(pattern) => check_parsed(source, &effective, &pattern, flags),
        Err(_) => Vec::new(),
    }
}

pub(crate) fn check_parsed(
    source: &PatternSource,
    effective: &EffectivePattern,
    pattern: &Pattern,
    flags: Flags,
) -> Vec<Finding> {
    if !flags.unicode_sets {
        return Vec::new();
    }
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
        Node::Class(class) => visit_class(class, source, effective, out),
        Node::Group(group) => visit_alternation(&group.body, source, effective, out),
        Node::Quantifier(quantifier) => visit_node(&quantifier.element, source, effective, out),
        Node::Assertion(_) | Node::Atom(_) => {}
    }
}

fn visit_class(
    class: &CharClass,
    source: &PatternSource,
    effective: &EffectivePattern,
    out: &mut Vec<Finding>,
) {
    match &class.body {
        ClassBody::Operation(operation) => visit_operation(operation, source, effective, out),
        ClassBody::Items(items) => {
            for item in items {
                if let ClassItem::Nested(nested) = item {
                    visit_class(nested, source, effective, out);
                }
            }
        }
    }
}

fn visit_operation(
    operation: &SetOperation,
    source: &PatternSource,
    effective: &EffectivePattern,
    out: &mut Vec<Finding>,
) {
    inspect(operation, source, effective, out);

    for side in [&operation.left, &operation.right] {
        match &**side {
            SetExpr::Operation(nested) => visit_operation(nested, source, effective, out),
            SetExpr::Operand(ClassItem::Nested(class)) => {
                visit_class(class, source, effective, out);
            }
            SetExpr::Operand(_) => {}
        }
    }
}

fn inspect(
    operation: &SetOperation,
    source: &PatternSource,
    effective: &EffectivePattern,
    out: &mut Vec<Finding>,
) {
    let (Some(left), Some(right)) = (expr_set(&operation.left), expr_set(&operation.right)) else {
        return;
    };

    let left_raw = effective.slice_source(source.text, operation.left.span()).to_string();
    let right_raw = effective.slice_source(source.text, operation.right.span()).to_string();

    let (kind, fix_text) = match operation.op {
        SetOp::Intersection => match relation(&left, &right) {
            Relation::Disjoint => (
                FindingKind::IntersectionDisjoint { left: left_raw, right: right_raw },
                EMPTY_SET_TOKEN.to_string(),
            ),
            Relation::LeftInRight => {
                let fix = unwrap_brackets(&left_raw).to_string();
                (
                    FindingKind::IntersectionSubset { subset: left_raw, superset: right_raw },
                    fix,
                )
            }
            Relation::RightInLeft => {
                let fix = unwrap_brackets(&right_raw).to_string();
                (
                    FindingKind::IntersectionSubset { subset: right_raw, superset: left_raw },
                    fix,
                )
            }
            Relation::Overlap => return,
        },
        SetOp::Subtraction => match relation(&left, &right) {
            Relation::Disjoint => {
                let fix = unwrap_brackets(&left_raw).to_string();
                (FindingKind::SubtractionDisjoint { left: left_raw, right: right_raw }, fix)
            }
            Relation::LeftInRight => (
                FindingKind::SubtractionSubset { left: left_raw, right: right_raw },
                EMPTY_SET_TOKEN.to_string(),
            ),
            Relation::RightInLeft | Relation::Overlap => return,
        },
    };

    let range = effective.to_source(operation.span).shift(source.base_offset);
    out.push(if source.fixable {
        Finding::with_fix(range, kind, Fix { range, text: fix_text })
    } else {
        Finding::new(range, kind)
    });
}

enum Relation {
    Disjoint,
    LeftInRight,
    RightInLeft,
    Overlap,
}

fn relation(left: &CodePointSet, right: &CodePointSet) -> Relation {
    if left.is_disjoint(right) {
        Relation::Disjoint
    } else if left.is_subset(right) {
        Relation::LeftInRight
    } else if right.is_subset(left) {
        Relation::RightInLeft
    } else {
        Relation::Overlap
    }
}

/// A bracketed operand substitutes as its bare content.
fn unwrap_brackets(raw: &str) -> &str {
    raw.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(raw)
}

#[cfg(test)]
#[path = "set_operands_tests.rs"]
mod tests;

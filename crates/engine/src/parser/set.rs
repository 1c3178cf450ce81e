// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic code-point sets for the set-relation rule.
//!
//! A [`CodePointSet`] is a sorted list of disjoint inclusive ranges over
//! the Unicode scalar space. Class operands resolve to one of these (or to
//! `None` for constructs the engine carries but does not model, which
//! simply produces no finding).

use super::{CharClass, ClassBody, ClassItem, PerlClass, SetExpr, SetOperation, SetOp};

const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Sorted, disjoint, inclusive code-point ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePointSet {
    ranges: Vec<(u32, u32)>,
}

impl CodePointSet {
    pub fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    pub fn single(c: u32) -> Self {
        Self { ranges: vec![(c, c)] }
    }

    pub fn range(lo: u32, hi: u32) -> Self {
        if lo > hi { Self::empty() } else { Self { ranges: vec![(lo, hi)] } }
    }

    pub fn from_ranges(ranges: &[(u32, u32)]) -> Self {
        let mut set = Self::empty();
        for &(lo, hi) in ranges {
            set = set.union(&Self::range(lo, hi));
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut merged: Vec<(u32, u32)> =
            self.ranges.iter().chain(other.ranges.iter()).copied().collect();
        merged.sort_unstable();

        let mut ranges: Vec<(u32, u32)> = Vec::with_capacity(merged.len());
        for (lo, hi) in merged {
            match ranges.last_mut() {
                // Adjacent ranges coalesce too.
                Some(last) if lo <= last.1.saturating_add(1) => last.1 = last.1.max(hi),
                _ => ranges.push((lo, hi)),
            }
        }
        Self { ranges }
    }

    pub fn complement(&self) -> Self {
        let mut ranges = Vec::with_capacity(self.ranges.len() + 1);
        let mut next = 0u32;

        for &(lo, hi) in &self.ranges {
            if lo > next {
                ranges.push((next, lo - 1));
            }
            next = hi.saturating_add(1);
            if next > MAX_CODE_POINT {
                return Self { ranges };
            }
        }
        ranges.push((next, MAX_CODE_POINT));
        Self { ranges }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let mut ranges = Vec::new();
        let (mut i, mut j) = (0, 0);

        while i < self.ranges.len() && j < other.ranges.len() {
            let (a_lo, a_hi) = self.ranges[i];
            let (b_lo, b_hi) = other.ranges[j];
            let lo = a_lo.max(b_lo);
            let hi = a_hi.min(b_hi);
            if lo <= hi {
                ranges.push((lo, hi));
            }
            if a_hi < b_hi { i += 1 } else { j += 1 }
        }
        Self { ranges }
    }

    pub fn subtract(&self, other: &Self) -> Self {
        self.intersect(&other.complement())
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersect(other).is_empty()
    }

    /// Whether every code point of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        let mut j = 0;
        for &(lo, hi) in &self.ranges {
            while j < other.ranges.len() && other.ranges[j].1 < lo {
                j += 1;
            }
            match other.ranges.get(j) {
                Some(&(o_lo, o_hi)) if o_lo <= lo && hi <= o_hi => {}
                _ => return false,
            }
        }
        true
    }

    pub fn digit() -> Self {
        Self::range(0x30, 0x39)
    }

    pub fn word() -> Self {
        Self::from_ranges(&[(0x30, 0x39), (0x41, 0x5A), (0x5F, 0x5F), (0x61, 0x7A)])
    }

    /// ECMAScript WhiteSpace plus LineTerminator.
    pub fn space() -> Self {
        Self::from_ranges(&[
            (0x09, 0x0D),
            (0x20, 0x20),
            (0xA0, 0xA0),
            (0x1680, 0x1680),
            (0x2000, 0x200A),
            (0x2028, 0x2029),
            (0x202F, 0x202F),
            (0x205F, 0x205F),
            (0x3000, 0x3000),
            (0xFEFF, 0xFEFF),
        ])
    }
}

/// Resolve a whole class, honoring negation. `None` when any part of it
/// is outside the modeled subset.
pub fn class_set(class: &CharClass) -> Option<CodePointSet> {
    let base = match &class.body {
        ClassBody::Items(items) => {
            let mut set = CodePointSet::empty();
            for item in items {
                set = set.union(&item_set(item)?);
            }
            set
        }
        ClassBody::Operation(op) => operation_set(op)?,
    };

    Some(if class.negated { base.complement() } else { base })
}

pub fn expr_set(expr: &SetExpr) -> Option<CodePointSet> {
    match expr {
        SetExpr::Operand(item) => item_set(item),
        SetExpr::Operation(op) => operation_set(op),
    }
}

pub fn operation_set(op: &SetOperation) -> Option<CodePointSet> {
    let left = expr_set(&op.left)?;
    let right = expr_set(&op.right)?;
    Some(match op.op {
        SetOp::Intersection => left.intersect(&right),
        SetOp::Subtraction => left.subtract(&right),
    })
}

fn item_set(item: &ClassItem) -> Option<CodePointSet> {
    match item {
        ClassItem::Literal { value, .. } => Some(CodePointSet::single(*value as u32)),
        ClassItem::Range { lo, hi, .. } => Some(CodePointSet::range(*lo as u32, *hi as u32)),
        ClassItem::Perl { kind, .. } => Some(perl_set(*kind)),
        ClassItem::Nested(class) => class_set(class),
        ClassItem::Opaque { .. } => None,
    }
}

fn perl_set(kind: PerlClass) -> CodePointSet {
    match kind {
        PerlClass::Digit => CodePointSet::digit(),
        PerlClass::NotDigit => CodePointSet::digit().complement(),
        PerlClass::Word => CodePointSet::word(),
        PerlClass::NotWord => CodePointSet::word().complement(),
        PerlClass::Space => CodePointSet::space(),
        PerlClass::NotSpace => CodePointSet::space().complement(),
    }
}

#[cfg(test)]
#[path = "set_tests.rs"]
mod tests;

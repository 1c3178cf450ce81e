// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule registry and analysis entry point.
//!
//! Rules are independent pure functions over one [`PatternSource`]; there
//! is no shared state between them or across calls. [`analyze`] runs the
//! full set with the required gating: flag problems short-circuit
//! everything else, and a pattern that fails the structural parse yields
//! exactly one invalid-pattern finding with every other detector silent.

pub mod empty_alternatives;
pub mod lookaround_assertions;
pub mod nested_assertions;
pub mod nested_quantifiers;
pub mod set_operands;
pub mod unused_flags;
pub mod validity;

use crate::finding::{Finding, FindingKind, Span};
use crate::parser::{self, Flags};
use crate::source::{EffectivePattern, PatternSource};

/// One independent detector.
pub trait Rule {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn run(&self, source: &PatternSource) -> Vec<Finding>;
}

/// Every rule the engine ships, in reporting order.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(validity::Validity),
        Box::new(empty_alternatives::EmptyAlternatives),
        Box::new(nested_assertions::NestedAssertions),
        Box::new(lookaround_assertions::LookaroundAssertions),
        Box::new(nested_quantifiers::NestedQuantifiers),
        Box::new(set_operands::SetOperands),
        Box::new(unused_flags::UnusedFlags),
    ]
}

/// Run every rule over one pattern occurrence.
pub fn analyze(source: &PatternSource) -> Vec<Finding> {
    tracing::trace!(pattern = source.text, flags = source.flags, "analyzing pattern");

    // Flags must be clean before anything looks at the pattern body.
    let flag_findings = validity::check_flags(source);
    if !flag_findings.is_empty() {
        return flag_findings;
    }

    let effective = EffectivePattern::new(source.text, source.double_escaped);
    let flags = Flags::parse(source.flags);

    let pattern = match parser::parse(effective.text(), flags) {
        Ok(pattern) => pattern,
        Err(error) => {
            tracing::debug!(%error, "pattern failed structural parse");
            let range = Span::new(0, source.text.len()).shift(source.base_offset);
            return vec![Finding::new(range, FindingKind::InvalidPattern)];
        }
    };

    let mut findings = empty_alternatives::check(source);
    findings.extend(nested_assertions::check(source));
    findings.extend(lookaround_assertions::check_parsed(source, &effective, &pattern));
    findings.extend(nested_quantifiers::check_parsed(source, &effective, &pattern));
    findings.extend(set_operands::check_parsed(source, &effective, &pattern, flags));
    findings.extend(unused_flags::check_parsed(source, &pattern));
    findings
}

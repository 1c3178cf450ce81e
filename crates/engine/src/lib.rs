// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Regex pattern analysis for static linting.
//!
//! The engine takes one regex occurrence — pattern text, flags text, and
//! the offsets where the host found them — and reports redundant,
//! ineffective, or invalid constructs with byte-exact fixes. Pattern text
//! is analyzed, never executed: everything here is structural scanning
//! and a lightweight parse.
//!
//! ```
//! use rexlint::{analyze, PatternSource};
//!
//! let source = PatternSource::literal("a||b", "", 1, 6);
//! let findings = analyze(&source);
//! assert_eq!(findings.len(), 1);
//! ```

pub mod finding;
pub mod parser;
pub mod rules;
pub mod scan;
pub mod source;

pub use finding::{Finding, FindingKind, Fix, Span};
pub use rules::{Rule, all_rules, analyze};
pub use source::{EffectivePattern, PatternSource};

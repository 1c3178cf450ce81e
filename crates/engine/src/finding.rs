// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Finding value types shared by every rule.
//!
//! A [`Finding`] is an immutable record: a half-open byte range in host
//! coordinates, a [`FindingKind`] carrying the interpolation data for the
//! host's message renderer, and an optional textual [`Fix`].

use serde::Serialize;
use serde_json::json;

/// Half-open `[start, end)` byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Translate a pattern-relative span into host coordinates.
    pub fn shift(self, base: usize) -> Self {
        Self::new(self.start + base, self.end + base)
    }
}

/// A byte-exact rewrite: replace `range` with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    pub range: Span,
    pub text: String,
}

/// What a rule found, with the data its message interpolates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// A zero-length alternation branch.
    EmptyAlternative,
    /// A lookaround that trivially wraps a single assertion.
    UnnecessaryNesting { outer: String, inner: String },
    /// A positive lookahead at the end of another lookahead's content.
    UnnecessaryLookahead { inner: String },
    /// A positive lookbehind at the start of another lookbehind's content.
    UnnecessaryLookbehind { inner: String },
    /// Nested simple quantifiers that collapse to one.
    NestedQuantifiers { original: String, replacement: String },
    IntersectionDisjoint { left: String, right: String },
    IntersectionSubset { subset: String, superset: String },
    SubtractionDisjoint { left: String, right: String },
    SubtractionSubset { left: String, right: String },
    UnusedFlag { flag: char },
    InvalidFlag { flag: char },
    DuplicateFlag { flag: char },
    ConflictingFlags,
    InvalidPattern,
}

impl FindingKind {
    /// Stable identifier for the host's message table.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyAlternative => "empty_alternative",
            Self::UnnecessaryNesting { .. } => "unnecessary_nesting",
            Self::UnnecessaryLookahead { .. } => "unnecessary_lookahead",
            Self::UnnecessaryLookbehind { .. } => "unnecessary_lookbehind",
            Self::NestedQuantifiers { .. } => "nested_quantifiers",
            Self::IntersectionDisjoint { .. } => "intersection_disjoint",
            Self::IntersectionSubset { .. } => "intersection_subset",
            Self::SubtractionDisjoint { .. } => "subtraction_disjoint",
            Self::SubtractionSubset { .. } => "subtraction_subset",
            Self::UnusedFlag { flag: 'i' } => "unused_ignore_case",
            Self::UnusedFlag { flag: 'm' } => "unused_multiline",
            Self::UnusedFlag { .. } => "unused_dot_all",
            Self::InvalidFlag { .. } => "invalid_flag",
            Self::DuplicateFlag { .. } => "duplicate_flag",
            Self::ConflictingFlags => "conflicting_flags",
            Self::InvalidPattern => "invalid_pattern",
        }
    }

    /// Interpolation data for message templating.
    pub fn data(&self) -> serde_json::Value {
        match self {
            Self::EmptyAlternative | Self::ConflictingFlags | Self::InvalidPattern => json!({}),
            Self::UnnecessaryNesting { outer, inner } => json!({ "outer": outer, "inner": inner }),
            Self::UnnecessaryLookahead { inner } | Self::UnnecessaryLookbehind { inner } => {
                json!({ "inner": inner })
            }
            Self::NestedQuantifiers { original, replacement } => {
                json!({ "original": original, "replacement": replacement })
            }
            Self::IntersectionDisjoint { left, right }
            | Self::SubtractionDisjoint { left, right }
            | Self::SubtractionSubset { left, right } => {
                json!({ "left": left, "right": right })
            }
            Self::IntersectionSubset { subset, superset } => {
                json!({ "subset": subset, "superset": superset })
            }
            Self::UnusedFlag { flag } | Self::InvalidFlag { flag } | Self::DuplicateFlag { flag } => {
                json!({ "flag": flag })
            }
        }
    }
}

/// One reported issue. The host renders the message, and applies the fix
/// only if the user accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub range: Span,
    pub kind: FindingKind,
    pub fix: Option<Fix>,
}

impl Finding {
    pub fn new(range: Span, kind: FindingKind) -> Self {
        Self { range, kind, fix: None }
    }

    pub fn with_fix(range: Span, kind: FindingKind, fix: Fix) -> Self {
        Self { range, kind, fix: Some(fix) }
    }
}

#[cfg(test)]
#[path = "finding_tests.rs"]
mod tests;

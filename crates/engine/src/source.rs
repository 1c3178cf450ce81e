// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input description and double-escape normalization.
//!
//! The host hands the engine exactly the pattern and flags substrings it
//! located in source, with their offsets. Pattern text taken from a string
//! literal may carry doubled backslashes for what the effective pattern
//! sees as a single one; [`EffectivePattern`] collapses those pairs while
//! keeping a map back to source offsets so reported spans and fix text
//! stay byte-exact.

use crate::finding::Span;

/// One regex occurrence to analyze.
#[derive(Debug, Clone, Copy)]
pub struct PatternSource<'a> {
    /// Pattern body exactly as it appears in source (delimiters stripped).
    pub text: &'a str,
    /// Flags text (may be empty).
    pub flags: &'a str,
    /// True when `text` comes from a string literal, where a backslash may
    /// represent a previously-decoded escape.
    pub double_escaped: bool,
    /// Host offset of `text[0]`.
    pub base_offset: usize,
    /// Host offset of `flags[0]`.
    pub flags_offset: usize,
    /// False for dynamically constructed patterns: report without fixes.
    pub fixable: bool,
}

impl<'a> PatternSource<'a> {
    /// A regex literal such as `/ab+c/i`.
    pub fn literal(text: &'a str, flags: &'a str, base_offset: usize, flags_offset: usize) -> Self {
        Self { text, flags, double_escaped: false, base_offset, flags_offset, fixable: true }
    }

    /// A string-literal argument to a pattern constructor.
    pub fn string_argument(
        text: &'a str,
        flags: &'a str,
        base_offset: usize,
        flags_offset: usize,
    ) -> Self {
        Self { text, flags, double_escaped: true, base_offset, flags_offset, fixable: true }
    }

    pub fn without_fixes(mut self) -> Self {
        self.fixable = false;
        self
    }
}

/// The effective pattern text plus a map from effective byte offsets back
/// to offsets in the source text it was derived from.
#[derive(Debug)]
pub struct EffectivePattern {
    text: String,
    map: Vec<usize>,
}

impl EffectivePattern {
    pub fn new(source_text: &str, double_escaped: bool) -> Self {
        let bytes = source_text.as_bytes();
        let mut text = String::with_capacity(source_text.len());
        let mut map = Vec::with_capacity(source_text.len() + 1);

        let mut i = 0;
        while i < bytes.len() {
            if double_escaped && bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'\\') {
                map.push(i);
                text.push('\\');
                i += 2;
                continue;
            }
            map.push(i);
            // Copy one full UTF-8 sequence so the map stays char-aligned.
            let width = utf8_width(bytes[i]);
            let end = (i + width).min(bytes.len());
            text.push_str(&source_text[i..end]);
            for src in (i + 1)..end {
                map.push(src);
            }
            i = end;
        }
        map.push(source_text.len());

        Self { text, map }
    }

    /// The effective pattern text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Translate a span over the effective text into a span over the
    /// source text.
    pub fn to_source(&self, span: Span) -> Span {
        let start = self.map.get(span.start).copied().unwrap_or(span.start);
        let end = self.map.get(span.end).copied().unwrap_or(span.end);
        Span::new(start, end)
    }

    /// Slice the source text a span of effective text maps onto.
    pub fn slice_source<'a>(&self, source_text: &'a str, span: Span) -> &'a str {
        let src = self.to_source(span);
        source_text.get(src.start..src.end).unwrap_or("")
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        b if b < 0x80 => 1,
        b if b >= 0xF0 => 4,
        b if b >= 0xE0 => 3,
        b if b >= 0xC0 => 2,
        _ => 1,
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
